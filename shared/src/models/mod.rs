//! Domain models for weather/revenue analysis

mod category;
mod correlation;
mod impact;
mod prediction;
mod sales;
mod weather;

pub use category::*;
pub use correlation::*;
pub use impact::*;
pub use prediction::*;
pub use sales::*;
pub use weather::*;
