//! Weather/revenue analysis engine
//!
//! Pure functions over parsed records. Data gaps never fail: they surface
//! as `has_enough_data = false` flags on the results.

mod category_impact;
mod comfort;
mod correlation;
mod forecast;
mod heat_index;
mod join;
mod projection;
mod thresholds;

pub use category_impact::*;
pub use comfort::*;
pub use correlation::*;
pub use forecast::*;
pub use heat_index::*;
pub use join::*;
pub use projection::*;
pub use thresholds::*;
