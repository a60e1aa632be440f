//! Shared types, models and the weather/revenue analysis engine
//!
//! This crate is used by the backend (batch analysis from CSV exports) and
//! by the WASM bindings (client-side projection on the dashboard). It holds
//! no state and performs no I/O: callers hand it parsed records and render
//! whatever it returns.

pub mod analysis;
pub mod models;
pub mod types;
pub mod validation;

pub use analysis::*;
pub use models::*;
pub use types::*;
pub use validation::*;
