//! Weather Revenue Impact - backend library
//!
//! Ingests POS sales exports and weather history, runs the shared analysis
//! engine and renders reports for the `wri` command-line tool.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
