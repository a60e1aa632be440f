//! Business logic services for weather impact analysis

pub mod reporting;
pub mod weather_impact;

pub use weather_impact::{ForecastOutlook, WeatherImpactReport, WeatherImpactService};
