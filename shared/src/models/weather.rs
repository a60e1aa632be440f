//! Weather data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Observed weather for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub temperature_c: f64,
    /// Relative humidity, 0-100. Zero means the reading is missing.
    pub humidity_pct: f64,
    pub precipitation_mm: f64,
}

/// Sales totals for one day joined with that day's weather
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinedDay {
    pub date: NaiveDate,
    pub revenue: f64,
    pub services: u32,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub precipitation_mm: f64,
}

/// Daily weather forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_avg_c: Option<f64>,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    #[serde(default)]
    pub precipitation_mm: f64,
    #[serde(default)]
    pub precip_probability_pct: f64,
}

impl ForecastDay {
    /// Average temperature, or the min/max midpoint when the provider gives none
    pub fn temperature_c(&self) -> f64 {
        self.temp_avg_c
            .unwrap_or((self.temp_min_c + self.temp_max_c) / 2.0)
    }
}
