//! Tunable thresholds for classification, windows and correlation
//!
//! Defaults are tuned for a subtropical highland climate (~800 m elevation).
//! Every value can be overridden through configuration.

use serde::{Deserialize, Serialize};

use crate::validation::{validate_non_negative, validate_percentage, validate_range, ValidationError};

/// Minimum distinct days before a category's averages are trusted
pub const MIN_SAMPLE_DAYS: usize = 3;

/// Minimum valid days before a correlation is computed
pub const MIN_CORRELATION_DAYS: usize = 30;

pub const PRIMARY_WINDOW_DAYS: u32 = 90;
pub const EXTENDED_WINDOW_DAYS: u32 = 180;

/// Thresholds for the six-way comfort classification of observed days
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComfortThresholds {
    /// Precipitation above this is a rainy day
    pub rain_mm: f64,
    /// Heat index at or above this is a muggy day
    pub muggy_heat_index_c: f64,
    pub hot_min_c: f64,
    pub cold_max_c: f64,
    /// Humidity at or above this, with any precipitation, is a humid day
    pub humid_min_pct: f64,
    /// Below this temperature the heat index is not computed
    pub heat_index_min_temp_c: f64,
    /// Below this humidity the heat index is not computed
    pub heat_index_min_humidity_pct: f64,
}

impl Default for ComfortThresholds {
    fn default() -> Self {
        Self {
            rain_mm: 5.0,
            muggy_heat_index_c: 27.0,
            hot_min_c: 23.0,
            cold_max_c: 10.0,
            humid_min_pct: 80.0,
            heat_index_min_temp_c: 27.0,
            heat_index_min_humidity_pct: 40.0,
        }
    }
}

/// Thresholds for the three-way forecast classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForecastThresholds {
    pub rain_mm: f64,
    pub rain_probability_pct: f64,
    pub cold_max_c: f64,
}

impl Default for ForecastThresholds {
    fn default() -> Self {
        Self {
            rain_mm: 5.0,
            rain_probability_pct: 50.0,
            cold_max_c: 12.0,
        }
    }
}

/// Lookback windows for the category impact analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub primary_days: u32,
    pub extended_days: u32,
    pub min_sample_days: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            primary_days: PRIMARY_WINDOW_DAYS,
            extended_days: EXTENDED_WINDOW_DAYS,
            min_sample_days: MIN_SAMPLE_DAYS,
        }
    }
}

/// Correlation sample minimum and interpretation cut-offs on |r|
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorrelationConfig {
    pub min_days: usize,
    pub weak_r: f64,
    pub strong_r: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_days: MIN_CORRELATION_DAYS,
            weak_r: 0.1,
            strong_r: 0.3,
        }
    }
}

/// Every tunable of the analysis engine
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisThresholds {
    pub comfort: ComfortThresholds,
    pub forecast: ForecastThresholds,
    pub windows: WindowConfig,
    pub correlation: CorrelationConfig,
}

impl AnalysisThresholds {
    /// Reject threshold sets that would make classification or windows meaningless
    pub fn validate(&self) -> Result<(), ValidationError> {
        let comfort = &self.comfort;
        validate_non_negative("comfort.rain_mm", comfort.rain_mm)?;
        validate_percentage("comfort.humid_min_pct", comfort.humid_min_pct)?;
        validate_percentage(
            "comfort.heat_index_min_humidity_pct",
            comfort.heat_index_min_humidity_pct,
        )?;
        if comfort.cold_max_c >= comfort.hot_min_c {
            return Err(ValidationError::Inconsistent(format!(
                "comfort.cold_max_c ({}) must be below comfort.hot_min_c ({})",
                comfort.cold_max_c, comfort.hot_min_c
            )));
        }

        validate_non_negative("forecast.rain_mm", self.forecast.rain_mm)?;
        validate_percentage(
            "forecast.rain_probability_pct",
            self.forecast.rain_probability_pct,
        )?;

        let windows = &self.windows;
        if windows.primary_days == 0 || windows.primary_days >= windows.extended_days {
            return Err(ValidationError::Inconsistent(format!(
                "windows.primary_days ({}) must be positive and below windows.extended_days ({})",
                windows.primary_days, windows.extended_days
            )));
        }
        if windows.min_sample_days == 0 {
            return Err(ValidationError::Inconsistent(
                "windows.min_sample_days must be at least 1".to_string(),
            ));
        }

        let correlation = &self.correlation;
        if correlation.min_days < 2 {
            return Err(ValidationError::Inconsistent(
                "correlation.min_days must be at least 2".to_string(),
            ));
        }
        validate_range("correlation.weak_r", correlation.weak_r, 0.0, 1.0)?;
        validate_range("correlation.strong_r", correlation.strong_r, correlation.weak_r, 1.0)?;
        Ok(())
    }
}
