//! Correlation models

use serde::{Deserialize, Serialize};

use super::JoinedDay;

/// Continuous weather variable correlated against revenue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherVariable {
    Temperature,
    Humidity,
}

impl WeatherVariable {
    /// Read this variable from a joined day
    pub fn value(&self, day: &JoinedDay) -> f64 {
        match self {
            WeatherVariable::Temperature => day.temperature_c,
            WeatherVariable::Humidity => day.humidity_pct,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "°C",
            WeatherVariable::Humidity => "%",
        }
    }
}

impl std::fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherVariable::Temperature => write!(f, "temperature"),
            WeatherVariable::Humidity => write!(f, "humidity"),
        }
    }
}

/// Strength bucket for a Pearson coefficient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    StrongNegative,
    WeakNegative,
    None,
    WeakPositive,
    StrongPositive,
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationStrength::StrongNegative => write!(f, "strong negative"),
            CorrelationStrength::WeakNegative => write!(f, "weak negative"),
            CorrelationStrength::None => write!(f, "no significant correlation"),
            CorrelationStrength::WeakPositive => write!(f, "weak positive"),
            CorrelationStrength::StrongPositive => write!(f, "strong positive"),
        }
    }
}

/// Observed min/max of the variable over the analyzed days
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct VariableRange {
    pub min: f64,
    pub max: f64,
}

/// Pearson correlation and OLS slope between a weather variable and revenue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationResult {
    pub variable: WeatherVariable,
    /// Pearson r in [-1, 1]
    pub pearson_r: f64,
    /// Revenue change per one unit of the variable
    pub slope_per_unit: f64,
    /// `slope_per_unit` as a percentage of mean revenue
    pub percent_per_unit: f64,
    pub mean_revenue: f64,
    pub mean_variable: f64,
    /// Days with a valid reading, whether or not enough to analyze
    pub sample_days: usize,
    pub has_enough_data: bool,
    pub variable_range: VariableRange,
    pub interpretation: CorrelationStrength,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CorrelationResult {
    /// Zeroed result for a variable that lacks enough valid days
    pub fn insufficient(variable: WeatherVariable, sample_days: usize, min_days: usize) -> Self {
        Self {
            variable,
            pearson_r: 0.0,
            slope_per_unit: 0.0,
            percent_per_unit: 0.0,
            mean_revenue: 0.0,
            mean_variable: 0.0,
            sample_days,
            has_enough_data: false,
            variable_range: VariableRange::default(),
            interpretation: CorrelationStrength::None,
            message: Some(format!(
                "Not enough data: {} days with valid {} readings, need at least {}",
                sample_days, variable, min_days
            )),
        }
    }
}
