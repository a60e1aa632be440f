//! Revenue prediction service response models
//!
//! The prediction service is hosted separately; these types only mirror the
//! fields it returns so its output can be shown alongside local projections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One predicted day from the revenue prediction service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenuePrediction {
    pub date: NaiveDate,
    pub predicted_revenue: f64,
    pub confidence_low: f64,
    pub confidence_high: f64,
    pub weather_impact_pct: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub closed_reason: Option<String>,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub holiday_name: Option<String>,
    #[serde(default)]
    pub model_info: Option<ModelInfo>,
}

/// Fit and tracking metrics reported by the prediction service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub r_squared: f64,
    pub mae: f64,
    /// Out-of-sample MAPE on held-out days
    #[serde(default)]
    pub oos_mape: Option<f64>,
    /// MAPE of past predictions checked against actual revenue
    #[serde(default)]
    pub tracked_mape: Option<f64>,
    #[serde(default)]
    pub tracked_predictions: u32,
    #[serde(default)]
    pub drift_detected: bool,
}
