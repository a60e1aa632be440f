//! Forecast day classification

use super::ForecastThresholds;
use crate::models::{ForecastCategory, ForecastDay};

/// Rain rule shared by the classifier and the impact projection
pub fn is_rainy_forecast(day: &ForecastDay, thresholds: &ForecastThresholds) -> bool {
    day.precipitation_mm > thresholds.rain_mm
        || day.precip_probability_pct > thresholds.rain_probability_pct
}

/// Classify a forecast day as rainy, cold or normal.
///
/// Forecasts carry no usable humidity, so this is coarser than the comfort
/// classification of observed days.
pub fn classify_forecast(day: &ForecastDay, thresholds: &ForecastThresholds) -> ForecastCategory {
    if is_rainy_forecast(day, thresholds) {
        ForecastCategory::Rainy
    } else if day.temperature_c() <= thresholds.cold_max_c {
        ForecastCategory::Cold
    } else {
        ForecastCategory::Normal
    }
}
