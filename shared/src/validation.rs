//! Validation utilities for weather, forecast and threshold inputs

use thiserror::Error;

use crate::models::{ForecastDay, WeatherRecord};

/// Reason an input record or threshold set was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{0}")]
    Inconsistent(String),
}

// ============================================================================
// Field Validations
// ============================================================================

/// Validate a value lies in `min..=max`
pub fn validate_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate a percentage (0-100)
pub fn validate_percentage(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_range(field, value, 0.0, 100.0)
}

/// Validate a non-negative amount such as precipitation
pub fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_range(field, value, 0.0, f64::MAX)
}

/// Plausible surface air temperature range in Celsius
pub fn validate_temperature(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_range(field, value, -60.0, 60.0)
}

/// Zero and negative readings are the "missing" sentinel for correlation input
pub fn is_valid_reading(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// ============================================================================
// Record Validations
// ============================================================================

/// Validate an observed weather record
pub fn validate_weather_record(record: &WeatherRecord) -> Result<(), ValidationError> {
    validate_temperature("temperature_c", record.temperature_c)?;
    validate_percentage("humidity_pct", record.humidity_pct)?;
    validate_non_negative("precipitation_mm", record.precipitation_mm)?;
    Ok(())
}

/// Validate a forecast day
pub fn validate_forecast_day(day: &ForecastDay) -> Result<(), ValidationError> {
    if let Some(avg) = day.temp_avg_c {
        validate_temperature("temp_avg_c", avg)?;
    }
    validate_temperature("temp_min_c", day.temp_min_c)?;
    validate_temperature("temp_max_c", day.temp_max_c)?;
    if day.temp_min_c > day.temp_max_c {
        return Err(ValidationError::Inconsistent(format!(
            "temp_min_c ({}) is above temp_max_c ({}) on {}",
            day.temp_min_c, day.temp_max_c, day.date
        )));
    }
    validate_non_negative("precipitation_mm", day.precipitation_mm)?;
    validate_percentage("precip_probability_pct", day.precip_probability_pct)?;
    Ok(())
}
