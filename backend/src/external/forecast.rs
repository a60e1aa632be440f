//! Forecast and revenue prediction feeds (JSON)

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use shared::{validate_forecast_day, ForecastDay, RevenuePrediction};

use crate::error::AppResult;

/// Accepts either a bare array or `{"days": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum Feed<T> {
    Bare(Vec<T>),
    Wrapped { days: Vec<T> },
}

impl<T> Feed<T> {
    fn into_days(self) -> Vec<T> {
        match self {
            Feed::Bare(days) | Feed::Wrapped { days } => days,
        }
    }
}

/// Parse and validate a daily forecast, sorted by date
pub fn parse_forecast_json(text: &str) -> AppResult<Vec<ForecastDay>> {
    let feed: Feed<ForecastDay> = serde_json::from_str(text)?;
    let mut days = feed.into_days();
    for day in &days {
        validate_forecast_day(day)?;
    }
    days.sort_by_key(|d| d.date);
    Ok(days)
}

pub fn load_forecast(path: &Path) -> AppResult<Vec<ForecastDay>> {
    let days = parse_forecast_json(&std::fs::read_to_string(path)?)?;
    tracing::info!("Loaded {} forecast days from {}", days.len(), path.display());
    Ok(days)
}

/// Parse revenue predictions keyed by date; later entries win
pub fn parse_predictions_json(text: &str) -> AppResult<HashMap<NaiveDate, RevenuePrediction>> {
    let feed: Feed<RevenuePrediction> = serde_json::from_str(text)?;
    Ok(feed.into_days().into_iter().map(|p| (p.date, p)).collect())
}

pub fn load_predictions(path: &Path) -> AppResult<HashMap<NaiveDate, RevenuePrediction>> {
    let predictions = parse_predictions_json(&std::fs::read_to_string(path)?)?;
    tracing::info!("Loaded {} revenue predictions from {}", predictions.len(), path.display());
    Ok(predictions)
}
