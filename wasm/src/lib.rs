//! WebAssembly module for Weather Revenue Impact
//!
//! Provides client-side computation for:
//! - Heat index and comfort classification of single readings
//! - Forecast day classification
//! - Full history analysis and forecast projection over JSON inputs
//!
//! Every function uses the default thresholds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub use shared::analysis::*;
pub use shared::models::*;
pub use shared::types::*;

/// Result of [`analyze_history`], also the input of [`project_forecast`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryAnalysis {
    pub generated_for: NaiveDate,
    pub joined_days: usize,
    pub temperature: CorrelationResult,
    pub humidity: CorrelationResult,
    pub categories: CategoryImpactReport,
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

/// Heat index in Celsius
#[wasm_bindgen]
pub fn heat_index_celsius(temperature_c: f64, humidity_pct: f64) -> f64 {
    heat_index(temperature_c, humidity_pct)
}

/// Comfort category key (`rainy`, `muggy`, `hot`, `cold`, `humid`, `mild`)
#[wasm_bindgen]
pub fn classify_comfort_day(temperature_c: f64, humidity_pct: f64, precipitation_mm: f64) -> String {
    classify_conditions(
        temperature_c,
        humidity_pct,
        precipitation_mm,
        &ComfortThresholds::default(),
    )
    .key()
    .to_string()
}

/// Forecast category (`rainy`, `cold`, `normal`)
#[wasm_bindgen]
pub fn classify_forecast_day(temperature_c: f64, precipitation_mm: f64, precip_probability_pct: f64) -> String {
    let day = ForecastDay {
        date: NaiveDate::default(),
        temp_avg_c: Some(temperature_c),
        temp_min_c: temperature_c,
        temp_max_c: temperature_c,
        precipitation_mm,
        precip_probability_pct,
    };
    classify_forecast(&day, &ForecastThresholds::default())
        .to_string()
        .to_lowercase()
}

fn analyze(sales: &[SalesRecord], weather: &[WeatherRecord], today: NaiveDate) -> HistoryAnalysis {
    let thresholds = AnalysisThresholds::default();
    let days = join_days(sales, weather);
    HistoryAnalysis {
        generated_for: today,
        joined_days: days.len(),
        temperature: correlate(&days, WeatherVariable::Temperature, &thresholds.correlation),
        humidity: correlate(&days, WeatherVariable::Humidity, &thresholds.correlation),
        categories: CategoryImpactEngine::new(&thresholds.comfort, &thresholds.windows).analyze(&days, today),
    }
}

/// Analyze sales and weather history given as JSON arrays; `today` is `YYYY-MM-DD`
#[wasm_bindgen]
pub fn analyze_history(sales_json: &str, weather_json: &str, today: &str) -> Result<String, JsValue> {
    let sales: Vec<SalesRecord> =
        serde_json::from_str(sales_json).map_err(|e| js_error("Invalid sales JSON", e))?;
    let weather: Vec<WeatherRecord> =
        serde_json::from_str(weather_json).map_err(|e| js_error("Invalid weather JSON", e))?;
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").map_err(|e| js_error("Invalid date", e))?;

    serde_json::to_string(&analyze(&sales, &weather, today)).map_err(|e| js_error("Serialization failed", e))
}

/// Project forecast days against an [`analyze_history`] result
#[wasm_bindgen]
pub fn project_forecast(forecast_json: &str, report_json: &str) -> Result<String, JsValue> {
    let forecast: Vec<ForecastDay> =
        serde_json::from_str(forecast_json).map_err(|e| js_error("Invalid forecast JSON", e))?;
    let report: HistoryAnalysis =
        serde_json::from_str(report_json).map_err(|e| js_error("Invalid report JSON", e))?;

    let projected = shared::analysis::project_forecast(
        &forecast,
        &report.temperature,
        &report.categories.categories,
        &ForecastThresholds::default(),
    );
    serde_json::to_string(&projected).map_err(|e| js_error("Serialization failed", e))
}
