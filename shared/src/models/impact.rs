//! Category impact and forecast impact models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CategoryMap, ComfortCategory, ForecastCategory};
use crate::types::DateRange;

/// Revenue and service averages for one comfort category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAggregate {
    pub category: ComfortCategory,
    pub avg_revenue_per_day: f64,
    pub avg_services_per_day: f64,
    /// Distinct dates that fell into this category
    pub sample_days: usize,
    pub avg_temperature_c: f64,
    pub avg_humidity_pct: f64,
    /// Revenue difference against the baseline category, in percent
    pub impact_pct: Option<f64>,
    pub has_enough_data: bool,
    pub used_extended_window: bool,
}

impl CategoryAggregate {
    pub fn empty(category: ComfortCategory) -> Self {
        Self {
            category,
            avg_revenue_per_day: 0.0,
            avg_services_per_day: 0.0,
            sample_days: 0,
            avg_temperature_c: 0.0,
            avg_humidity_pct: 0.0,
            impact_pct: None,
            has_enough_data: false,
            used_extended_window: false,
        }
    }
}

impl Default for CategoryMap<CategoryAggregate> {
    fn default() -> Self {
        CategoryMap::from_fn(CategoryAggregate::empty)
    }
}

/// Per-category revenue impact over the adaptive windows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryImpactReport {
    pub categories: CategoryMap<CategoryAggregate>,
    /// Category the impact percentages are measured against
    pub baseline: Option<ComfortCategory>,
    /// Highest average revenue among categories with enough data
    pub best: Option<ComfortCategory>,
    /// Lowest average revenue among categories with enough data
    pub worst: Option<ComfortCategory>,
    pub total_days_analyzed: usize,
    /// Categories whose primary window fell short of the sample minimum
    pub extended_window_categories: Vec<ComfortCategory>,
    pub primary_window: DateRange,
    pub extended_window: DateRange,
}

/// Projected revenue impact for one forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDayImpact {
    pub date: NaiveDate,
    pub category: ForecastCategory,
    pub forecast_temperature_c: f64,
    /// Rounded to one decimal; `None` when the temperature model lacks data
    pub projected_impact_pct: Option<f64>,
    pub has_data: bool,
}
