//! Forecast impact projection
//!
//! Scores forecast days with the already-fitted temperature slope plus a
//! discrete rain bonus. The rain effect is added to the temperature term as
//! if the two were independent; this is a modeling assumption, not a joint
//! two-variable fit.

use super::{classify_forecast, is_rainy_forecast, ForecastThresholds};
use crate::models::{
    CategoryAggregate, CategoryMap, ComfortCategory, CorrelationResult, ForecastDay, ForecastDayImpact,
};
use crate::types::round_one_decimal;

/// Project the revenue impact of one forecast day, in percent.
pub fn project_impact(
    day: &ForecastDay,
    temperature: &CorrelationResult,
    categories: &CategoryMap<CategoryAggregate>,
    thresholds: &ForecastThresholds,
) -> ForecastDayImpact {
    let forecast_temperature_c = day.temperature_c();
    let category = classify_forecast(day, thresholds);

    if !temperature.has_enough_data {
        return ForecastDayImpact {
            date: day.date,
            category,
            forecast_temperature_c,
            projected_impact_pct: None,
            has_data: false,
        };
    }

    let mut impact = (forecast_temperature_c - temperature.mean_variable) * temperature.percent_per_unit;

    let rainy = &categories[ComfortCategory::Rainy];
    if is_rainy_forecast(day, thresholds) && rainy.has_enough_data {
        if let Some(rain_bonus) = rainy.impact_pct {
            impact += rain_bonus;
        }
    }

    ForecastDayImpact {
        date: day.date,
        category,
        forecast_temperature_c,
        projected_impact_pct: Some(round_one_decimal(impact)),
        has_data: true,
    }
}

/// Project every day of a forecast
pub fn project_forecast(
    days: &[ForecastDay],
    temperature: &CorrelationResult,
    categories: &CategoryMap<CategoryAggregate>,
    thresholds: &ForecastThresholds,
) -> Vec<ForecastDayImpact> {
    days.iter()
        .map(|day| project_impact(day, temperature, categories, thresholds))
        .collect()
}
