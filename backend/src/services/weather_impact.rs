//! Weather impact service
//!
//! Joins sales with weather, fits the temperature and humidity models,
//! computes the per-category report and scores forecasts against it.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shared::{
    correlate, join_days, project_forecast, AnalysisThresholds, CategoryImpactEngine,
    CategoryImpactReport, ComfortCategory, CorrelationResult, ForecastCategory, ForecastDay,
    RevenuePrediction, SalesRecord, WeatherRecord, WeatherVariable,
};

use crate::config::Config;
use crate::error::AppResult;

/// Weather impact service
#[derive(Debug, Clone)]
pub struct WeatherImpactService {
    thresholds: AnalysisThresholds,
    timezone: Tz,
}

/// Full historical analysis for one reference date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherImpactReport {
    pub generated_for: NaiveDate,
    /// Days with both sales and weather
    pub joined_days: usize,
    pub temperature: CorrelationResult,
    pub humidity: CorrelationResult,
    pub categories: CategoryImpactReport,
    pub warnings: Vec<String>,
}

/// One forecast day with its projected impact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastOutlook {
    pub date: NaiveDate,
    pub category: ForecastCategory,
    pub forecast_temperature: f64,
    pub projected_impact_pct: Option<f64>,
    pub has_data: bool,
    /// Impact reported by the revenue prediction service for the same date
    pub service_weather_impact_pct: Option<f64>,
}

impl WeatherImpactService {
    /// Create a service; thresholds are validated here
    pub fn new(thresholds: AnalysisThresholds, timezone: Tz) -> AppResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            timezone,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.analysis.clone(), config.business.timezone()?)
    }

    pub fn thresholds(&self) -> &AnalysisThresholds {
        &self.thresholds
    }

    /// Current calendar date in the business's timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Run the historical analysis with windows ending at `today`
    pub fn analyze(
        &self,
        sales: &[SalesRecord],
        weather: &[WeatherRecord],
        today: NaiveDate,
    ) -> WeatherImpactReport {
        let days = join_days(sales, weather);
        tracing::info!(
            "Analyzing {} joined days ({} sales records, {} weather days) as of {}",
            days.len(),
            sales.len(),
            weather.len(),
            today
        );

        let temperature = correlate(&days, WeatherVariable::Temperature, &self.thresholds.correlation);
        let humidity = correlate(&days, WeatherVariable::Humidity, &self.thresholds.correlation);
        let categories =
            CategoryImpactEngine::new(&self.thresholds.comfort, &self.thresholds.windows).analyze(&days, today);

        let warnings = self.collect_warnings(&[&temperature, &humidity], &categories);
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        tracing::debug!(
            "Temperature r={:.3}, humidity r={:.3}, baseline={:?}",
            temperature.pearson_r,
            humidity.pearson_r,
            categories.baseline
        );

        WeatherImpactReport {
            generated_for: today,
            joined_days: days.len(),
            temperature,
            humidity,
            categories,
            warnings,
        }
    }

    /// Project forecast days against a finished report
    pub fn forecast_outlook(
        &self,
        report: &WeatherImpactReport,
        forecast: &[ForecastDay],
        predictions: &HashMap<NaiveDate, RevenuePrediction>,
    ) -> Vec<ForecastOutlook> {
        if !report.temperature.has_enough_data {
            tracing::warn!("Temperature model has too little data; forecast days are unscored");
        }

        project_forecast(
            forecast,
            &report.temperature,
            &report.categories.categories,
            &self.thresholds.forecast,
        )
        .into_iter()
        .map(|day| ForecastOutlook {
            date: day.date,
            category: day.category,
            forecast_temperature: day.forecast_temperature_c,
            projected_impact_pct: day.projected_impact_pct,
            has_data: day.has_data,
            service_weather_impact_pct: predictions.get(&day.date).map(|p| p.weather_impact_pct),
        })
        .collect()
    }

    fn collect_warnings(
        &self,
        correlations: &[&CorrelationResult],
        report: &CategoryImpactReport,
    ) -> Vec<String> {
        let mut warnings: Vec<String> = correlations
            .iter()
            .filter_map(|c| c.message.clone())
            .collect();

        for category in &report.extended_window_categories {
            let aggregate = &report.categories[*category];
            if aggregate.used_extended_window {
                warnings.push(format!(
                    "{} days: using the {}-day window ({} days)",
                    category, self.thresholds.windows.extended_days, aggregate.sample_days
                ));
            }
        }

        let min = self.thresholds.windows.min_sample_days;
        for (category, aggregate) in report.categories.iter() {
            if !aggregate.has_enough_data {
                warnings.push(format!(
                    "{} days: only {} in range, need at least {}",
                    category, aggregate.sample_days, min
                ));
            }
        }

        match report.baseline {
            Some(ComfortCategory::Mild) => {}
            Some(baseline) => warnings.push(format!(
                "Not enough mild days; impacts are measured against {} days",
                baseline
            )),
            None => warnings.push("No category has enough days to serve as a baseline".to_string()),
        }

        warnings
    }
}
