//! Configuration management for the weather impact backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with WRI_ prefix
//!    (e.g. `WRI_ANALYSIS__COMFORT__HOT_MIN_C=24`)

use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{validate_percentage, AnalysisThresholds};

use crate::error::{AppError, AppResult};
use crate::external::CashbackPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// The business being analyzed
    pub business: BusinessConfig,

    /// Input file locations
    pub data: DataConfig,

    /// Classification thresholds and windows
    #[serde(default)]
    pub analysis: AnalysisThresholds,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessConfig {
    /// Display name
    pub name: String,

    /// IANA timezone used to decide what "today" is
    pub timezone: String,

    /// Cashback granted on gross sales, in percent
    pub cashback_percent: f64,

    /// First day cashback applies
    pub cashback_start_date: NaiveDate,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// POS sales export (CSV)
    pub sales_csv: PathBuf,

    /// Daily weather history (CSV)
    pub weather_csv: PathBuf,

    /// Daily forecast (JSON)
    pub forecast_json: PathBuf,

    /// Output of the revenue prediction service (JSON)
    #[serde(default)]
    pub predictions_json: Option<PathBuf>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        Self::load_for(&environment)
    }

    /// Load configuration for an explicit environment name
    pub fn load_for(environment: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment)?
            .set_default("business.name", "Lavanderia")?
            .set_default("business.timezone", "America/Sao_Paulo")?
            .set_default("business.cashback_percent", 7.5)?
            .set_default("business.cashback_start_date", "2024-06-01")?
            .set_default("data.sales_csv", "data/sales.csv")?
            .set_default("data.weather_csv", "data/weather.csv")?
            .set_default("data.forecast_json", "data/forecast.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WRI_ prefix)
            .add_source(
                Environment::with_prefix("WRI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Check everything the loader cannot: threshold consistency, timezone, rates
    pub fn validate(&self) -> AppResult<()> {
        self.analysis.validate()?;
        self.business.timezone()?;
        validate_percentage("business.cashback_percent", self.business.cashback_percent)?;
        Ok(())
    }
}

impl BusinessConfig {
    pub fn timezone(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::InvalidTimezone(self.timezone.clone()))
    }

    /// Cashback as a fraction (7.5% -> 0.075)
    pub fn cashback_rate(&self) -> AppResult<Decimal> {
        let percent = Decimal::try_from(self.cashback_percent).map_err(|e| {
            AppError::Configuration(format!("cashback_percent is not a valid decimal: {}", e))
        })?;
        Ok(percent / Decimal::from(100))
    }

    pub fn cashback_policy(&self) -> AppResult<CashbackPolicy> {
        Ok(CashbackPolicy {
            rate: self.cashback_rate()?,
            start_date: self.cashback_start_date,
        })
    }
}
