//! Weather Revenue Impact - command-line tool
//!
//! Measures how weather moves daily revenue for a self-service laundry and
//! projects the effect of the coming forecast.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use shared::{classify_conditions, heat_index_with};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_impact_backend::external::{load_forecast, load_predictions, load_sales_csv, load_weather_csv};
use weather_impact_backend::services::{reporting, WeatherImpactReport, WeatherImpactService};
use weather_impact_backend::{AppError, Config};

#[derive(Parser)]
#[command(name = "wri")]
#[command(about = "Weather impact on laundry revenue", long_about = None)]
struct Cli {
    /// Configuration environment (overrides WRI_ENVIRONMENT)
    #[arg(long, global = true)]
    config_env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlation and per-category impact over the sales history
    Analyze {
        #[command(flatten)]
        history: HistoryArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Project the revenue impact of the upcoming forecast
    Forecast {
        #[command(flatten)]
        history: HistoryArgs,
        /// Forecast JSON file
        #[arg(long)]
        forecast: Option<PathBuf>,
        /// Revenue predictions JSON file
        #[arg(long)]
        predictions: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Heat index and comfort category for a single reading
    HeatIndex {
        #[arg(allow_negative_numbers = true)]
        temperature_c: f64,
        humidity_pct: f64,
        /// Precipitation in mm
        #[arg(long, default_value_t = 0.0)]
        precipitation_mm: f64,
    },
}

#[derive(clap::Args)]
struct HistoryArgs {
    /// POS sales CSV export
    #[arg(long)]
    sales: Option<PathBuf>,
    /// Daily weather CSV
    #[arg(long)]
    weather: Option<PathBuf>,
    /// Reference date (defaults to today in the business timezone)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
    Csv,
}

fn run_analysis(config: &Config, service: &WeatherImpactService, args: &HistoryArgs) -> anyhow::Result<WeatherImpactReport> {
    let sales_path = args.sales.as_ref().unwrap_or(&config.data.sales_csv);
    let weather_path = args.weather.as_ref().unwrap_or(&config.data.weather_csv);

    let sales = load_sales_csv(sales_path, &config.business.cashback_policy()?)?;
    for error in &sales.summary.errors {
        tracing::warn!("{}: {}", sales_path.display(), error);
    }
    let weather = load_weather_csv(weather_path)?;
    for error in &weather.summary.errors {
        tracing::warn!("{}: {}", weather_path.display(), error);
    }

    let today = args.as_of.unwrap_or_else(|| service.today());
    Ok(service.analyze(&sales.records, &weather.records, today))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wri=info,weather_impact_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(cli) {
        tracing::error!(code = AppError::code_of(&err), "{:#}", err);
        return Err(err);
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = match &cli.config_env {
        Some(env) => Config::load_for(env)?,
        None => Config::load()?,
    };
    config.validate()?;
    tracing::debug!("Environment: {}", config.environment);

    let service = WeatherImpactService::from_config(&config)?;

    match cli.command {
        Commands::Analyze { history, format } => {
            let report = run_analysis(&config, &service, &history)?;
            let output = match format {
                Format::Json => serde_json::to_string_pretty(&report)?,
                Format::Text => reporting::render_summary(&report),
                Format::Csv => reporting::export_categories_csv(&report)?,
            };
            println!("{}", output);
        }
        Commands::Forecast {
            history,
            forecast,
            predictions,
            format,
        } => {
            let report = run_analysis(&config, &service, &history)?;
            let forecast = load_forecast(forecast.as_ref().unwrap_or(&config.data.forecast_json))?;
            let predictions = match predictions.as_ref().or(config.data.predictions_json.as_ref()) {
                Some(path) => load_predictions(path)?,
                None => HashMap::new(),
            };

            let outlook = service.forecast_outlook(&report, &forecast, &predictions);
            let output = match format {
                Format::Json => serde_json::to_string_pretty(&outlook)?,
                Format::Text => reporting::render_outlook(&outlook),
                Format::Csv => reporting::export_to_csv(&outlook)?,
            };
            println!("{}", output);
        }
        Commands::HeatIndex {
            temperature_c,
            humidity_pct,
            precipitation_mm,
        } => {
            let comfort = &service.thresholds().comfort;
            let heat_index = heat_index_with(temperature_c, humidity_pct, comfort);
            let category = classify_conditions(temperature_c, humidity_pct, precipitation_mm, comfort);
            println!("Heat index: {:.1}C ({})", heat_index, category);
        }
    }

    Ok(())
}
