//! Input feeds: POS sales export, weather history, forecast and predictions

pub mod forecast;
pub mod parsing;
pub mod sales_csv;
pub mod weather_csv;

pub use forecast::{load_forecast, load_predictions, parse_forecast_json, parse_predictions_json};
pub use sales_csv::{load_sales_csv, parse_sales_csv, CashbackPolicy, IngestSummary, SalesImport};
pub use weather_csv::{load_weather_csv, parse_weather_csv, WeatherImport};
