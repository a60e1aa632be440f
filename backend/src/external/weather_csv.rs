//! Daily weather history importer

use std::collections::HashSet;
use std::path::Path;

use shared::{validate_weather_record, WeatherRecord};

use super::parsing::{find_column, parse_br_float, parse_date, read_csv};
use super::sales_csv::IngestSummary;
use crate::error::{AppError, AppResult};

const DATE_COLUMNS: &[&str] = &["date", "data", "dia"];
const TEMPERATURE_COLUMNS: &[&str] = &["temperature", "temperature_c", "temp", "temperatura", "temp_media"];
const HUMIDITY_COLUMNS: &[&str] = &["humidity", "humidity_pct", "umidade", "umidade_relativa"];
const PRECIPITATION_COLUMNS: &[&str] = &[
    "precipitation",
    "precipitation_mm",
    "precipitacao",
    "chuva",
    "rain",
    "rain_mm",
];

/// Records and counts from one weather import
#[derive(Debug, Clone)]
pub struct WeatherImport {
    pub records: Vec<WeatherRecord>,
    pub summary: IngestSummary,
}

fn column(headers: &[String], aliases: &[&str]) -> AppResult<usize> {
    find_column(headers, aliases).ok_or_else(|| AppError::MissingColumn(aliases[0].to_string()))
}

/// Parse a daily weather CSV. Only the first row for a date is kept;
/// blank readings are read as 0, which the analysis treats as missing.
pub fn parse_weather_csv(text: &str) -> AppResult<WeatherImport> {
    let (headers, rows) = read_csv(text)?;
    let mut summary = IngestSummary {
        total: rows.len(),
        ..IngestSummary::default()
    };
    if rows.is_empty() {
        return Ok(WeatherImport {
            records: Vec::new(),
            summary,
        });
    }

    let date_col = column(&headers, DATE_COLUMNS)?;
    let temperature_col = column(&headers, TEMPERATURE_COLUMNS)?;
    let humidity_col = column(&headers, HUMIDITY_COLUMNS)?;
    let precipitation_col = column(&headers, PRECIPITATION_COLUMNS)?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let line = i + 2;
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let Some(date) = parse_date(field(date_col)) else {
            summary.skip(format!("Row {}: invalid date '{}'", line, field(date_col)));
            continue;
        };
        let (Some(temperature_c), Some(humidity_pct), Some(precipitation_mm)) = (
            parse_br_float(field(temperature_col)),
            parse_br_float(field(humidity_col)),
            parse_br_float(field(precipitation_col)),
        ) else {
            summary.skip(format!("Row {}: invalid number", line));
            continue;
        };

        let record = WeatherRecord {
            date,
            temperature_c,
            humidity_pct,
            precipitation_mm,
        };
        if let Err(e) = validate_weather_record(&record) {
            summary.skip(format!("Row {}: {}", line, e));
            continue;
        }
        if !seen.insert(date) {
            summary.duplicates += 1;
            continue;
        }
        records.push(record);
    }

    records.sort_by_key(|r| r.date);
    summary.accepted = records.len();
    Ok(WeatherImport { records, summary })
}

/// Read and parse a daily weather CSV from disk
pub fn load_weather_csv(path: &Path) -> AppResult<WeatherImport> {
    let text = std::fs::read_to_string(path)?;
    let import = parse_weather_csv(&text)?;
    tracing::info!(
        "Loaded {} weather days from {} ({} skipped, {} duplicates)",
        import.summary.accepted,
        path.display(),
        import.summary.skipped,
        import.summary.duplicates
    );
    Ok(import)
}
