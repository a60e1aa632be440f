//! Report rendering and data export
//! Text summaries for the terminal and CSV export of the category table

use serde::Serialize;
use shared::{ComfortCategory, CorrelationResult};

use super::weather_impact::{ForecastOutlook, WeatherImpactReport};
use crate::error::{AppError, AppResult};

/// One row of the category CSV export
#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub category: ComfortCategory,
    pub sample_days: usize,
    pub avg_revenue_per_day: f64,
    pub avg_services_per_day: f64,
    pub avg_temperature_c: f64,
    pub avg_humidity_pct: f64,
    pub impact_pct: Option<f64>,
    pub has_enough_data: bool,
    pub used_extended_window: bool,
    pub is_baseline: bool,
}

/// Flatten the category table in priority order
pub fn category_rows(report: &WeatherImpactReport) -> Vec<CategoryRow> {
    let baseline = report.categories.baseline;
    report
        .categories
        .categories
        .iter()
        .map(|(category, a)| CategoryRow {
            category,
            sample_days: a.sample_days,
            avg_revenue_per_day: a.avg_revenue_per_day,
            avg_services_per_day: a.avg_services_per_day,
            avg_temperature_c: a.avg_temperature_c,
            avg_humidity_pct: a.avg_humidity_pct,
            impact_pct: a.impact_pct,
            has_enough_data: a.has_enough_data,
            used_extended_window: a.used_extended_window,
            is_baseline: baseline == Some(category),
        })
        .collect()
}

/// Export data to CSV format
pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
}

pub fn export_categories_csv(report: &WeatherImpactReport) -> AppResult<String> {
    export_to_csv(&category_rows(report))
}

fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.1}%", v),
        None => "n/a".to_string(),
    }
}

fn correlation_line(result: &CorrelationResult) -> String {
    if !result.has_enough_data {
        return format!("  {}: {}", result.variable, result.message.as_deref().unwrap_or("no data"));
    }
    format!(
        "  {}: r = {:.3} ({}), {:+.2}% revenue per {} over {} days ({:.1} to {:.1})",
        result.variable,
        result.pearson_r,
        result.interpretation,
        result.percent_per_unit,
        result.variable.unit(),
        result.sample_days,
        result.variable_range.min,
        result.variable_range.max
    )
}

/// Human-readable summary of a historical analysis
pub fn render_summary(report: &WeatherImpactReport) -> String {
    let categories = &report.categories;
    let mut lines = vec![
        format!("Weather impact as of {}", report.generated_for),
        format!(
            "{} days with sales and weather; windows {} to {} (extended from {})",
            report.joined_days,
            categories.primary_window.start,
            categories.primary_window.end,
            categories.extended_window.start
        ),
        String::new(),
        "Correlation".to_string(),
        correlation_line(&report.temperature),
        correlation_line(&report.humidity),
        String::new(),
        format!(
            "Categories (baseline: {})",
            categories
                .baseline
                .map_or_else(|| "none".to_string(), |b| b.to_string())
        ),
    ];

    for row in category_rows(report) {
        let marker = if row.is_baseline { "*" } else { " " };
        let window = if row.used_extended_window { " [extended]" } else { "" };
        lines.push(format!(
            " {}{:<6} {:>4} days  {:>9.2}/day  {:>5.1} services  {:>7}{}",
            marker,
            row.category.key(),
            row.sample_days,
            row.avg_revenue_per_day,
            row.avg_services_per_day,
            format_pct(row.impact_pct),
            window
        ));
    }

    if let (Some(best), Some(worst)) = (categories.best, categories.worst) {
        lines.push(format!("Best: {}, worst: {}", best, worst));
    }

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        lines.extend(report.warnings.iter().map(|w| format!("  - {}", w)));
    }

    lines.join("\n")
}

/// Human-readable forecast table
pub fn render_outlook(outlook: &[ForecastOutlook]) -> String {
    let mut lines = vec!["Date        Category  Temp    Projected  Service".to_string()];
    for day in outlook {
        lines.push(format!(
            "{}  {:<8}  {:>5.1}C  {:>9}  {:>7}",
            day.date,
            day.category.to_string(),
            day.forecast_temperature,
            format_pct(day.projected_impact_pct),
            format_pct(day.service_weather_impact_pct)
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::WeatherImpactService;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use shared::{AnalysisThresholds, ForecastCategory, SalesRecord, WeatherRecord};

    fn report() -> WeatherImpactReport {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let (sales, weather): (Vec<_>, Vec<_>) = (1..=10)
            .map(|i| {
                let date = today - Duration::days(i);
                (
                    SalesRecord::new(date, Decimal::from(300), 3),
                    WeatherRecord {
                        date,
                        temperature_c: 18.0,
                        humidity_pct: 55.0,
                        precipitation_mm: 0.0,
                    },
                )
            })
            .unzip();
        WeatherImpactService::new(AnalysisThresholds::default(), chrono_tz::UTC)
            .unwrap()
            .analyze(&sales, &weather, today)
    }

    #[test]
    fn test_category_rows_in_priority_order() {
        let rows = category_rows(&report());
        let order: Vec<_> = rows.iter().map(|r| r.category).collect();
        assert_eq!(order, ComfortCategory::ALL.to_vec());
        assert!(rows[5].is_baseline);
        assert_eq!(rows[5].impact_pct, Some(0.0));
    }

    #[test]
    fn test_export_categories_csv() {
        let csv = export_categories_csv(&report()).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("category,sample_days,avg_revenue_per_day"));
        assert_eq!(lines.count(), 6);
        assert!(csv.contains("mild,10,300.0"));
    }

    #[test]
    fn test_render_summary_mentions_baseline_and_warnings() {
        let text = render_summary(&report());
        assert!(text.contains("baseline: Mild"));
        assert!(text.contains("Warnings"));
        assert!(text.contains("+0.0%"));
    }

    #[test]
    fn test_render_outlook() {
        let outlook = vec![ForecastOutlook {
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            category: ForecastCategory::Rainy,
            forecast_temperature: 19.0,
            projected_impact_pct: Some(6.2),
            has_data: true,
            service_weather_impact_pct: None,
        }];
        let text = render_outlook(&outlook);
        assert!(text.contains("2025-04-01"));
        assert!(text.contains("+6.2%"));
        assert!(text.contains("n/a"));
    }
}
