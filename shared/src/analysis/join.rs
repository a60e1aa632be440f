//! Joining sales and weather into per-day records

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{JoinedDay, SalesRecord, WeatherRecord};

#[derive(Default)]
struct DayTotals {
    revenue: Decimal,
    services: u32,
}

/// Fold sales into per-date totals and attach that date's weather.
///
/// Dates without a weather record are dropped. Output is sorted by date.
pub fn join_days(sales: &[SalesRecord], weather: &[WeatherRecord]) -> Vec<JoinedDay> {
    let weather_by_date: HashMap<NaiveDate, &WeatherRecord> =
        weather.iter().map(|w| (w.date, w)).collect();

    let mut totals: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for record in sales {
        if !weather_by_date.contains_key(&record.date) {
            continue;
        }
        let day = totals.entry(record.date).or_default();
        day.revenue += record.net_revenue;
        day.services += record.counted_services();
    }

    totals
        .into_iter()
        .filter_map(|(date, day)| {
            let reading = weather_by_date.get(&date)?;
            Some(JoinedDay {
                date,
                revenue: day.revenue.to_f64().unwrap_or(0.0),
                services: day.services,
                temperature_c: reading.temperature_c,
                humidity_pct: reading.humidity_pct,
                precipitation_mm: reading.precipitation_mm,
            })
        })
        .collect()
}
