//! Common types used across the platform

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days`-day lookback ending at `today` (inclusive on both ends)
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today - Duration::days(i64::from(days)),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Round to one decimal place, the precision used for displayed percentages
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
