//! Per-category revenue impact with adaptive lookback windows
//!
//! Rare categories (muggy, cold) often have too few days in the primary
//! window. For those, the same aggregation is repeated over the extended
//! window and kept only if it found strictly more days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{classify_day, ComfortThresholds, WindowConfig};
use crate::models::{CategoryAggregate, CategoryImpactReport, CategoryMap, ComfortCategory, JoinedDay};
use crate::types::DateRange;
use crate::validation::is_valid_reading;

struct DateTotals {
    revenue: f64,
    services: u64,
    temperature_c: f64,
    humidity_pct: f64,
}

/// Aggregates joined days per comfort category within one date window
pub struct WindowAggregator<'a> {
    thresholds: &'a ComfortThresholds,
    window: DateRange,
}

impl<'a> WindowAggregator<'a> {
    pub fn new(thresholds: &'a ComfortThresholds, window: DateRange) -> Self {
        Self { thresholds, window }
    }

    pub fn window(&self) -> DateRange {
        self.window
    }

    /// Single pass: classify, group by date within category, then average
    /// across the distinct dates of each category.
    ///
    /// Days without a temperature reading (zero or negative) are skipped, the
    /// same days the temperature correlation leaves out.
    pub fn aggregate(&self, days: &[JoinedDay]) -> CategoryMap<CategoryAggregate> {
        let mut buckets: CategoryMap<BTreeMap<NaiveDate, DateTotals>> =
            CategoryMap::from_fn(|_| BTreeMap::new());

        let classifiable = days
            .iter()
            .filter(|day| self.window.contains(day.date) && is_valid_reading(day.temperature_c));
        for day in classifiable {
            let category = classify_day(day, self.thresholds);
            let totals = buckets[category].entry(day.date).or_insert_with(|| DateTotals {
                revenue: 0.0,
                services: 0,
                temperature_c: day.temperature_c,
                humidity_pct: day.humidity_pct,
            });
            totals.revenue += day.revenue;
            totals.services += u64::from(day.services);
        }

        buckets.map(summarize)
    }
}

fn summarize(category: ComfortCategory, dates: BTreeMap<NaiveDate, DateTotals>) -> CategoryAggregate {
    if dates.is_empty() {
        return CategoryAggregate::empty(category);
    }

    let n = dates.len() as f64;
    let (revenue, services, temperature, humidity) = dates.values().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(revenue, services, temperature, humidity), day| {
            (
                revenue + day.revenue,
                services + day.services as f64,
                temperature + day.temperature_c,
                humidity + day.humidity_pct,
            )
        },
    );

    CategoryAggregate {
        category,
        avg_revenue_per_day: revenue / n,
        avg_services_per_day: services / n,
        sample_days: dates.len(),
        avg_temperature_c: temperature / n,
        avg_humidity_pct: humidity / n,
        impact_pct: None,
        has_enough_data: false,
        used_extended_window: false,
    }
}

/// Keep the extended-window aggregate only if it saw strictly more days
pub fn merge_if_improved(primary: CategoryAggregate, extended: CategoryAggregate) -> CategoryAggregate {
    if extended.sample_days > primary.sample_days {
        CategoryAggregate {
            used_extended_window: true,
            ..extended
        }
    } else {
        primary
    }
}

/// Aggregates after the adaptive window pass
#[derive(Debug, Clone)]
pub struct WindowedAggregates {
    pub categories: CategoryMap<CategoryAggregate>,
    /// Categories whose primary window was below the sample minimum
    pub extended_window_categories: Vec<ComfortCategory>,
}

/// Primary aggregator, conditional extended aggregator, merge-if-improved
pub struct AdaptiveWindowStrategy<'a> {
    primary: WindowAggregator<'a>,
    extended: WindowAggregator<'a>,
    min_sample_days: usize,
}

impl<'a> AdaptiveWindowStrategy<'a> {
    pub fn new(thresholds: &'a ComfortThresholds, windows: &WindowConfig, today: NaiveDate) -> Self {
        Self {
            primary: WindowAggregator::new(thresholds, DateRange::last_days(today, windows.primary_days)),
            extended: WindowAggregator::new(thresholds, DateRange::last_days(today, windows.extended_days)),
            min_sample_days: windows.min_sample_days,
        }
    }

    pub fn primary_window(&self) -> DateRange {
        self.primary.window()
    }

    pub fn extended_window(&self) -> DateRange {
        self.extended.window()
    }

    pub fn resolve(&self, days: &[JoinedDay]) -> WindowedAggregates {
        let primary = self.primary.aggregate(days);
        let short: Vec<ComfortCategory> = primary
            .iter()
            .filter(|(_, aggregate)| aggregate.sample_days < self.min_sample_days)
            .map(|(category, _)| category)
            .collect();

        if short.is_empty() {
            return WindowedAggregates {
                categories: primary,
                extended_window_categories: short,
            };
        }

        let mut extended = self.extended.aggregate(days);
        let categories = primary.map(|category, aggregate| {
            if short.contains(&category) {
                let candidate = std::mem::replace(&mut extended[category], CategoryAggregate::empty(category));
                merge_if_improved(aggregate, candidate)
            } else {
                aggregate
            }
        });

        WindowedAggregates {
            categories,
            extended_window_categories: short,
        }
    }
}

/// Pick the category impact percentages are measured against.
///
/// `Mild` when it has enough days and nonzero revenue; otherwise the
/// qualifying category with the most sample days (ties go to the earlier
/// category in priority order).
pub fn select_baseline(
    categories: &CategoryMap<CategoryAggregate>,
    min_sample_days: usize,
) -> Option<ComfortCategory> {
    let qualifies =
        |a: &CategoryAggregate| a.sample_days >= min_sample_days && a.avg_revenue_per_day != 0.0;

    if qualifies(&categories[ComfortCategory::Mild]) {
        return Some(ComfortCategory::Mild);
    }

    let mut best: Option<&CategoryAggregate> = None;
    for (_, aggregate) in categories.iter().filter(|&(_, a)| qualifies(a)) {
        if best.map_or(true, |b| aggregate.sample_days > b.sample_days) {
            best = Some(aggregate);
        }
    }
    best.map(|a| a.category)
}

fn extreme_revenue(
    categories: &CategoryMap<CategoryAggregate>,
    better: impl Fn(f64, f64) -> bool,
) -> Option<ComfortCategory> {
    let mut pick: Option<&CategoryAggregate> = None;
    for (_, aggregate) in categories.iter().filter(|(_, a)| a.has_enough_data) {
        if pick.map_or(true, |p| better(aggregate.avg_revenue_per_day, p.avg_revenue_per_day)) {
            pick = Some(aggregate);
        }
    }
    pick.map(|a| a.category)
}

/// Computes the per-category impact report
pub struct CategoryImpactEngine<'a> {
    thresholds: &'a ComfortThresholds,
    windows: &'a WindowConfig,
}

impl<'a> CategoryImpactEngine<'a> {
    pub fn new(thresholds: &'a ComfortThresholds, windows: &'a WindowConfig) -> Self {
        Self { thresholds, windows }
    }

    /// Analyze joined days, with windows ending at `today` in the business's timezone
    pub fn analyze(&self, days: &[JoinedDay], today: NaiveDate) -> CategoryImpactReport {
        let strategy = AdaptiveWindowStrategy::new(self.thresholds, self.windows, today);
        let WindowedAggregates {
            mut categories,
            extended_window_categories,
        } = strategy.resolve(days);

        let min_sample_days = self.windows.min_sample_days;
        for category in ComfortCategory::ALL {
            let aggregate = &mut categories[category];
            aggregate.has_enough_data = aggregate.sample_days >= min_sample_days;
        }

        let baseline = select_baseline(&categories, min_sample_days);
        let baseline_revenue = baseline.map(|b| categories[b].avg_revenue_per_day);
        if let Some(base) = baseline_revenue.filter(|base| *base > 0.0) {
            for category in ComfortCategory::ALL {
                let aggregate = &mut categories[category];
                if aggregate.has_enough_data {
                    aggregate.impact_pct = Some((aggregate.avg_revenue_per_day - base) * 100.0 / base);
                }
            }
        }

        let best = extreme_revenue(&categories, |a, b| a > b);
        let worst = extreme_revenue(&categories, |a, b| a < b);
        let total_days_analyzed = categories.iter().map(|(_, a)| a.sample_days).sum();

        CategoryImpactReport {
            categories,
            baseline,
            best,
            worst,
            total_days_analyzed,
            extended_window_categories,
            primary_window: strategy.primary_window(),
            extended_window: strategy.extended_window(),
        }
    }
}
