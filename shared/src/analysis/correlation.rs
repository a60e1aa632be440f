//! Pearson correlation and OLS slope between weather and revenue

use super::CorrelationConfig;
use crate::models::{CorrelationResult, CorrelationStrength, JoinedDay, VariableRange, WeatherVariable};
use crate::validation::is_valid_reading;

/// Sample statistics of a single-variable linear regression of y on x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionStats {
    pub pearson_r: f64,
    pub slope: f64,
    pub mean_x: f64,
    pub mean_y: f64,
}

/// Pearson r and OLS slope of `ys` on `xs`.
///
/// Degenerate inputs (no variance in either series) yield r = 0, and no
/// variance in `xs` yields slope = 0.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> RegressionStats {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return RegressionStats {
            pearson_r: 0.0,
            slope: 0.0,
            mean_x: 0.0,
            mean_y: 0.0,
        };
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let pearson_r = if sxx > 0.0 && syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };

    RegressionStats {
        pearson_r,
        slope,
        mean_x,
        mean_y,
    }
}

/// Bucket a coefficient into a strength label
pub fn interpret_correlation(r: f64, config: &CorrelationConfig) -> CorrelationStrength {
    if r < -config.strong_r {
        CorrelationStrength::StrongNegative
    } else if r <= -config.weak_r {
        CorrelationStrength::WeakNegative
    } else if r < config.weak_r {
        CorrelationStrength::None
    } else if r <= config.strong_r {
        CorrelationStrength::WeakPositive
    } else {
        CorrelationStrength::StrongPositive
    }
}

/// Correlate one weather variable against daily revenue.
///
/// Days whose reading for `variable` is zero or negative are treated as
/// missing. Fewer than `config.min_days` valid days returns a zeroed result
/// with `has_enough_data = false`.
pub fn correlate(
    days: &[JoinedDay],
    variable: WeatherVariable,
    config: &CorrelationConfig,
) -> CorrelationResult {
    let (xs, ys): (Vec<f64>, Vec<f64>) = days
        .iter()
        .filter(|day| day.revenue.is_finite())
        .filter_map(|day| {
            let x = variable.value(day);
            is_valid_reading(x).then_some((x, day.revenue))
        })
        .unzip();

    if xs.len() < config.min_days {
        return CorrelationResult::insufficient(variable, xs.len(), config.min_days);
    }

    let stats = linear_regression(&xs, &ys);
    let percent_per_unit = if stats.mean_y != 0.0 {
        stats.slope / stats.mean_y * 100.0
    } else {
        0.0
    };

    let variable_range = xs.iter().fold(
        VariableRange {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |range, &x| VariableRange {
            min: range.min.min(x),
            max: range.max.max(x),
        },
    );

    CorrelationResult {
        variable,
        pearson_r: stats.pearson_r,
        slope_per_unit: stats.slope,
        percent_per_unit,
        mean_revenue: stats.mean_y,
        mean_variable: stats.mean_x,
        sample_days: xs.len(),
        has_enough_data: true,
        variable_range,
        interpretation: interpret_correlation(stats.pearson_r, config),
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn days_from(points: &[(f64, f64, f64)]) -> Vec<JoinedDay> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        points
            .iter()
            .enumerate()
            .map(|(i, &(temperature, humidity, revenue))| JoinedDay {
                date: start + Duration::days(i as i64),
                revenue,
                services: 10,
                temperature_c: temperature,
                humidity_pct: humidity,
                precipitation_mm: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_perfect_positive_line() {
        // revenue = 400 + 10 * temperature
        let points: Vec<_> = (0..40)
            .map(|i| {
                let t = 10.0 + i as f64 * 0.5;
                (t, 60.0, 400.0 + 10.0 * t)
            })
            .collect();
        let result = correlate(&days_from(&points), WeatherVariable::Temperature, &CorrelationConfig::default());

        assert!(result.has_enough_data);
        assert_eq!(result.sample_days, 40);
        assert!((result.pearson_r - 1.0).abs() < 1e-12);
        assert!((result.slope_per_unit - 10.0).abs() < 1e-9);
        assert!((result.mean_variable - 19.75).abs() < 1e-9);
        assert!((result.mean_revenue - 597.5).abs() < 1e-9);
        assert!((result.percent_per_unit - 10.0 / 597.5 * 100.0).abs() < 1e-9);
        assert_eq!(result.variable_range, VariableRange { min: 10.0, max: 29.5 });
        assert_eq!(result.interpretation, CorrelationStrength::StrongPositive);
    }

    #[test]
    fn test_negative_humidity_relationship() {
        let points: Vec<_> = (0..35)
            .map(|i| {
                let rh = 40.0 + i as f64;
                (20.0, rh, 1000.0 - 5.0 * rh)
            })
            .collect();
        let result = correlate(&days_from(&points), WeatherVariable::Humidity, &CorrelationConfig::default());

        assert!((result.pearson_r + 1.0).abs() < 1e-12);
        assert!((result.slope_per_unit + 5.0).abs() < 1e-9);
        assert_eq!(result.interpretation, CorrelationStrength::StrongNegative);
    }

    #[test]
    fn test_missing_readings_excluded() {
        let mut points: Vec<_> = (0..30).map(|i| (15.0 + i as f64 * 0.3, 70.0, 500.0 + i as f64)).collect();
        points.push((0.0, 70.0, 99_999.0));
        points.push((-1.0, 0.0, 99_999.0));
        let days = days_from(&points);

        let temperature = correlate(&days, WeatherVariable::Temperature, &CorrelationConfig::default());
        assert_eq!(temperature.sample_days, 30);
        assert!(temperature.variable_range.min > 0.0);

        let humidity = correlate(&days, WeatherVariable::Humidity, &CorrelationConfig::default());
        assert_eq!(humidity.sample_days, 31);
    }

    #[test]
    fn test_insufficient_days() {
        let points: Vec<_> = (0..29).map(|i| (20.0 + i as f64, 70.0, 500.0)).collect();
        let result = correlate(&days_from(&points), WeatherVariable::Temperature, &CorrelationConfig::default());

        assert!(!result.has_enough_data);
        assert_eq!(result.sample_days, 29);
        assert_eq!(result.pearson_r, 0.0);
        assert_eq!(result.slope_per_unit, 0.0);
        assert_eq!(result.mean_variable, 0.0);
        assert!(result.message.unwrap().contains("29 days"));
    }

    #[test]
    fn test_empty_input() {
        let result = correlate(&[], WeatherVariable::Humidity, &CorrelationConfig::default());
        assert!(!result.has_enough_data);
        assert_eq!(result.sample_days, 0);
    }

    #[test]
    fn test_constant_revenue_has_zero_r() {
        let points: Vec<_> = (0..30).map(|i| (10.0 + i as f64, 70.0, 500.0)).collect();
        let result = correlate(&days_from(&points), WeatherVariable::Temperature, &CorrelationConfig::default());

        assert!(result.has_enough_data);
        assert_eq!(result.pearson_r, 0.0);
        assert_eq!(result.slope_per_unit, 0.0);
        assert_eq!(result.interpretation, CorrelationStrength::None);
    }

    #[test]
    fn test_constant_variable_has_zero_slope() {
        let stats = linear_regression(&[20.0; 5], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stats.pearson_r, 0.0);
        assert_eq!(stats.slope, 0.0);
        assert_eq!(stats.mean_x, 20.0);
    }

    #[test]
    fn test_interpretation_thresholds() {
        let config = CorrelationConfig::default();
        assert_eq!(interpret_correlation(-0.45, &config), CorrelationStrength::StrongNegative);
        assert_eq!(interpret_correlation(-0.3, &config), CorrelationStrength::WeakNegative);
        assert_eq!(interpret_correlation(-0.1, &config), CorrelationStrength::WeakNegative);
        assert_eq!(interpret_correlation(-0.09, &config), CorrelationStrength::None);
        assert_eq!(interpret_correlation(0.0, &config), CorrelationStrength::None);
        assert_eq!(interpret_correlation(0.1, &config), CorrelationStrength::WeakPositive);
        assert_eq!(interpret_correlation(0.31, &config), CorrelationStrength::StrongPositive);
    }

    fn series_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((1.0f64..40.0, 0.0f64..3000.0), 0..80)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Pearson r stays within [-1, 1]
        #[test]
        fn prop_pearson_bounded(series in series_strategy()) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = series.into_iter().unzip();
            let stats = linear_regression(&xs, &ys);
            prop_assert!(stats.pearson_r >= -1.0 && stats.pearson_r <= 1.0);
        }

        /// Mirroring the variable around a constant negates r
        #[test]
        fn prop_mirrored_variable_negates_r(series in series_strategy()) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = series.into_iter().unzip();
            let mirrored: Vec<f64> = xs.iter().map(|x| 50.0 - x).collect();

            let original = linear_regression(&xs, &ys);
            let flipped = linear_regression(&mirrored, &ys);
            prop_assert!((original.pearson_r + flipped.pearson_r).abs() < 1e-9);
        }

        /// Correlation over joined days is bounded and never panics
        #[test]
        fn prop_correlate_bounded(series in series_strategy()) {
            let points: Vec<_> = series.iter().map(|&(t, rev)| (t, 60.0, rev)).collect();
            let result = correlate(&days_from(&points), WeatherVariable::Temperature, &CorrelationConfig::default());
            prop_assert!(result.pearson_r >= -1.0 && result.pearson_r <= 1.0);
            prop_assert_eq!(result.has_enough_data, points.len() >= 30);
        }
    }
}
