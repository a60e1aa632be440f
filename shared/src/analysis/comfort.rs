//! Comfort classification of observed days

use super::{heat_index_with, ComfortThresholds};
use crate::models::{ComfortCategory, JoinedDay};

/// Classify a joined day. First matching rule wins; `Mild` is the fallback.
pub fn classify_day(day: &JoinedDay, thresholds: &ComfortThresholds) -> ComfortCategory {
    classify_conditions(
        day.temperature_c,
        day.humidity_pct,
        day.precipitation_mm,
        thresholds,
    )
}

/// Classify raw conditions in priority order:
/// rainy, muggy, hot, cold, humid, mild.
pub fn classify_conditions(
    temperature_c: f64,
    humidity_pct: f64,
    precipitation_mm: f64,
    thresholds: &ComfortThresholds,
) -> ComfortCategory {
    if precipitation_mm > thresholds.rain_mm {
        return ComfortCategory::Rainy;
    }
    if heat_index_with(temperature_c, humidity_pct, thresholds) >= thresholds.muggy_heat_index_c {
        return ComfortCategory::Muggy;
    }
    if temperature_c >= thresholds.hot_min_c {
        return ComfortCategory::Hot;
    }
    if temperature_c <= thresholds.cold_max_c {
        return ComfortCategory::Cold;
    }
    if humidity_pct >= thresholds.humid_min_pct && precipitation_mm > 0.0 {
        return ComfortCategory::Humid;
    }
    ComfortCategory::Mild
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(t: f64, rh: f64, precip: f64) -> ComfortCategory {
        classify_conditions(t, rh, precip, &ComfortThresholds::default())
    }

    #[test]
    fn test_rain_beats_heat() {
        assert_eq!(classify(30.0, 50.0, 10.0), ComfortCategory::Rainy);
        assert_eq!(classify(5.0, 95.0, 5.1), ComfortCategory::Rainy);
    }

    #[test]
    fn test_rain_threshold_is_exclusive() {
        assert_eq!(classify(18.0, 85.0, 5.0), ComfortCategory::Humid);
    }

    #[test]
    fn test_muggy_from_heat_index() {
        assert_eq!(classify(30.0, 60.0, 0.0), ComfortCategory::Muggy);
        // Dry air: guard returns the temperature itself, still >= 27
        assert_eq!(classify(29.0, 20.0, 0.0), ComfortCategory::Muggy);
    }

    #[test]
    fn test_hot_when_feels_like_stays_below_muggy() {
        // Heat index at 27°C / 40% is ~26.86°C
        assert_eq!(classify(27.0, 40.0, 0.0), ComfortCategory::Hot);
        assert_eq!(classify(23.0, 90.0, 0.0), ComfortCategory::Hot);
    }

    #[test]
    fn test_cold_boundary() {
        assert_eq!(classify(10.0, 50.0, 0.0), ComfortCategory::Cold);
        assert_eq!(classify(10.1, 50.0, 0.0), ComfortCategory::Mild);
        // Cold beats humid
        assert_eq!(classify(8.0, 95.0, 2.0), ComfortCategory::Cold);
    }

    #[test]
    fn test_humid_needs_precipitation() {
        assert_eq!(classify(18.0, 85.0, 0.4), ComfortCategory::Humid);
        assert_eq!(classify(18.0, 85.0, 0.0), ComfortCategory::Mild);
        assert_eq!(classify(18.0, 79.9, 3.0), ComfortCategory::Mild);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ComfortThresholds {
            hot_min_c: 20.0,
            ..ComfortThresholds::default()
        };
        assert_eq!(classify_conditions(21.0, 50.0, 0.0, &thresholds), ComfortCategory::Hot);
        assert_eq!(classify(21.0, 50.0, 0.0), ComfortCategory::Mild);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Heavy rain always classifies as rainy, whatever the temperature
        #[test]
        fn prop_rain_has_priority(
            t in -10.0f64..45.0,
            rh in 0.0f64..=100.0,
            precip in 5.001f64..100.0
        ) {
            prop_assert_eq!(classify(t, rh, precip), ComfortCategory::Rainy);
        }

        /// Exactly one category, consistent with the rule that fired
        #[test]
        fn prop_classification_is_consistent(
            t in -10.0f64..45.0,
            rh in 0.0f64..=100.0,
            precip in 0.0f64..20.0
        ) {
            let category = classify(t, rh, precip);
            prop_assert!(ComfortCategory::ALL.contains(&category));
            match category {
                ComfortCategory::Rainy => prop_assert!(precip > 5.0),
                ComfortCategory::Muggy => {
                    prop_assert!(precip <= 5.0);
                    // The guard only lets the heat index exceed the air temperature from 27°C
                    prop_assert!(t >= 27.0);
                }
                ComfortCategory::Hot => prop_assert!(t >= 23.0 && precip <= 5.0),
                ComfortCategory::Cold => prop_assert!(t <= 10.0 && precip <= 5.0),
                ComfortCategory::Humid => {
                    prop_assert!(rh >= 80.0 && precip > 0.0 && precip <= 5.0);
                    prop_assert!(t > 10.0 && t < 23.0);
                }
                ComfortCategory::Mild => {
                    prop_assert!(t > 10.0 && t < 23.0 && precip <= 5.0);
                    prop_assert!(!(rh >= 80.0 && precip > 0.0));
                }
            }
        }
    }
}
