//! Heat index ("feels like") temperature

use super::ComfortThresholds;

/// Heat index in Celsius with the default guard (27°C / 40% RH)
pub fn heat_index(temperature_c: f64, humidity_pct: f64) -> f64 {
    heat_index_with(temperature_c, humidity_pct, &ComfortThresholds::default())
}

/// Heat index in Celsius using the Rothfusz regression.
///
/// Below the guard temperature or humidity the regression is not valid and
/// the air temperature is returned unchanged.
pub fn heat_index_with(temperature_c: f64, humidity_pct: f64, thresholds: &ComfortThresholds) -> f64 {
    if temperature_c < thresholds.heat_index_min_temp_c
        || humidity_pct < thresholds.heat_index_min_humidity_pct
    {
        return temperature_c;
    }

    let t = celsius_to_fahrenheit(temperature_c);
    let rh = humidity_pct;

    let hi_f = -42.379 + 2.04901523 * t + 10.14333127 * rh
        - 0.22475541 * t * rh
        - 0.00683783 * t * t
        - 0.05481717 * rh * rh
        + 0.00122874 * t * t * rh
        + 0.00085282 * t * rh * rh
        - 0.00000199 * t * t * rh * rh;

    fahrenheit_to_celsius(hi_f)
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}
