//! Unit conversions applied when formatting forecast values

const KELVIN_OFFSET: f64 = 273.15;

/// Whole degrees Celsius, floored. Values already reported in Celsius pass through.
pub fn temperature_celsius(value: f64, unit: Option<&str>) -> i64 {
    let celsius = match unit {
        Some("°C" | "degC" | "Cel" | "C") => value,
        _ => value - KELVIN_OFFSET,
    };
    // Floor of the f64 difference can land one below on exact conversions
    let rounded = (celsius * 1e6).round() / 1e6;
    rounded.floor() as i64
}

/// Pressure in hectopascals; the forecast API reports surface pressure in pascals
pub fn to_hectopascal(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some("hPa" | "mbar" | "mb") => value,
        Some("kPa") => value * 10.0,
        _ => value / 100.0,
    }
}
