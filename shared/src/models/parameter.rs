//! Forecast parameters requested from the gridded weather API

use serde::{Deserialize, Serialize};

/// A single forecast parameter, named as the EDR collections publish it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastParameter {
    Temperature,
    SnowDepth,
    FrozenPrecipitation,
    WindGust,
    Pressure,
    CloudCover,
    Visibility,
    IceCover,
    RelativeHumidity,
    ApparentTemperature,
    DewPoint,
    HainesIndex,
}

impl ForecastParameter {
    pub fn name(&self) -> &'static str {
        match self {
            ForecastParameter::Temperature => "temperature_gnd-surf",
            ForecastParameter::SnowDepth => "snow-depth_gnd-surf",
            ForecastParameter::FrozenPrecipitation => "percent-frozen-precipitation_gnd-surf",
            ForecastParameter::WindGust => "wind-speed-gust_gnd-surf",
            ForecastParameter::Pressure => "pressure_gnd-surf",
            ForecastParameter::CloudCover => "total-cloud-cover_atmosphere",
            ForecastParameter::Visibility => "visibility_gnd-surf",
            ForecastParameter::IceCover => "ice-cover_gnd-surf",
            ForecastParameter::RelativeHumidity => "relative-humidity_0-isoterm",
            ForecastParameter::ApparentTemperature => "apparent-temperature",
            ForecastParameter::DewPoint => "dewpoint-temperature",
            ForecastParameter::HainesIndex => "haines-index_gnd-surf",
        }
    }

    /// Comma-joined parameter list for the `parameter-name` query argument
    pub fn join(parameters: &[ForecastParameter]) -> String {
        parameters
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Surface parameters sampled across a trip
pub const SURFACE_PARAMETERS: [ForecastParameter; 9] = [
    ForecastParameter::Temperature,
    ForecastParameter::SnowDepth,
    ForecastParameter::FrozenPrecipitation,
    ForecastParameter::WindGust,
    ForecastParameter::Pressure,
    ForecastParameter::CloudCover,
    ForecastParameter::Visibility,
    ForecastParameter::IceCover,
    ForecastParameter::RelativeHumidity,
];

/// Parameters published on the height-above-ground collection
pub const HEIGHT_ABOVE_GROUND_PARAMETERS: [ForecastParameter; 2] = [
    ForecastParameter::ApparentTemperature,
    ForecastParameter::DewPoint,
];

/// Parameters needed for the day/night forecast strip
pub const DAILY_PARAMETERS: [ForecastParameter; 2] =
    [ForecastParameter::Temperature, ForecastParameter::CloudCover];

/// Six-hour accumulated precipitation from the perturbed ensemble runs
pub const ENSEMBLE_PRECIPITATION_PARAMETER: &str =
    "total-precipitation_gnd-surf_positively-perturbed_stat:acc/PT6H";
