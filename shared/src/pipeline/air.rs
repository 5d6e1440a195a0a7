//! Air quality categories

use super::bucket::{BucketTable, AIR_QUALITY_INDEX, MOLD, POLLEN};
use crate::models::{AirQualityReading, AirQualitySummary};

/// Keep only the categories worth warning about
pub fn summarize_air_quality(reading: &AirQualityReading) -> AirQualitySummary {
    let label = |value: Option<f64>, table: &BucketTable| {
        value.and_then(|v| table.classify(v)).map(str::to_string)
    };

    AirQualitySummary {
        aqi: label(reading.aqi, &AIR_QUALITY_INDEX),
        pollen_level: label(reading.pollen_level(), &POLLEN),
        mold_level: label(reading.mold_level, &MOLD),
    }
}
