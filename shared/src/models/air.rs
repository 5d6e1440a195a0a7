//! Air quality readings

use serde::{Deserialize, Serialize};

/// Current air quality observation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AirQualityReading {
    #[serde(default)]
    pub aqi: Option<f64>,
    #[serde(default)]
    pub pollen_level_grass: Option<f64>,
    #[serde(default)]
    pub pollen_level_tree: Option<f64>,
    #[serde(default)]
    pub pollen_level_weed: Option<f64>,
    #[serde(default)]
    pub mold_level: Option<f64>,
}

impl AirQualityReading {
    /// Worst of the grass, tree and weed pollen levels
    pub fn pollen_level(&self) -> Option<f64> {
        [
            self.pollen_level_grass,
            self.pollen_level_tree,
            self.pollen_level_weed,
        ]
        .into_iter()
        .flatten()
        .reduce(f64::max)
    }
}

/// `{ "data": [...] }` feed document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualityFeed {
    #[serde(default)]
    pub data: Vec<AirQualityReading>,
}

/// Notable air quality categories; unremarkable levels are left out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualitySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollen_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mold_level: Option<String>,
}
