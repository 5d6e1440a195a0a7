//! Day/night forecast strip

use serde::{Deserialize, Serialize};

/// One calendar day of the short-range forecast
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Three-letter weekday, `SUN` through `SAT`
    pub name: String,
    pub day_temp: Option<i64>,
    pub night_temp: Option<i64>,
    pub cloud_coverage: Option<i64>,
    /// Probability of precipitation in whole percent
    pub precipitation: Option<i64>,
}

impl DailyForecast {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.day_temp.is_some()
            && self.night_temp.is_some()
            && self.cloud_coverage.is_some()
            && self.precipitation.is_some()
    }
}
