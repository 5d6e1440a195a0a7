//! Air quality categories for same-day trips

use shared::{summarize_air_quality, AirQualitySummary, Coordinates};

use crate::error::AppResult;
use crate::external::WeatherbitClient;

#[derive(Clone)]
pub struct AirService {
    weatherbit: WeatherbitClient,
}

impl AirService {
    pub fn new(weatherbit: WeatherbitClient) -> Self {
        Self { weatherbit }
    }

    pub async fn air_quality(&self, location: Coordinates) -> AppResult<AirQualitySummary> {
        let reading = self.weatherbit.air_quality(location).await?;
        Ok(reading
            .map(|reading| summarize_air_quality(&reading))
            .unwrap_or_default())
    }
}
