//! Weatherbit alert and air quality feeds

use reqwest::Client;
use shared::{AirQualityFeed, AirQualityReading, AlertFeed, Coordinates};
use tracing::instrument;

use super::{http_client, read_json};
use crate::config::AlertsConfig;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct WeatherbitClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherbitClient {
    pub fn new(config: &AlertsConfig) -> AppResult<Self> {
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str, location: Coordinates) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("Weatherbit request failed: {}", e)))?;

        read_json(response, "Weatherbit").await
    }

    #[instrument(skip(self))]
    pub async fn alerts(&self, location: Coordinates) -> AppResult<AlertFeed> {
        self.get("alerts", location).await
    }

    /// Latest observation, if the feed has one
    #[instrument(skip(self))]
    pub async fn air_quality(&self, location: Coordinates) -> AppResult<Option<AirQualityReading>> {
        let feed: AirQualityFeed = self.get("current/airquality", location).await?;
        Ok(feed.data.into_iter().next())
    }
}
