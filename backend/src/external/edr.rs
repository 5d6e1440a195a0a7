//! OGC EDR position queries against the gridded forecast service
//!
//! Responses are CoverageJSON; decoding lives in `shared::models::coverage`.

use chrono::{DateTime, Utc};
use reqwest::Client;
use shared::{
    iso_timestamp, Coordinates, Coverage, CoverageCollection, EnsembleReading, ForecastParameter,
    ENSEMBLE_PRECIPITATION_PARAMETER,
};
use tracing::instrument;

use super::{http_client, read_json};
use crate::config::ForecastConfig;
use crate::error::{AppError, AppResult};

/// EDR forecast client
#[derive(Clone)]
pub struct EdrClient {
    client: Client,
    config: ForecastConfig,
}

/// Which collection a position query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Surface,
    HeightAboveGround,
    Ensemble,
}

impl EdrClient {
    pub fn new(config: ForecastConfig) -> AppResult<Self> {
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
        })
    }

    fn position_url(&self, collection: Collection) -> String {
        let path = match collection {
            Collection::Surface => &self.config.surface_collection,
            Collection::HeightAboveGround => &self.config.height_collection,
            Collection::Ensemble => &self.config.ensemble_collection,
        };
        format!("{}/position", self.config.collection_url(path))
    }

    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        collection: Collection,
        location: Coordinates,
        parameters: &str,
        datetime: &str,
    ) -> AppResult<T> {
        let response = self
            .client
            .get(self.position_url(collection))
            .query(&[
                ("coords", location.wkt_point().as_str()),
                ("parameter-name", parameters),
                ("datetime", datetime),
                ("f", "CoverageJSON"),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("Forecast request failed: {}", e)))?;

        read_json(response, "Forecast API").await
    }

    /// Values of `parameters` at each of `instants`
    #[instrument(skip(self, instants), fields(instants = instants.len()))]
    pub async fn position_series(
        &self,
        collection: Collection,
        location: Coordinates,
        parameters: &[ForecastParameter],
        instants: &[DateTime<Utc>],
    ) -> AppResult<CoverageCollection> {
        let datetime = instants
            .iter()
            .map(|instant| iso_timestamp(*instant))
            .collect::<Vec<_>>()
            .join(",");

        let collection: CoverageCollection = self
            .query(collection, location, &ForecastParameter::join(parameters), &datetime)
            .await?;
        collection.require(parameters)?;
        Ok(collection)
    }

    /// Per-member six-hour precipitation over `[from, to]`
    #[instrument(skip(self))]
    pub async fn ensemble_precipitation(
        &self,
        location: Coordinates,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<EnsembleReading>> {
        let datetime = format!("{}/{}", iso_timestamp(from), iso_timestamp(to));
        let collection: CoverageCollection = self
            .query(
                Collection::Ensemble,
                location,
                ENSEMBLE_PRECIPITATION_PARAMETER,
                &datetime,
            )
            .await?;
        Ok(collection.ensemble_readings(ENSEMBLE_PRECIPITATION_PARAMETER)?)
    }

    /// Current surface value of a single parameter
    #[instrument(skip(self))]
    pub async fn current_value(
        &self,
        location: Coordinates,
        parameter: ForecastParameter,
        now: DateTime<Utc>,
    ) -> AppResult<Option<f64>> {
        let coverage: Coverage = self
            .query(
                Collection::Surface,
                location,
                parameter.name(),
                &iso_timestamp(now),
            )
            .await?;
        Ok(coverage.value_of(parameter.name()))
    }
}
