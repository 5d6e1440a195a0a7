//! Air quality endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use shared::{ends_today, AirQualitySummary};

use super::params::HazardParams;
use crate::error::AppResult;
use crate::services::AirService;
use crate::AppState;

pub async fn get_air_quality(
    State(state): State<AppState>,
    Query(params): Query<HazardParams>,
) -> AppResult<Json<AirQualitySummary>> {
    let location = params.location()?;
    if !ends_today(params.end()?, Utc::now()) {
        return Ok(Json(AirQualitySummary::default()));
    }

    let summary = AirService::new(state.weatherbit.clone())
        .air_quality(location)
        .await?;
    Ok(Json(summary))
}
