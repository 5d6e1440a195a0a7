//! Hazard alerts endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use shared::{ends_today, Alert, ContentResponse};

use super::params::HazardParams;
use crate::error::AppResult;
use crate::services::AlertService;
use crate::AppState;

/// Alerts only apply to trips ending today; anything else gets an empty list
pub async fn get_alerts(
    State(state): State<AppState>,
    Query(params): Query<HazardParams>,
) -> AppResult<Json<ContentResponse<Vec<Alert>>>> {
    let location = params.location()?;
    let now = Utc::now();
    if !ends_today(params.end()?, now) {
        return Ok(Json(ContentResponse::new(Vec::new())));
    }

    let service = AlertService::new(state.edr.clone(), state.weatherbit.clone(), state.llm.clone());
    let alerts = service.alerts(location, now).await?;
    Ok(Json(ContentResponse::new(alerts)))
}
