//! Day/night forecast strip endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use shared::{ContentResponse, DailyForecast};

use super::params::TripParams;
use crate::error::AppResult;
use crate::services::DailyForecastService;
use crate::AppState;

pub async fn get_daily_forecast(
    State(state): State<AppState>,
    Query(params): Query<TripParams>,
) -> AppResult<Json<ContentResponse<Vec<DailyForecast>>>> {
    let location = params.location()?;
    let window = params.window(Utc::now(), state.config.forecast.max_forecast_days)?;

    let service = DailyForecastService::new(state.edr.clone(), state.timezones.clone());
    let days = service.forecast(location, &window).await?;
    Ok(Json(ContentResponse::new(days)))
}
