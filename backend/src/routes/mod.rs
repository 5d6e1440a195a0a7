//! Route definitions for the Wearcast API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use shared::{MAX_PHOTOS, MAX_PHOTO_BYTES};

use crate::{handlers, AppState};

/// Room for the text fields next to a full set of photos
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/advice",
            post(handlers::get_advice)
                .layer(DefaultBodyLimit::max(MAX_PHOTOS * MAX_PHOTO_BYTES + FORM_OVERHEAD_BYTES)),
        )
        .route("/weather", post(handlers::get_daily_forecast))
        .route("/alerts", get(handlers::get_alerts))
        .route("/air", get(handlers::get_air_quality))
}
