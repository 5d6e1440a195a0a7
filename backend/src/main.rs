//! Wearcast - Backend Server
//!
//! Summarises the forecast for a trip and asks a language model what to wear.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod prompts;
mod routes;
mod services;
#[cfg(test)]
mod test_support;

pub use config::Config;

use external::{ClassifierClient, EdrClient, LlmClient, TimezoneLookup, WeatherbitClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub edr: EdrClient,
    pub llm: LlmClient,
    pub classifier: ClassifierClient,
    pub weatherbit: WeatherbitClient,
    pub timezones: TimezoneLookup,
}

impl AppState {
    pub fn new(config: Config) -> error::AppResult<Self> {
        Ok(Self {
            edr: EdrClient::new(config.forecast.clone())?,
            llm: LlmClient::new(config.llm.clone())?,
            classifier: ClassifierClient::new(&config.classifier)?,
            weatherbit: WeatherbitClient::new(&config.alerts)?,
            timezones: TimezoneLookup::new(),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wearcast_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Wearcast server");
    tracing::info!("Environment: {}", config.environment);
    if config.alerts.api_key.is_empty() {
        tracing::warn!("No alert feed API key configured, /alerts and /air will fail upstream");
    }

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));

    let state = AppState::new(config)?;
    let app = create_app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Wearcast API v1"
}
