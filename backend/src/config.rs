//! Configuration management for the Wearcast server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WEARCAST__ prefix

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    pub server: ServerConfig,

    /// Gridded forecast (EDR) configuration
    pub forecast: ForecastConfig,

    /// Advice generator configuration
    pub llm: LlmConfig,

    /// Clothing photo classifier configuration
    pub classifier: ClassifierConfig,

    /// Alert and air quality feed configuration
    pub alerts: AlertsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// EDR root, collections are resolved against it
    pub base_url: String,

    /// Deterministic surface collection
    pub surface_collection: String,

    /// Collection publishing apparent temperature and dew point
    pub height_collection: String,

    /// Perturbed ensemble collection for precipitation chance
    pub ensemble_collection: String,

    /// Forecast instants sampled per trip
    pub sample_count: usize,

    /// How far ahead a trip may end
    pub max_forecast_days: i64,

    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Ollama-compatible `/api/generate` endpoint
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub num_ctx: u32,
    pub num_predict: u32,
    pub top_k: u32,
    pub top_p: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("WEARCAST_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::with_defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WEARCAST__ prefix)
            .add_source(
                Environment::with_prefix("WEARCAST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Builder seeded with every default, before files and environment are layered on
    pub fn with_defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("server.port", 10117)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("forecast.base_url", "https://climathon.iblsoft.com/data")?
            .set_default(
                "forecast.surface_collection",
                "gfs-0.5deg/edr/collections/single-layer",
            )?
            .set_default(
                "forecast.height_collection",
                "gfs-0.5deg/edr/collections/height-above-ground_4",
            )?
            .set_default(
                "forecast.ensemble_collection",
                "gefs-0.25deg/edr/collections/single-level_2",
            )?
            .set_default("forecast.sample_count", 24)?
            .set_default("forecast.max_forecast_days", 7)?
            .set_default("forecast.timeout_secs", 5)?
            .set_default("llm.endpoint", "http://127.0.0.1:11434/api/generate")?
            .set_default("llm.model", "nous-hermes2:10.7b")?
            .set_default("llm.timeout_secs", 5)?
            .set_default("llm.temperature", 0.5)?
            .set_default("llm.num_ctx", 4096)?
            .set_default("llm.num_predict", 64)?
            .set_default("llm.top_k", 20)?
            .set_default("llm.top_p", 0.3)?
            .set_default("classifier.endpoint", "http://localhost:5000/upload")?
            .set_default("classifier.timeout_secs", 5)?
            .set_default("alerts.base_url", "https://api.weatherbit.io/v2.0")?
            .set_default("alerts.api_key", "")?
            .set_default("alerts.timeout_secs", 5)
    }
}

impl ForecastConfig {
    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            collection.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        Config::with_defaults("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_deserialize() {
        let config = defaults();
        assert_eq!(config.environment, "test");
        assert_eq!(config.server.port, 10117);
        assert_eq!(config.forecast.sample_count, 24);
        assert_eq!(config.forecast.max_forecast_days, 7);
        assert_eq!(config.llm.num_predict, 64);
        assert!(config.alerts.api_key.is_empty());
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let config: Config = Config::with_defaults("test")
            .unwrap()
            .set_override("forecast.sample_count", 12)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.forecast.sample_count, 12);
    }

    #[test]
    fn test_collection_url_joins_once() {
        let mut forecast = defaults().forecast;
        forecast.base_url = "https://edr.example/data/".to_string();
        assert_eq!(
            forecast.collection_url("/gfs/edr/collections/x"),
            "https://edr.example/data/gfs/edr/collections/x"
        );
    }
}
