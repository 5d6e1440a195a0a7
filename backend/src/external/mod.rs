//! External API integrations

pub mod classifier;
pub mod edr;
pub mod llm;
pub mod timezone;
pub mod weatherbit;

pub use classifier::ClassifierClient;
pub use edr::EdrClient;
pub use llm::LlmClient;
pub use timezone::TimezoneLookup;
pub use weatherbit::WeatherbitClient;

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// HTTP client with the per-call timeout every outbound request carries
pub(crate) fn http_client(timeout_secs: u64) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Read a successful response body as JSON, keeping transport and decoding failures apart
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, service: &str) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::UpstreamFetch(format!(
            "{} returned {}: {}",
            service, status, body
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::UpstreamFetch(format!("{} body could not be read: {}", service, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::UpstreamParse(format!("Failed to parse {} response: {}", service, e)))
}
