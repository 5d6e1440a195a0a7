//! Text generation through an Ollama-compatible `/api/generate` endpoint

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{http_client, read_json};
use crate::config::LlmConfig;
use crate::error::{AppError, AppResult};

/// Advice generator client
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_ctx: u32,
    num_predict: u32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> AppResult<Self> {
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            config,
        })
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions {
            temperature: self.config.temperature,
            num_ctx: self.config.num_ctx,
            num_predict: self.config.num_predict,
            top_k: self.config.top_k,
            top_p: self.config.top_p,
        }
    }

    /// Free text for `prompt` under the given system instruction
    #[instrument(skip_all, fields(model = %self.config.model))]
    pub async fn generate(&self, system: &str, prompt: &str) -> AppResult<String> {
        self.send(system, prompt, self.options()).await
    }

    /// Deterministic variant used for summaries
    #[instrument(skip_all, fields(model = %self.config.model))]
    pub async fn summarize(&self, system: &str, text: &str) -> AppResult<String> {
        let options = GenerateOptions {
            temperature: 0.0,
            ..self.options()
        };
        self.send(system, text, options).await
    }

    async fn send(&self, system: &str, prompt: &str, options: GenerateOptions) -> AppResult<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            system,
            prompt,
            stream: false,
            options,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Request failed: {}", e)))?;

        let body: GenerateResponse = read_json(response, "Text generator")
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        let text = body.response.trim().to_string();
        if text.is_empty() {
            return Err(AppError::Generation("Empty response".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            model: "m",
            system: "s",
            prompt: "p",
            stream: false,
            options: GenerateOptions {
                temperature: 0.5,
                num_ctx: 4096,
                num_predict: 64,
                top_k: 20,
                top_p: 0.25,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 64);
        assert_eq!(json["options"]["top_p"], 0.25);
    }

    #[test]
    fn test_response_shape() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"model":"m","response":"Wear a jacket.","done":true}"#).unwrap();
        assert_eq!(body.response, "Wear a jacket.");
    }
}
