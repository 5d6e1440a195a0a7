//! Error handling for the Wearcast server
//!
//! Input errors carry their message to the client. Upstream failures are
//! logged in full and answered with an opaque 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::PipelineError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Wrong file: {0}")]
    InvalidUpload(String),

    // External service errors
    #[error("Upstream request failed: {0}")]
    UpstreamFetch(String),

    #[error("Upstream response could not be parsed: {0}")]
    UpstreamParse(String),

    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) | AppError::InvalidUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        if err.is_configuration() {
            AppError::Configuration(err.to_string())
        } else {
            AppError::UpstreamParse(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field));
                AppError::validation(*field, message)
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_detail = match &self {
            AppError::Validation { field, message } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: msg.clone(),
                field: None,
            },
            AppError::InvalidUpload(_) => ErrorDetail {
                code: "WRONG_FILE".to_string(),
                message: "Wrong file".to_string(),
                field: Some("photos".to_string()),
            },
            AppError::UpstreamFetch(_) | AppError::UpstreamParse(_) => ErrorDetail {
                code: "UPSTREAM_ERROR".to_string(),
                message: "Failed to get data from external services".to_string(),
                field: None,
            },
            AppError::Generation(_) => ErrorDetail {
                code: "GENERATION_ERROR".to_string(),
                message: "Text generation is currently unavailable".to_string(),
                field: None,
            },
            AppError::Configuration(_) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message: "Server is misconfigured".to_string(),
                field: None,
            },
            AppError::Internal(_) | AppError::InternalError(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred".to_string(),
                field: None,
            },
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
