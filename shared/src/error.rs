//! Errors raised by the reduction pipeline

use thiserror::Error;

/// Failures that can occur while reducing forecast data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Sample count must be at least 1")]
    InvalidSampleCount,

    #[error("Forecast response is missing parameter {0}")]
    MissingParameter(String),

    #[error("Malformed coverage: {0}")]
    MalformedCoverage(String),
}

impl PipelineError {
    /// Whether the error comes from server configuration rather than upstream data
    pub fn is_configuration(&self) -> bool {
        matches!(self, PipelineError::InvalidSampleCount)
    }
}
