//! Error types for model operations.

use thiserror::Error;

/// Errors that can occur while completing a transcript.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The client is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request could not reach the model service.
    #[error("network error: {0}")]
    Network(String),

    /// The completion could not be produced.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// A timeout occurred while waiting for the model.
    #[error("model request timed out")]
    Timeout,
}
