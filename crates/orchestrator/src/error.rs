//! Error types for orchestrator operations.

use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur during orchestration.
///
/// Conversational failures never show up here: model outages degrade to the
/// configured fallback reply and bad tool calls degrade to error results
/// inside the dispatch loop. What remains is infrastructure a transport may
/// want to retry or alert on.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Configuration was invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The scheduling store failed.
    #[error("store error: {0}")]
    Store(#[from] DatabaseError),
}
