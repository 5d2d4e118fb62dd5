//! Failing model implementation - always errors.

use agent_core::{async_trait, ChatModel, ModelError, ToolDefinition, TranscriptTurn};

/// A model whose completions always fail.
///
/// Drives the graceful-degradation paths: callers are expected to turn the
/// error into an apologetic fallback reply instead of surfacing it.
#[derive(Debug, Clone, Copy)]
pub struct FailingModel {
    kind: FailureKind,
}

#[derive(Debug, Clone, Copy)]
enum FailureKind {
    Network,
    Timeout,
}

impl FailingModel {
    /// Create a model that fails with a network error.
    pub fn new() -> Self {
        Self {
            kind: FailureKind::Network,
        }
    }

    /// Create a model that fails with a timeout.
    pub fn timeout() -> Self {
        Self {
            kind: FailureKind::Timeout,
        }
    }
}

impl Default for FailingModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for FailingModel {
    async fn complete(
        &self,
        _transcript: &[TranscriptTurn],
        _tools: &[ToolDefinition],
    ) -> Result<TranscriptTurn, ModelError> {
        Err(match self.kind {
            FailureKind::Network => ModelError::Network("mock model offline".to_string()),
            FailureKind::Timeout => ModelError::Timeout,
        })
    }

    fn name(&self) -> &str {
        "FailingModel"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_fails() {
        let model = FailingModel::new();
        assert!(matches!(
            model.complete(&[], &[]).await,
            Err(ModelError::Network(_))
        ));
        assert!(!model.is_ready().await);

        let model = FailingModel::timeout();
        assert!(matches!(model.complete(&[], &[]).await, Err(ModelError::Timeout)));
    }
}
