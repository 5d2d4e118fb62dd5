//! The ChatModel trait definition.

use async_trait::async_trait;

use crate::error::ModelError;
use crate::tools::ToolDefinition;
use crate::transcript::TranscriptTurn;

/// A trait for models that complete a transcript with one assistant turn.
///
/// Implementations range from scripted mocks to hosted API clients.
/// This trait is object-safe and can be used with `Arc<dyn ChatModel>`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete the transcript with the model's next turn.
    ///
    /// # Arguments
    ///
    /// * `transcript` - The full conversation so far, system turn first.
    /// * `tools` - Function tools the model may call this turn.
    ///
    /// # Returns
    ///
    /// An assistant [`TranscriptTurn`] carrying either text content or one
    /// or more tool calls, or an error if the completion failed.
    async fn complete(
        &self,
        transcript: &[TranscriptTurn],
        tools: &[ToolDefinition],
    ) -> Result<TranscriptTurn, ModelError>;

    /// Get a human-readable name for this model implementation.
    fn name(&self) -> &str;

    /// Check if the model is ready to serve completions.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct FixedReply;

    #[async_trait]
    impl ChatModel for FixedReply {
        async fn complete(
            &self,
            _transcript: &[TranscriptTurn],
            _tools: &[ToolDefinition],
        ) -> Result<TranscriptTurn, ModelError> {
            Ok(TranscriptTurn::assistant("Hello!"))
        }

        fn name(&self) -> &str {
            "FixedReply"
        }
    }

    #[tokio::test]
    async fn test_trait_object_completes_with_default_readiness() {
        let model: Arc<dyn ChatModel> = Arc::new(FixedReply);

        assert_eq!(model.name(), "FixedReply");
        assert!(model.is_ready().await);

        let reply = model
            .complete(&[TranscriptTurn::user("hi")], &[])
            .await
            .unwrap();
        assert_eq!(reply.text(), "Hello!");
        assert!(!reply.has_tool_calls());
    }
}
