//! Echo model implementation - replies with the latest user turn.

use agent_core::{async_trait, ChatModel, ModelError, ToolDefinition, TranscriptTurn};

/// A model that replies with the text of the latest user turn.
///
/// Useful for checking conversation wiring without any AI processing.
/// Never calls tools.
#[derive(Debug, Clone, Default)]
pub struct EchoModel {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoModel {
    /// Create a new EchoModel with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoModel with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_model::EchoModel;
    ///
    /// let model = EchoModel::with_prefix("Echo: ");
    /// // Will reply with "Echo: <latest user turn>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl ChatModel for EchoModel {
    async fn complete(
        &self,
        transcript: &[TranscriptTurn],
        _tools: &[ToolDefinition],
    ) -> Result<TranscriptTurn, ModelError> {
        let latest_user = transcript
            .iter()
            .rev()
            .find(|turn| turn.role == "user")
            .map(TranscriptTurn::text)
            .unwrap_or_default();

        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, latest_user),
            None => latest_user.to_string(),
        };

        Ok(TranscriptTurn::assistant(reply))
    }

    fn name(&self) -> &str {
        "EchoModel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_latest_user_turn() {
        let model = EchoModel::new();
        let transcript = vec![
            TranscriptTurn::system("You are a booking assistant."),
            TranscriptTurn::user("Hi there"),
            TranscriptTurn::assistant("Hello!"),
            TranscriptTurn::user("Can I book Tuesday?"),
        ];

        let reply = model.complete(&transcript, &[]).await.unwrap();
        assert_eq!(reply.text(), "Can I book Tuesday?");
        assert!(!reply.has_tool_calls());
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let model = EchoModel::with_prefix("Echo: ");
        let transcript = vec![TranscriptTurn::user("Hello!")];

        let reply = model.complete(&transcript, &[]).await.unwrap();
        assert_eq!(reply.text(), "Echo: Hello!");
    }

    #[tokio::test]
    async fn test_echo_without_user_turn() {
        let model = EchoModel::new();
        let reply = model.complete(&[], &[]).await.unwrap();
        assert_eq!(reply.text(), "");
    }

    #[tokio::test]
    async fn test_model_name_and_readiness() {
        let model = EchoModel::new();
        assert_eq!(model.name(), "EchoModel");
        assert!(model.is_ready().await);
    }
}
