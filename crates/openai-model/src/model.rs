//! OpenAiModel implementation over an OpenAI-compatible chat API.

use std::time::Duration;

use agent_core::{async_trait, ChatModel, ModelError, ToolDefinition, TranscriptTurn};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::OpenAiModelConfig;

/// A chat model backed by an OpenAI-compatible completions endpoint.
///
/// The client is stateless between calls: the orchestrator owns the
/// transcript and replays it in full on every request.
pub struct OpenAiModel {
    client: Client,
    config: OpenAiModelConfig,
}

impl OpenAiModel {
    /// Create a new OpenAiModel with the given configuration.
    pub fn new(config: OpenAiModelConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ModelError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "OpenAiModel initialized with model: {} ({}s timeout)",
            config.model, config.timeout_secs
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiModel from environment variables.
    ///
    /// See [`OpenAiModelConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, ModelError> {
        let config = OpenAiModelConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiModelConfig {
        &self.config
    }

    /// Build the completion request for a transcript.
    fn build_request(
        &self,
        transcript: &[TranscriptTurn],
        tools: &[ToolDefinition],
    ) -> ChatCompletionRequest {
        let (tools, tool_choice) = if tools.is_empty() {
            (None, None)
        } else {
            (Some(tools.to_vec()), Some("auto".to_string()))
        };

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: transcript.to_vec(),
            tools,
            tool_choice,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Make a chat completion request to the API.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ModelError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        debug!(
            "Sending request to chat API: model={}, {} turn(s)",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else {
                    ModelError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(ModelError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(ModelError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        Ok(completion)
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    async fn complete(
        &self,
        transcript: &[TranscriptTurn],
        tools: &[ToolDefinition],
    ) -> Result<TranscriptTurn, ModelError> {
        let request = self.build_request(transcript, tools);
        let completion = self.chat_completion(&request).await?;

        if let Some(usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        match completion.choices.into_iter().next() {
            Some(choice) => Ok(choice.message),
            None => {
                warn!("Chat API returned no choices");
                Err(ModelError::ProcessingFailed(
                    "response contained no choices".to_string(),
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "OpenAiModel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model() -> OpenAiModel {
        let config = OpenAiModelConfig::builder()
            .api_key("test-key")
            .max_tokens(256)
            .build();
        OpenAiModel::new(config).unwrap()
    }

    #[test]
    fn test_build_request_without_tools() {
        let model = test_model();
        let transcript = vec![TranscriptTurn::user("hi")];

        let request = model.build_request(&transcript, &[]);
        assert_eq!(request.model, "gpt-4.1");
        assert_eq!(request.messages.len(), 1);
        assert!(request.tools.is_none());
        assert!(request.tool_choice.is_none());
        assert_eq!(request.max_tokens, Some(256));
    }

    #[test]
    fn test_build_request_with_tools_sets_auto_choice() {
        let model = test_model();
        let tools = vec![ToolDefinition::function(
            "check_availability",
            "Check whether a slot is free.",
            serde_json::json!({"type": "object", "properties": {}}),
        )];

        let request = model.build_request(&[TranscriptTurn::user("hi")], &tools);
        assert_eq!(request.tools.as_ref().map(Vec::len), Some(1));
        assert_eq!(request.tool_choice.as_deref(), Some("auto"));
    }
}
