//! Configuration for OpenAiModel.

use agent_core::ModelError;
use std::env;

/// Configuration for OpenAiModel.
#[derive(Debug, Clone)]
pub struct OpenAiModelConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for a completion.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiModelConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4.1".to_string(),
            max_tokens: None,
            temperature: None,
            timeout_secs: 60,
        }
    }
}

impl OpenAiModelConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API base URL (default: https://api.openai.com)
    /// - `OPENAI_CHAT_MODEL` - Model name (default: gpt-4.1)
    /// - `OPENAI_MAX_TOKENS` - Max completion tokens (default: unset)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: unset)
    /// - `OPENAI_TIMEOUT_SECS` - Request timeout in seconds (default: 60)
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4.1".to_string());

        let max_tokens = env::var("OPENAI_MAX_TOKENS").ok().and_then(|v| v.parse().ok());

        let temperature = env::var("OPENAI_TEMPERATURE").ok().and_then(|v| v.parse().ok());

        let timeout_secs = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout_secs,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> OpenAiModelConfigBuilder {
        OpenAiModelConfigBuilder::default()
    }
}

/// Builder for OpenAiModelConfig.
#[derive(Debug, Default)]
pub struct OpenAiModelConfigBuilder {
    config: OpenAiModelConfig,
}

impl OpenAiModelConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max completion tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenAiModelConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAiModelConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4.1");
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_builder_all_options() {
        let config = OpenAiModelConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .model("gpt-4o-mini")
            .max_tokens(512)
            .temperature(0.5)
            .timeout_secs(20)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.timeout_secs, 20);
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_openai_vars() {
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("OPENAI_API_URL");
            std::env::remove_var("OPENAI_CHAT_MODEL");
            std::env::remove_var("OPENAI_MAX_TOKENS");
            std::env::remove_var("OPENAI_TEMPERATURE");
            std::env::remove_var("OPENAI_TIMEOUT_SECS");
        }

        // Scenario 1: Missing API key should error
        clear_all_openai_vars();
        let result = OpenAiModelConfig::from_env();
        match result {
            Err(ModelError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            _ => panic!("Expected Configuration error"),
        }

        // Scenario 2: Only API key set, defaults used
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "test-env-key");

        let config = OpenAiModelConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4.1");
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
        assert_eq!(config.timeout_secs, 60);

        // Scenario 3: All vars set
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "full-test-key");
        std::env::set_var("OPENAI_API_URL", "https://test.api.com");
        std::env::set_var("OPENAI_CHAT_MODEL", "gpt-4o");
        std::env::set_var("OPENAI_MAX_TOKENS", "2048");
        std::env::set_var("OPENAI_TEMPERATURE", "0.9");
        std::env::set_var("OPENAI_TIMEOUT_SECS", "30");

        let config = OpenAiModelConfig::from_env().unwrap();
        assert_eq!(config.api_key, "full-test-key");
        assert_eq!(config.api_url, "https://test.api.com");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.timeout_secs, 30);

        // Scenario 4: Unparsable numeric vars fall back to defaults
        clear_all_openai_vars();
        std::env::set_var("OPENAI_API_KEY", "test-key");
        std::env::set_var("OPENAI_MAX_TOKENS", "lots");
        std::env::set_var("OPENAI_TIMEOUT_SECS", "soon");

        let config = OpenAiModelConfig::from_env().unwrap();
        assert!(config.max_tokens.is_none());
        assert_eq!(config.timeout_secs, 60);

        // Cleanup
        clear_all_openai_vars();
    }
}
