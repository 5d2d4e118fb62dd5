//! OpenAI-compatible chat model client.
//!
//! This crate provides a [`ChatModel`] implementation backed by an
//! OpenAI-compatible `/v1/chat/completions` endpoint, with function tool
//! calling.
//!
//! # Features
//!
//! - Full transcript replay with function tool calls
//! - Configurable via environment variables
//! - Request timeout on every call
//!
//! # Example
//!
//! ```rust,no_run
//! use openai_model::OpenAiModel;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads OPENAI_API_KEY and friends from the environment
//!     let model = OpenAiModel::from_env()?;
//!     // Hand the model to the orchestrator...
//!     # let _ = model;
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod model;

pub use api_types::{ChatCompletionRequest, ChatCompletionResponse, Choice, Usage};
pub use config::OpenAiModelConfig;
pub use model::OpenAiModel;

// Re-export agent-core types for convenience
pub use agent_core::{async_trait, ChatModel, ModelError, ToolDefinition, TranscriptTurn};
