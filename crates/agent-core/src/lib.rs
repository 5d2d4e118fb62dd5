//! Core trait and types for chat model integrations.
//!
//! This crate provides the shared interface between the frontdesk
//! orchestration core and the language models that drive it. It defines:
//!
//! - [`ChatModel`] - The trait that all model implementations must implement
//! - [`TranscriptTurn`] / [`ToolCall`] - Conversation turns in the
//!   chat-completions wire shape
//! - [`ToolDefinition`] - Function tool schema entries
//! - [`ModelError`] - Error types for model operations
//!
//! # Example
//!
//! ```rust
//! use agent_core::{ChatModel, ModelError, ToolDefinition, TranscriptTurn};
//! use async_trait::async_trait;
//!
//! struct MyModel;
//!
//! #[async_trait]
//! impl ChatModel for MyModel {
//!     async fn complete(
//!         &self,
//!         _transcript: &[TranscriptTurn],
//!         _tools: &[ToolDefinition],
//!     ) -> Result<TranscriptTurn, ModelError> {
//!         Ok(TranscriptTurn::assistant("Hello!"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyModel"
//!     }
//! }
//! ```

mod error;
mod model;
mod prompt;
mod tools;
mod transcript;

pub use error::ModelError;
pub use model::ChatModel;
pub use prompt::hash_prompt;
pub use tools::{FunctionDefinition, ToolDefinition};
pub use transcript::{ToolCall, ToolCallFunction, TranscriptTurn};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
