//! Mock chat model implementations for the frontdesk booking agent.
//!
//! This crate provides mock implementations of the `ChatModel` trait for
//! testing:
//! - `ScriptedModel` - Replays pre-programmed assistant turns
//! - `EchoModel` - Replies with the latest user turn
//! - `FailingModel` - Always errors
//!
//! For production completions, use the `openai-model` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_model::{ChatModel, EchoModel, TranscriptTurn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_model::ModelError> {
//!     let model = EchoModel::new();
//!     let transcript = vec![TranscriptTurn::user("Hello!")];
//!
//!     let reply = model.complete(&transcript, &[]).await?;
//!     println!("Reply: {}", reply.text());
//!     Ok(())
//! }
//! ```

mod echo;
mod failing;
mod scripted;

// Re-export agent-core types for convenience
pub use agent_core::{
    async_trait, ChatModel, ModelError, ToolCall, ToolDefinition, TranscriptTurn,
};

// Export mock implementations
pub use echo::EchoModel;
pub use failing::FailingModel;
pub use scripted::ScriptedModel;
