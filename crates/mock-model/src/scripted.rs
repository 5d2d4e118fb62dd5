//! Scripted model implementation - replays pre-programmed turns.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use agent_core::{async_trait, ChatModel, ModelError, ToolDefinition, TranscriptTurn};
use tokio::sync::Mutex;

/// A model that replays a fixed script of assistant turns.
///
/// Each `complete` call pops the next scripted turn. Once the script is
/// exhausted the model either repeats a fixed turn ([`ScriptedModel::repeating`])
/// or falls back to empty assistant replies. The invocation counter lets
/// tests assert exactly how many model round trips a conversation cost.
pub struct ScriptedModel {
    script: Mutex<VecDeque<TranscriptTurn>>,
    repeat: Option<TranscriptTurn>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    /// Create a model that replays `turns` in order.
    pub fn new(turns: Vec<TranscriptTurn>) -> Self {
        Self {
            script: Mutex::new(turns.into()),
            repeat: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a model that returns the same turn on every call.
    pub fn repeating(turn: TranscriptTurn) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(turn),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `complete` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        _transcript: &[TranscriptTurn],
        _tools: &[ToolDefinition],
    ) -> Result<TranscriptTurn, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(turn) = self.script.lock().await.pop_front() {
            return Ok(turn);
        }

        match &self.repeat {
            Some(turn) => Ok(turn.clone()),
            None => Ok(TranscriptTurn::assistant("")),
        }
    }

    fn name(&self) -> &str {
        "ScriptedModel"
    }
}
