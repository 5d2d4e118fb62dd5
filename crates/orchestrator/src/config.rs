//! Configuration for the booking agent.

use std::env;
use std::fs;

use chrono::{FixedOffset, Offset, Utc};
use tracing::{info, warn};

use crate::error::OrchestratorError;

/// Default path checked for a system prompt file.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Built-in system prompt for the front-desk persona.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are the virtual front desk of a \
small practice. Keep replies short, warm, and concrete. Chat naturally to \
find out what the client needs, and use your tools to record facts the \
moment you learn them: the client's name, the service they are interested \
in, their preferred time, and their phone number. Help clients find a free \
slot and book appointments. If something sensitive comes up, or the client \
insists on speaking to the practitioner, escalate the case to a human \
instead of handling it yourself.";

/// Reply used when the model cannot be reached.
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

/// Configuration for a [`BookingAgent`](crate::BookingAgent).
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base system prompt. Live practice state (datetime, services, hours,
    /// known lead facts) is appended to this on every message.
    pub system_prompt: String,

    /// Offset that naive client-facing times are interpreted in.
    pub business_offset: FixedOffset,

    /// Reply sent when the model fails.
    pub fallback_reply: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            business_offset: Utc.fix(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

impl AgentConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// - `FRONTDESK_SYSTEM_PROMPT` - system prompt text (optional)
    /// - `FRONTDESK_PROMPT_FILE` - file to load the prompt from when the
    ///   text variable is unset (optional, default: SYSTEM_PROMPT.md)
    /// - `FRONTDESK_BUSINESS_OFFSET` - UTC offset like "+02:00" (optional,
    ///   default: +00:00)
    /// - `FRONTDESK_FALLBACK_REPLY` - reply for model outages (optional)
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let mut config = Self::default();

        if let Ok(prompt) = env::var("FRONTDESK_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        } else {
            let path = env::var("FRONTDESK_PROMPT_FILE")
                .unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            if let Some(prompt) = load_prompt_file(&path) {
                config.system_prompt = prompt;
            }
        }

        if let Ok(offset) = env::var("FRONTDESK_BUSINESS_OFFSET") {
            config.business_offset = parse_offset(&offset).ok_or_else(|| {
                OrchestratorError::Configuration(format!(
                    "FRONTDESK_BUSINESS_OFFSET must look like +02:00, got {:?}",
                    offset
                ))
            })?;
        }

        if let Ok(reply) = env::var("FRONTDESK_FALLBACK_REPLY") {
            config.fallback_reply = reply;
        }

        Ok(config)
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the business offset.
    pub fn with_business_offset(mut self, offset: FixedOffset) -> Self {
        self.business_offset = offset;
        self
    }

    /// Set the fallback reply.
    pub fn with_fallback_reply(mut self, reply: impl Into<String>) -> Self {
        self.fallback_reply = reply.into();
        self
    }
}

/// Read a prompt file, returning `None` when it is missing or empty.
fn load_prompt_file(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                warn!("Prompt file {} is empty, using built-in prompt", path);
                None
            } else {
                info!("Loaded system prompt from {} ({} chars)", path, trimmed.len());
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

/// Parse a UTC offset written as `+HH:MM` or `-HH:MM` (sign optional).
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => (1, value),
    };

    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
