//! Conversation orchestrator for the frontdesk booking agent.
//!
//! This crate provides the [`BookingAgent`] type which turns inbound chat
//! messages into replies, bookings, lead updates, and escalations.
//!
//! # Features
//!
//! - One serialized session per client identity, concurrent across identities
//! - System turn rebuilt from live store state on every message
//! - Bounded tool dispatch loop over a fixed seven-tool surface
//! - Booking exclusivity enforced by the store's conflict-checked insert
//! - Model outages degrade to a configured fallback reply
//!
//! # Architecture
//!
//! ```text
//! Inbound message (identity, text)
//!          ↓
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BOOKING AGENT                         │
//! │                                                              │
//! │  1. Upsert lead, lock the identity's session                 │
//! │         ↓                                                    │
//! │  2. Refresh system turn (datetime, catalog, lead facts)      │
//! │         ↓                                                    │
//! │  3. Invoke model; execute its tool calls in order:           │
//! │     • update_lead / update_sale_temperature → lead record    │
//! │     • check_availability / suggest_alternative_slots         │
//! │       → availability engine                                  │
//! │     • schedule_appointment → conflict-checked insert         │
//! │     • add_intake_note / escalate_case → store                │
//! │         ↓                                                    │
//! │  4. Repeat up to the round cap, then reply                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use openai_model::OpenAiModel;
//! use orchestrator::BookingAgent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Arc::new(OpenAiModel::from_env()?);
//!     let agent = BookingAgent::from_env(model).await?;
//!
//!     let reply = agent
//!         .handle_message("tg:12345", "Hi! Anything free on Monday afternoon?")
//!         .await?;
//!     println!("Reply: {}", reply);
//!     Ok(())
//! }
//! ```

mod config;
mod dispatch;
mod error;
mod orchestrator;
mod session;
mod tools;
mod trust;

// Public exports
pub use config::{AgentConfig, DEFAULT_FALLBACK_REPLY, DEFAULT_PROMPT_FILE, DEFAULT_SYSTEM_PROMPT};
pub use dispatch::MAX_TOOL_ROUNDS;
pub use error::OrchestratorError;
pub use orchestrator::{BookingAgent, DEFAULT_DATABASE_URL};
pub use session::{render_system_turn, Session, SessionStore};
pub use tools::{
    tool_schema, AddIntakeNoteArgs, CheckAvailabilityArgs, EscalateCaseArgs,
    ScheduleAppointmentArgs, SuggestSlotsArgs, ToolInvocation, ToolParseError, UpdateLeadArgs,
    UpdateSaleTemperatureArgs,
};
pub use trust::{BOOKED_TEMPERATURE, ENGAGED_TEMPERATURE, IDENTIFIED_TEMPERATURE};

// Re-export commonly used types from dependencies
pub use agent_core::{ChatModel, ModelError, ToolCall, ToolDefinition, TranscriptTurn};
pub use database::Database;
pub use scheduling::AvailabilityEngine;
