//! Main agent that coordinates sessions, the model, and the store.

use std::env;
use std::sync::Arc;

use agent_core::{hash_prompt, ChatModel, TranscriptTurn};
use chrono::Utc;
use database::{catalog, lead, notes, Database};
use scheduling::AvailabilityEngine;
use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::error::OrchestratorError;
use crate::session::{render_system_turn, Session, SessionStore};

/// Database URL used when `FRONTDESK_DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:frontdesk.db?mode=rwc";

/// The conversational core of the booking agent.
///
/// One agent serves every identity on a transport. It:
/// - Keeps one serialized session per identity
/// - Rebuilds the system turn from live store state on every message
/// - Drives the model through a bounded tool loop
/// - Applies lead, booking, and escalation effects as tools execute
pub struct BookingAgent {
    /// Scheduling store shared with the availability engine.
    pub(crate) db: Database,
    /// Read-only availability checks over the store.
    pub(crate) engine: AvailabilityEngine,
    /// The language model driving the conversation.
    pub(crate) model: Arc<dyn ChatModel>,
    /// Per-identity conversation state.
    pub(crate) sessions: SessionStore,
    /// Prompt, business offset, and fallback reply.
    pub(crate) config: AgentConfig,
}

impl BookingAgent {
    /// Create an agent over a connected store and a model.
    pub fn new(db: Database, model: Arc<dyn ChatModel>, config: AgentConfig) -> Self {
        info!("BookingAgent using model: {}", model.name());

        Self {
            engine: AvailabilityEngine::new(db.clone()),
            db,
            model,
            sessions: SessionStore::new(),
            config,
        }
    }

    /// Create an agent from environment variables.
    ///
    /// Connects to `FRONTDESK_DATABASE_URL` (default: a local
    /// `frontdesk.db` file), runs migrations, and seeds the default
    /// catalog into empty tables. The model stays caller-provided so
    /// transports can pick their own.
    pub async fn from_env(model: Arc<dyn ChatModel>) -> Result<Self, OrchestratorError> {
        let config = AgentConfig::from_env()?;
        let url =
            env::var("FRONTDESK_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let db = Database::connect(&url).await?;
        db.migrate().await?;
        catalog::seed_defaults(db.pool()).await?;

        Ok(Self::new(db, model, config))
    }

    /// The scheduling store this agent writes to.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The live sessions, for operator inspection.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Process one inbound message and produce the reply text.
    ///
    /// Turns for one identity are strictly serialized: the session handle
    /// stays locked until the reply is ready, so a second message from the
    /// same identity waits its turn while other identities proceed
    /// concurrently. First contact creates the lead record.
    pub async fn handle_message(
        &self,
        identity: &str,
        text: &str,
    ) -> Result<String, OrchestratorError> {
        debug!("Handling message from {}", identity);

        lead::upsert_lead(self.db.pool(), identity).await?;

        let handle = self.sessions.entry(identity).await;
        let mut session = handle.lock().await;

        self.refresh_session(identity, &mut session).await?;
        session.push(TranscriptTurn::user(text));

        let reply = self.drive_model(identity, &mut session).await?;
        debug!("Replying to {} with {} chars", identity, reply.len());

        Ok(reply)
    }

    /// Install or refresh the session's system turn from live state.
    ///
    /// A fresh session also picks up the stored escalation state, so a
    /// lead escalated before a restart stays blocked from booking.
    async fn refresh_session(
        &self,
        identity: &str,
        session: &mut Session,
    ) -> Result<(), OrchestratorError> {
        let services = catalog::list_services(self.db.pool()).await?;
        let windows = catalog::list_opening_windows(self.db.pool()).await?;
        let lead = lead::get_lead(self.db.pool(), identity).await?;

        if session.is_fresh() {
            session.escalated = notes::has_escalation(self.db.pool(), lead.id).await?;
        }

        let now = Utc::now().with_timezone(&self.config.business_offset);
        let turn = render_system_turn(&self.config.system_prompt, &now, &services, &windows, &lead);
        debug!(
            "System turn for {} (fingerprint {})",
            identity,
            hash_prompt(turn.text())
        );
        session.set_system_turn(turn);

        Ok(())
    }
}
