//! Per-identity conversation sessions.
//!
//! A session is process-lifetime state: the ordered transcript plus an
//! escalation flag. The store hands out one handle per identity, and locking
//! that handle is what serializes a conversation - two messages from the
//! same identity are processed strictly in turn while other identities
//! proceed concurrently. There is no eviction; sessions live until the
//! process exits.

use std::sync::Arc;

use agent_core::TranscriptTurn;
use chrono::{DateTime, FixedOffset};
use database::{Lead, OpeningWindow, Service};
use indexmap::IndexMap;
use tokio::sync::{Mutex, RwLock};

/// One conversation's transcript and flags.
#[derive(Debug, Default)]
pub struct Session {
    /// Ordered turns, system turn at index 0 once rendered.
    pub turns: Vec<TranscriptTurn>,
    /// Set when the case is escalated; blocks booking tools from then on.
    pub escalated: bool,
}

impl Session {
    /// Whether the session has no turns yet.
    pub fn is_fresh(&self) -> bool {
        self.turns.is_empty()
    }

    /// Install or refresh the system turn at index 0, leaving every other
    /// turn untouched.
    pub fn set_system_turn(&mut self, turn: TranscriptTurn) {
        if self.turns.is_empty() {
            self.turns.push(turn);
        } else {
            self.turns[0] = turn;
        }
    }

    /// Append a turn to the transcript.
    pub fn push(&mut self, turn: TranscriptTurn) {
        self.turns.push(turn);
    }
}

/// Shared map of per-identity session handles.
///
/// `IndexMap` keeps identities in first-contact order, which makes the
/// listing accessors stable for operators.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<IndexMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Create an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle for an identity, creating an empty session on first
    /// contact. Callers lock the returned handle for the whole turn.
    pub async fn entry(&self, identity: &str) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(identity.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::default())))
            .clone()
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Identities with live sessions, in first-contact order.
    pub async fn identities(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }
}

/// Render the system turn from the base prompt and live practice state.
///
/// The model sees the current datetime in business-local time, the service
/// catalog with ids and prices, the weekly opening hours, and whatever lead
/// facts are already on file.
pub fn render_system_turn(
    base_prompt: &str,
    now: &DateTime<FixedOffset>,
    services: &[Service],
    windows: &[OpeningWindow],
    lead: &Lead,
) -> TranscriptTurn {
    let catalog = services
        .iter()
        .map(|s| format!("{} (id {}, ${})", s.name, s.id, format_price(s.price)))
        .collect::<Vec<_>>()
        .join(", ");

    let hours = windows
        .iter()
        .map(|w| format!("{}:{}-{}", w.day_of_week, w.open_time, w.close_time))
        .collect::<Vec<_>>()
        .join(", ");

    let mut facts = Vec::new();
    if let Some(name) = &lead.name {
        facts.push(format!("name: {}", name));
    }
    if let Some(service) = &lead.service {
        facts.push(format!("service: {}", service));
    }
    if let Some(preferred_time) = &lead.preferred_time {
        facts.push(format!("preferred time: {}", preferred_time));
    }
    if let Some(phone) = &lead.phone {
        facts.push(format!("phone: {}", phone));
    }
    let known = if facts.is_empty() {
        String::new()
    } else {
        format!(" Known lead data: {}.", facts.join(", "))
    };

    TranscriptTurn::system(format!(
        "{} Current datetime: {}. Available services: {}. Opening hours (day:open-close): {}.{}",
        base_prompt,
        now.format("%Y-%m-%d %H:%M"),
        catalog,
        hours,
        known,
    ))
}

/// Format a price without a trailing `.0` on whole amounts.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0}", price)
    } else {
        format!("{}", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn sample_lead() -> Lead {
        Lead {
            id: 1,
            identity: "tg:100".to_string(),
            name: None,
            service: None,
            preferred_time: None,
            phone: None,
            sale_temperature: 10,
            created_at: "2024-03-01T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_set_system_turn_replaces_index_zero_only() {
        let mut session = Session::default();
        session.set_system_turn(TranscriptTurn::system("v1"));
        session.push(TranscriptTurn::user("hi"));
        session.push(TranscriptTurn::assistant("hello"));

        session.set_system_turn(TranscriptTurn::system("v2"));

        assert_eq!(session.turns.len(), 3);
        assert_eq!(session.turns[0].text(), "v2");
        assert_eq!(session.turns[1].text(), "hi");
        assert_eq!(session.turns[2].text(), "hello");
    }

    #[tokio::test]
    async fn test_entry_reuses_handles_per_identity() {
        let store = SessionStore::new();

        let first = store.entry("tg:1").await;
        let again = store.entry("tg:1").await;
        let other = store.entry("tg:2").await;

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(store.session_count().await, 2);
        assert_eq!(store.identities().await, vec!["tg:1", "tg:2"]);
    }

    #[test]
    fn test_render_system_turn_without_lead_facts() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 4, 12, 30, 0)
            .unwrap();
        let services = vec![Service {
            id: 1,
            name: "Initial consultation".to_string(),
            price: 50.0,
        }];
        let windows = vec![OpeningWindow {
            id: 1,
            day_of_week: 1,
            open_time: "14:00".to_string(),
            close_time: "22:00".to_string(),
        }];

        let turn = render_system_turn("Be helpful.", &now, &services, &windows, &sample_lead());
        let text = turn.text();

        assert!(text.starts_with("Be helpful. Current datetime: 2024-03-04 12:30."));
        assert!(text.contains("Available services: Initial consultation (id 1, $50)."));
        assert!(text.contains("Opening hours (day:open-close): 1:14:00-22:00."));
        assert!(!text.contains("Known lead data"));
    }

    #[test]
    fn test_render_system_turn_appends_known_facts() {
        let now = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 4, 9, 0, 0)
            .unwrap();
        let services = vec![Service {
            id: 2,
            name: "Guidance session".to_string(),
            price: 79.5,
        }];
        let mut lead = sample_lead();
        lead.name = Some("Dana".to_string());
        lead.phone = Some("+15550001".to_string());

        let turn = render_system_turn("Prompt.", &now, &services, &[], &lead);
        let text = turn.text();

        assert!(text.contains("Guidance session (id 2, $79.5)"));
        assert!(text.ends_with("Known lead data: name: Dana, phone: +15550001."));
    }
}
