//! Lead fact merging, sale-temperature policy, and escalation effects.
//!
//! Temperature moves on two tracks. Heuristic bumps are monotonic floors:
//! learning a service or preferred time lifts the lead to at least 70, a
//! plausible name to at least 30, and a confirmed booking pins it at 100.
//! The dedicated temperature tool is authoritative instead: it clamps to
//! [0, 100] and overwrites in either direction.

use database::{lead, notes, Database, DatabaseError, LeadPatch};
use tracing::{debug, warn};

use crate::session::Session;
use crate::tools::UpdateLeadArgs;

/// Temperature floor once a service or preferred time is known.
pub const ENGAGED_TEMPERATURE: i64 = 70;

/// Temperature floor once a plausible name is known.
pub const IDENTIFIED_TEMPERATURE: i64 = 30;

/// Temperature of a lead with a confirmed booking.
pub const BOOKED_TEMPERATURE: i64 = 100;

/// Merge extracted facts into the lead record and apply the heuristic
/// temperature floor the strongest fact justifies.
///
/// Facts for an identity without a lead row are dropped with a warning.
pub async fn apply_learned_facts(
    db: &Database,
    identity: &str,
    facts: &UpdateLeadArgs,
) -> database::Result<()> {
    let patch = LeadPatch {
        name: facts.name.clone(),
        service: facts.service.clone(),
        preferred_time: facts.preferred_time.clone(),
        phone: facts.phone.clone(),
    };

    match lead::update_lead(db.pool(), identity, &patch).await {
        Ok(()) => {}
        Err(DatabaseError::NotFound { .. }) => {
            warn!("Dropping facts for unknown lead {}", identity);
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    let floor = if facts.service.is_some() || facts.preferred_time.is_some() {
        Some(ENGAGED_TEMPERATURE)
    } else if facts.name.as_deref().is_some_and(|name| name.trim().len() > 1) {
        Some(IDENTIFIED_TEMPERATURE)
    } else {
        None
    };

    if let Some(floor) = floor {
        lead::raise_sale_temperature(db.pool(), identity, floor).await?;
        debug!("Raised sale temperature for {} to at least {}", identity, floor);
    }

    Ok(())
}

/// Clamp and store the temperature exactly as instructed.
pub async fn set_temperature(db: &Database, identity: &str, value: i64) -> database::Result<()> {
    let clamped = value.clamp(0, 100);
    if clamped != value {
        debug!("Clamped sale temperature {} to {}", value, clamped);
    }

    match lead::set_sale_temperature(db.pool(), identity, clamped).await {
        Err(DatabaseError::NotFound { .. }) => {
            warn!("Dropping temperature update for unknown lead {}", identity);
            Ok(())
        }
        other => other,
    }
}

/// Write a confirmed booking back onto the lead: the booked service name
/// and slot become the lead's service and preferred time, and the
/// temperature jumps to [`BOOKED_TEMPERATURE`].
pub async fn record_booking(
    db: &Database,
    identity: &str,
    service_name: &str,
    slot: &str,
) -> database::Result<()> {
    let patch = LeadPatch {
        service: Some(service_name.to_string()),
        preferred_time: Some(slot.to_string()),
        ..LeadPatch::default()
    };
    lead::update_lead(db.pool(), identity, &patch).await?;
    lead::set_sale_temperature(db.pool(), identity, BOOKED_TEMPERATURE).await
}

/// Flag the session as escalated and record the case for a human.
///
/// The session flag flips even when no lead row exists to attach the case
/// to; booking stays blocked for the rest of the process lifetime either
/// way.
pub async fn mark_escalated(
    db: &Database,
    session: &mut Session,
    identity: &str,
    reason: &str,
    details: Option<&str>,
) -> database::Result<()> {
    session.escalated = true;

    match lead::get_lead_id(db.pool(), identity).await? {
        Some(lead_id) => notes::add_escalation(db.pool(), lead_id, reason, details).await?,
        None => warn!("Escalation for unknown lead {} has no record to attach to", identity),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        lead::upsert_lead(db.pool(), "tg:7").await.unwrap();
        db
    }

    async fn temperature(db: &Database, identity: &str) -> i64 {
        lead::get_lead(db.pool(), identity).await.unwrap().sale_temperature
    }

    #[tokio::test]
    async fn test_facts_raise_temperature_monotonically() {
        let db = seeded_db().await;

        // A name alone identifies the lead
        let facts = UpdateLeadArgs {
            name: Some("Dana".to_string()),
            ..UpdateLeadArgs::default()
        };
        apply_learned_facts(&db, "tg:7", &facts).await.unwrap();
        assert_eq!(temperature(&db, "tg:7").await, IDENTIFIED_TEMPERATURE);

        // Service interest is a stronger signal
        let facts = UpdateLeadArgs {
            service: Some("Therapy package".to_string()),
            ..UpdateLeadArgs::default()
        };
        apply_learned_facts(&db, "tg:7", &facts).await.unwrap();
        assert_eq!(temperature(&db, "tg:7").await, ENGAGED_TEMPERATURE);

        // A later weaker fact must not cool the lead back down
        let facts = UpdateLeadArgs {
            name: Some("Dana R.".to_string()),
            ..UpdateLeadArgs::default()
        };
        apply_learned_facts(&db, "tg:7", &facts).await.unwrap();
        assert_eq!(temperature(&db, "tg:7").await, ENGAGED_TEMPERATURE);

        let merged = lead::get_lead(db.pool(), "tg:7").await.unwrap();
        assert_eq!(merged.name.as_deref(), Some("Dana R."));
        assert_eq!(merged.service.as_deref(), Some("Therapy package"));
    }

    #[tokio::test]
    async fn test_single_letter_name_is_not_plausible() {
        let db = seeded_db().await;

        let facts = UpdateLeadArgs {
            name: Some("D".to_string()),
            ..UpdateLeadArgs::default()
        };
        apply_learned_facts(&db, "tg:7", &facts).await.unwrap();

        assert_eq!(temperature(&db, "tg:7").await, lead::INITIAL_SALE_TEMPERATURE);
        assert_eq!(
            lead::get_lead(db.pool(), "tg:7").await.unwrap().name.as_deref(),
            Some("D")
        );
    }

    #[tokio::test]
    async fn test_direct_set_clamps_and_overrides_downward() {
        let db = seeded_db().await;

        set_temperature(&db, "tg:7", 150).await.unwrap();
        assert_eq!(temperature(&db, "tg:7").await, 100);

        set_temperature(&db, "tg:7", -5).await.unwrap();
        assert_eq!(temperature(&db, "tg:7").await, 0);

        lead::raise_sale_temperature(db.pool(), "tg:7", 70).await.unwrap();
        set_temperature(&db, "tg:7", 40).await.unwrap();
        assert_eq!(temperature(&db, "tg:7").await, 40);
    }

    #[tokio::test]
    async fn test_record_booking_pins_lead_at_booked() {
        let db = seeded_db().await;

        record_booking(&db, "tg:7", "Initial consultation", "2024-03-04T15:00")
            .await
            .unwrap();

        let booked = lead::get_lead(db.pool(), "tg:7").await.unwrap();
        assert_eq!(booked.sale_temperature, BOOKED_TEMPERATURE);
        assert_eq!(booked.service.as_deref(), Some("Initial consultation"));
        assert_eq!(booked.preferred_time.as_deref(), Some("2024-03-04T15:00"));
    }

    #[tokio::test]
    async fn test_unknown_identity_is_a_no_op() {
        let db = seeded_db().await;

        let facts = UpdateLeadArgs {
            name: Some("Ghost".to_string()),
            service: Some("Anything".to_string()),
            ..UpdateLeadArgs::default()
        };
        apply_learned_facts(&db, "tg:ghost", &facts).await.unwrap();
        set_temperature(&db, "tg:ghost", 90).await.unwrap();

        assert_eq!(lead::get_lead_id(db.pool(), "tg:ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mark_escalated_flips_session_and_records_case() {
        let db = seeded_db().await;
        let mut session = Session::default();

        mark_escalated(&db, &mut session, "tg:7", "sensitive topic", Some("details"))
            .await
            .unwrap();

        assert!(session.escalated);
        let lead_id = lead::get_lead_id(db.pool(), "tg:7").await.unwrap().unwrap();
        assert!(notes::has_escalation(db.pool(), lead_id).await.unwrap());

        // Unknown identity still flips the flag
        let mut anon = Session::default();
        mark_escalated(&db, &mut anon, "tg:ghost", "reason", None).await.unwrap();
        assert!(anon.escalated);
    }
}
