//! Availability checks over the scheduling store.

use chrono::{DateTime, Datelike, Duration, FixedOffset};
use database::{appointment, catalog, Database};
use tracing::debug;

/// Slots offered per suggestion request unless the caller asks otherwise.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Step between scanned slots when suggesting alternatives.
const SLOT_STEP_HOURS: i64 = 1;

/// Read-only availability logic over the scheduling store.
///
/// Every answer is recomputed from live store state, so results stay correct
/// across restarts and concurrent bookings. The final word on a booking
/// belongs to the store's conflict-checked insert, not to these checks.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    db: Database,
}

impl AvailabilityEngine {
    /// Create an engine over the given store.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Whether the instant falls inside the opening window for its weekday.
    ///
    /// A weekday without a window means the practice is closed that day.
    pub async fn is_within_opening_hours(
        &self,
        time: &DateTime<FixedOffset>,
    ) -> database::Result<bool> {
        let weekday = i64::from(time.weekday().number_from_monday());
        let window = catalog::get_opening_window(self.db.pool(), weekday).await?;

        Ok(match window {
            Some(window) => window.contains(time.time()),
            None => false,
        })
    }

    /// Whether no appointment occupies exactly this instant.
    pub async fn is_slot_free(&self, time: &DateTime<FixedOffset>) -> database::Result<bool> {
        Ok(!appointment::appointment_exists_at(self.db.pool(), time).await?)
    }

    /// Whether a slot can be offered for booking: inside opening hours and
    /// not yet taken. The service id is carried for the tool contract;
    /// slots are exclusive across all services.
    pub async fn check_availability(
        &self,
        service_id: i64,
        time: &DateTime<FixedOffset>,
    ) -> database::Result<bool> {
        let available =
            self.is_within_opening_hours(time).await? && self.is_slot_free(time).await?;

        debug!("Availability for service {} at {}: {}", service_id, time, available);
        Ok(available)
    }

    /// Collect up to `max` available slots in `[start, end)`, stepping one
    /// hour at a time from `start`. Chronological, possibly empty, never
    /// mutates the book.
    pub async fn suggest_alternatives(
        &self,
        service_id: i64,
        start: &DateTime<FixedOffset>,
        end: &DateTime<FixedOffset>,
        max: usize,
    ) -> database::Result<Vec<DateTime<FixedOffset>>> {
        let mut slots = Vec::new();
        let mut cursor = *start;

        while cursor < *end && slots.len() < max {
            if self.check_availability(service_id, &cursor).await? {
                slots.push(cursor);
            }
            cursor += Duration::hours(SLOT_STEP_HOURS);
        }

        debug!(
            "Suggested {} slot(s) for service {} in [{}, {})",
            slots.len(),
            service_id,
            start,
            end
        );
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{lead, Database};

    async fn seeded_engine() -> (AvailabilityEngine, Database, i64) {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        catalog::seed_defaults(db.pool()).await.unwrap();
        lead::upsert_lead(db.pool(), "tg:engine").await.unwrap();
        let lead_id = lead::get_lead_id(db.pool(), "tg:engine").await.unwrap().unwrap();

        (AvailabilityEngine::new(db.clone()), db, lead_id)
    }

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn formatted(slots: &[DateTime<FixedOffset>]) -> Vec<String> {
        slots.iter().map(crate::time::format_slot).collect()
    }

    #[tokio::test]
    async fn test_check_availability() {
        let (engine, db, lead_id) = seeded_engine().await;

        // Monday 15:00 inside the seeded window
        let slot = ts("2024-03-04T15:00:00Z");
        assert!(engine.check_availability(1, &slot).await.unwrap());

        // Taken slots stop being available
        assert!(appointment::record_appointment(db.pool(), lead_id, 1, &slot).await.unwrap());
        assert!(!engine.check_availability(1, &slot).await.unwrap());
        assert!(engine.is_within_opening_hours(&slot).await.unwrap());
        assert!(!engine.is_slot_free(&slot).await.unwrap());

        // Outside opening hours, regardless of bookings
        assert!(!engine.check_availability(1, &ts("2024-03-04T10:00:00Z")).await.unwrap());
        // Sunday is closed entirely
        assert!(!engine.check_availability(1, &ts("2024-03-03T15:00:00Z")).await.unwrap());
    }

    #[tokio::test]
    async fn test_suggest_first_three_open_slots() {
        let (engine, _db, _lead_id) = seeded_engine().await;

        let start = ts("2024-03-04T14:00:00Z");
        let end = ts("2024-03-04T18:00:00Z");
        let slots = engine
            .suggest_alternatives(1, &start, &end, DEFAULT_SUGGESTION_LIMIT)
            .await
            .unwrap();

        assert_eq!(
            formatted(&slots),
            vec!["2024-03-04T14:00", "2024-03-04T15:00", "2024-03-04T16:00"]
        );
    }

    #[tokio::test]
    async fn test_suggest_skips_taken_slots_and_excludes_end() {
        let (engine, db, lead_id) = seeded_engine().await;

        let taken = ts("2024-03-04T15:00:00Z");
        assert!(appointment::record_appointment(db.pool(), lead_id, 1, &taken).await.unwrap());

        let start = ts("2024-03-04T14:00:00Z");
        let end = ts("2024-03-04T17:00:00Z");
        let slots = engine.suggest_alternatives(1, &start, &end, 5).await.unwrap();

        // 15:00 is taken, 17:00 is past the end of the range
        assert_eq!(formatted(&slots), vec!["2024-03-04T14:00", "2024-03-04T16:00"]);
    }

    #[tokio::test]
    async fn test_suggest_stops_at_closing_time() {
        let (engine, _db, _lead_id) = seeded_engine().await;

        // Scan runs past closing into the small hours of Tuesday
        let start = ts("2024-03-04T21:00:00Z");
        let end = ts("2024-03-05T01:00:00Z");
        let slots = engine.suggest_alternatives(1, &start, &end, 5).await.unwrap();

        // 22:00 itself is bookable; 23:00 and later are not
        assert_eq!(formatted(&slots), vec!["2024-03-04T21:00", "2024-03-04T22:00"]);
    }

    #[tokio::test]
    async fn test_suggest_on_closed_day_is_empty() {
        let (engine, _db, _lead_id) = seeded_engine().await;

        // Sunday has no opening window
        let start = ts("2024-03-03T14:00:00Z");
        let end = ts("2024-03-03T18:00:00Z");
        let slots = engine.suggest_alternatives(1, &start, &end, 3).await.unwrap();

        assert!(slots.is_empty());
    }
}
