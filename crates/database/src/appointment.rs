//! Appointment booking with slot exclusivity.

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::catalog;
use crate::error::Result;
use crate::models::Appointment;

/// Canonical storage form for a scheduled instant: UTC RFC 3339 with
/// whole-second precision. Uniqueness comparisons work on this string.
pub fn canonical_time(time: &DateTime<FixedOffset>) -> String {
    time.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Book an appointment at an exact instant.
///
/// Returns true and persists the appointment only when the instant falls
/// inside the opening window for its weekday and no other appointment
/// occupies it. Exclusivity is enforced by the unique index on
/// `scheduled_time`: a lost race reports false like any other taken slot,
/// and nothing is written on failure. Unknown lead or service ids are
/// rejected by the foreign keys and also report false.
pub async fn record_appointment(
    pool: &SqlitePool,
    lead_id: i64,
    service_id: i64,
    time: &DateTime<FixedOffset>,
) -> Result<bool> {
    let weekday = i64::from(time.weekday().number_from_monday());
    let window = match catalog::get_opening_window(pool, weekday).await? {
        Some(window) => window,
        None => {
            debug!("No opening window for weekday {}", weekday);
            return Ok(false);
        }
    };

    if !window.contains(time.time()) {
        debug!(
            "Time {} is outside opening hours {}-{}",
            time, window.open_time, window.close_time
        );
        return Ok(false);
    }

    let scheduled = canonical_time(time);
    let result = sqlx::query(
        r#"
        INSERT INTO appointments (lead_id, service_id, scheduled_time)
        VALUES (?, ?, ?)
        ON CONFLICT(scheduled_time) DO NOTHING
        "#,
    )
    .bind(lead_id)
    .bind(service_id)
    .bind(&scheduled)
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(done.rows_affected() > 0),
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            warn!("Appointment insert rejected: {}", db_err);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Whether an appointment exists at exactly this instant.
pub async fn appointment_exists_at(
    pool: &SqlitePool,
    time: &DateTime<FixedOffset>,
) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM appointments WHERE scheduled_time = ?
        "#,
    )
    .bind(canonical_time(time))
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// List all appointments, in scheduled order.
pub async fn list_appointments(pool: &SqlitePool) -> Result<Vec<Appointment>> {
    let appointments = sqlx::query_as::<_, Appointment>(
        r#"
        SELECT id, lead_id, service_id, scheduled_time
        FROM appointments
        ORDER BY scheduled_time
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
