//! Intake notes and escalated cases, both append-only.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{EscalatedCase, IntakeNote};

/// Append an intake note for a lead.
pub async fn add_intake_note(
    pool: &SqlitePool,
    lead_id: i64,
    note_type: &str,
    note_text: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO intake_notes (lead_id, note_type, note_text)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(lead_id)
    .bind(note_type)
    .bind(note_text)
    .execute(pool)
    .await?;

    Ok(())
}

/// List a lead's intake notes, oldest first.
pub async fn list_intake_notes(pool: &SqlitePool, lead_id: i64) -> Result<Vec<IntakeNote>> {
    let notes = sqlx::query_as::<_, IntakeNote>(
        r#"
        SELECT id, lead_id, note_type, note_text, created_at
        FROM intake_notes
        WHERE lead_id = ?
        ORDER BY id
        "#,
    )
    .bind(lead_id)
    .fetch_all(pool)
    .await?;

    Ok(notes)
}

/// Append an escalated case for a lead.
pub async fn add_escalation(
    pool: &SqlitePool,
    lead_id: i64,
    reason: &str,
    details: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO escalated_cases (lead_id, reason, details)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(lead_id)
    .bind(reason)
    .bind(details)
    .execute(pool)
    .await?;

    Ok(())
}

/// Whether any escalated case exists for a lead.
pub async fn has_escalation(pool: &SqlitePool, lead_id: i64) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM escalated_cases WHERE lead_id = ?
        "#,
    )
    .bind(lead_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// List a lead's escalated cases, oldest first.
pub async fn list_escalations(pool: &SqlitePool, lead_id: i64) -> Result<Vec<EscalatedCase>> {
    let cases = sqlx::query_as::<_, EscalatedCase>(
        r#"
        SELECT id, lead_id, reason, details, created_at
        FROM escalated_cases
        WHERE lead_id = ?
        ORDER BY id
        "#,
    )
    .bind(lead_id)
    .fetch_all(pool)
    .await?;

    Ok(cases)
}
