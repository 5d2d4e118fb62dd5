//! Lead records and sale temperature updates.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Lead;

/// Sale temperature assigned to a freshly created lead.
pub const INITIAL_SALE_TEMPERATURE: i64 = 10;

/// A partial update to a lead's contact fields.
///
/// Only fields that are `Some` are written; the rest keep their stored
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub service: Option<String>,
    pub preferred_time: Option<String>,
    pub phone: Option<String>,
}

impl LeadPatch {
    /// Whether the patch writes no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.service.is_none()
            && self.preferred_time.is_none()
            && self.phone.is_none()
    }
}

/// Ensure a lead row exists for an identity.
///
/// Idempotent: repeat calls never overwrite stored fields or reset the sale
/// temperature.
pub async fn upsert_lead(pool: &SqlitePool, identity: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO leads (identity)
        VALUES (?)
        ON CONFLICT(identity) DO NOTHING
        "#,
    )
    .bind(identity)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a lead by identity.
pub async fn get_lead(pool: &SqlitePool, identity: &str) -> Result<Lead> {
    sqlx::query_as::<_, Lead>(
        r#"
        SELECT id, identity, name, service, preferred_time, phone, sale_temperature, created_at
        FROM leads
        WHERE identity = ?
        "#,
    )
    .bind(identity)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Lead",
        id: identity.to_string(),
    })
}

/// Get a lead's row id by identity, if the lead exists.
pub async fn get_lead_id(pool: &SqlitePool, identity: &str) -> Result<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id FROM leads WHERE identity = ?
        "#,
    )
    .bind(identity)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Apply a partial update to a lead's contact fields.
///
/// An empty patch is a no-op. Fails with [`DatabaseError::NotFound`] for an
/// unknown identity.
pub async fn update_lead(pool: &SqlitePool, identity: &str, patch: &LeadPatch) -> Result<()> {
    if patch.is_empty() {
        return Ok(());
    }

    let result = sqlx::query(
        r#"
        UPDATE leads
        SET name = COALESCE(?, name),
            service = COALESCE(?, service),
            preferred_time = COALESCE(?, preferred_time),
            phone = COALESCE(?, phone)
        WHERE identity = ?
        "#,
    )
    .bind(&patch.name)
    .bind(&patch.service)
    .bind(&patch.preferred_time)
    .bind(&patch.phone)
    .bind(identity)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Lead",
            id: identity.to_string(),
        });
    }

    Ok(())
}

/// Set a lead's sale temperature to an exact value.
///
/// The caller decides the value; this write always wins, including writes
/// that lower the temperature.
pub async fn set_sale_temperature(pool: &SqlitePool, identity: &str, value: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE leads
        SET sale_temperature = ?
        WHERE identity = ?
        "#,
    )
    .bind(value)
    .bind(identity)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Lead",
            id: identity.to_string(),
        });
    }

    Ok(())
}

/// Raise a lead's sale temperature to at least `floor`.
///
/// Monotonic: a stored value above the floor stays put. Single UPDATE so
/// concurrent bumps cannot lower the value.
pub async fn raise_sale_temperature(pool: &SqlitePool, identity: &str, floor: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE leads
        SET sale_temperature = MAX(sale_temperature, ?)
        WHERE identity = ?
        "#,
    )
    .bind(floor)
    .bind(identity)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Lead",
            id: identity.to_string(),
        });
    }

    Ok(())
}
