//! Service catalog and opening hours.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::Result;
use crate::models::{OpeningWindow, Service};

/// Services seeded into an empty catalog.
pub const DEFAULT_SERVICES: &[(&str, f64)] = &[
    ("Initial consultation", 50.0),
    ("Therapy package", 300.0),
    ("Guidance session", 80.0),
];

/// Default bookable hours, seeded Monday through Saturday.
pub const DEFAULT_OPEN_TIME: &str = "14:00";
pub const DEFAULT_CLOSE_TIME: &str = "22:00";

/// List the service catalog, in insertion order.
pub async fn list_services(pool: &SqlitePool) -> Result<Vec<Service>> {
    let services = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, price
        FROM services
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

/// Get a service by id, if it exists.
pub async fn get_service(pool: &SqlitePool, id: i64) -> Result<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        SELECT id, name, price
        FROM services
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

/// Add a service to the catalog, returning its id.
pub async fn add_service(pool: &SqlitePool, name: &str, price: f64) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO services (name, price)
        VALUES (?, ?)
        "#,
    )
    .bind(name)
    .bind(price)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List opening windows, ordered by weekday.
pub async fn list_opening_windows(pool: &SqlitePool) -> Result<Vec<OpeningWindow>> {
    let windows = sqlx::query_as::<_, OpeningWindow>(
        r#"
        SELECT id, day_of_week, open_time, close_time
        FROM opening_windows
        ORDER BY day_of_week
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

/// Get the opening window for an ISO weekday (Monday = 1), if any.
pub async fn get_opening_window(
    pool: &SqlitePool,
    day_of_week: i64,
) -> Result<Option<OpeningWindow>> {
    let window = sqlx::query_as::<_, OpeningWindow>(
        r#"
        SELECT id, day_of_week, open_time, close_time
        FROM opening_windows
        WHERE day_of_week = ?
        "#,
    )
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    Ok(window)
}

/// Add an opening window for a weekday, returning its id.
pub async fn add_opening_window(
    pool: &SqlitePool,
    day_of_week: i64,
    open_time: &str,
    close_time: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO opening_windows (day_of_week, open_time, close_time)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(day_of_week)
    .bind(open_time)
    .bind(close_time)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Seed the default catalog and opening hours into empty tables.
///
/// Tables that already hold rows are left untouched, so this is safe to
/// call on every startup.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<()> {
    let service_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services").fetch_one(pool).await?;

    if service_count == 0 {
        for (name, price) in DEFAULT_SERVICES {
            add_service(pool, name, *price).await?;
        }
        info!("Seeded {} default services", DEFAULT_SERVICES.len());
    }

    let window_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM opening_windows")
        .fetch_one(pool)
        .await?;

    if window_count == 0 {
        for day in 1..=6 {
            add_opening_window(pool, day, DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME).await?;
        }
        info!("Seeded default opening hours (Mon-Sat {}-{})", DEFAULT_OPEN_TIME, DEFAULT_CLOSE_TIME);
    }

    Ok(())
}
