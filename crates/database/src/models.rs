//! Database models.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A sales lead, one row per conversation identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Lead {
    /// Auto-incrementing id.
    pub id: i64,
    /// Opaque conversation identity (chat id, phone number, ...).
    pub identity: String,
    /// Client name, once learned.
    pub name: Option<String>,
    /// Service of interest, by display name.
    pub service: Option<String>,
    /// Preferred appointment time, as stated or booked.
    pub preferred_time: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Interest score, 0-100.
    pub sale_temperature: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// A bookable service in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Service {
    /// Auto-incrementing id.
    pub id: i64,
    /// Display name shown to clients.
    pub name: String,
    /// Price in the practice's currency.
    pub price: f64,
}

/// Bookable hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OpeningWindow {
    /// Auto-incrementing id.
    pub id: i64,
    /// ISO weekday, Monday = 1 through Sunday = 7.
    pub day_of_week: i64,
    /// Opening wall-clock time, "HH:MM".
    pub open_time: String,
    /// Closing wall-clock time, "HH:MM".
    pub close_time: String,
}

impl OpeningWindow {
    /// Whether this window covers the given ISO weekday (Monday = 1).
    pub fn applies_to(&self, iso_weekday: u32) -> bool {
        self.day_of_week == i64::from(iso_weekday)
    }

    /// Whether a wall-clock time falls inside this window, bounds inclusive.
    ///
    /// Unparsable stored bounds make the window contain nothing.
    pub fn contains(&self, time_of_day: NaiveTime) -> bool {
        match (parse_wall_time(&self.open_time), parse_wall_time(&self.close_time)) {
            (Some(open), Some(close)) => open <= time_of_day && time_of_day <= close,
            _ => false,
        }
    }
}

fn parse_wall_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// A booked appointment at an exact instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    /// Auto-incrementing id.
    pub id: i64,
    /// Lead the appointment belongs to.
    pub lead_id: i64,
    /// Booked service.
    pub service_id: i64,
    /// Scheduled instant, canonical UTC RFC 3339.
    pub scheduled_time: String,
}

/// A free-form note on a lead's intake record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct IntakeNote {
    /// Auto-incrementing id.
    pub id: i64,
    /// Lead the note belongs to.
    pub lead_id: i64,
    /// Note category, e.g. "general" or "medical".
    pub note_type: String,
    /// Note text.
    pub note_text: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// A case handed off to a human.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EscalatedCase {
    /// Auto-incrementing id.
    pub id: i64,
    /// Lead the case belongs to.
    pub lead_id: i64,
    /// Short reason for the hand-off.
    pub reason: String,
    /// Optional free-form details.
    pub details: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}
