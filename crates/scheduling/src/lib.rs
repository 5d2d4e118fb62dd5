//! Availability logic for the frontdesk booking agent.
//!
//! [`AvailabilityEngine`] answers "can this slot be booked?" questions over
//! the scheduling store; the [`time`] module parses the time strings clients
//! and models produce. Booking itself is decided at the store boundary, so a
//! race between two conversations can never double-book a slot this engine
//! reported free.

pub mod engine;
pub mod time;

pub use engine::{AvailabilityEngine, DEFAULT_SUGGESTION_LIMIT};
pub use time::{format_slot, parse_client_time, parse_slot_range};
