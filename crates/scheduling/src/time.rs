//! Client time parsing and slot formatting.
//!
//! Clients and models hand over times in a handful of shapes. Strings with
//! an explicit offset keep it; naive strings are interpreted in the business
//! offset. Anything else is unparsable and gets rejected by the caller as
//! "not available" rather than erroring mid-conversation.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Accepted naive datetime formats, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a client-supplied time string.
///
/// Returns None for anything unparsable.
pub fn parse_client_time(s: &str, business_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return naive.and_local_timezone(business_offset).single();
        }
    }

    None
}

/// Parse a `"start/end"` slot range.
///
/// Both ends must parse and the range must run forward.
pub fn parse_slot_range(
    s: &str,
    business_offset: FixedOffset,
) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let (start, end) = s.split_once('/')?;
    let start = parse_client_time(start, business_offset)?;
    let end = parse_client_time(end, business_offset)?;
    if end < start {
        return None;
    }
    Some((start, end))
}

/// Format a slot the way clients see it: local wall clock, minute precision.
pub fn format_slot(time: &DateTime<FixedOffset>) -> String {
    time.format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn plus_two() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn test_parse_naive_forms_in_business_offset() {
        for s in [
            "2024-03-04T15:00",
            "2024-03-04T15:00:00",
            "2024-03-04 15:00",
            "2024-03-04 15:00:00",
            "  2024-03-04T15:00  ",
        ] {
            let t = parse_client_time(s, plus_two()).unwrap();
            assert_eq!(t.hour(), 15);
            assert_eq!(t.offset(), &plus_two());
        }
    }

    #[test]
    fn test_parse_rfc3339_keeps_own_offset() {
        let t = parse_client_time("2024-03-04T15:00:00-05:00", plus_two()).unwrap();
        assert_eq!(t.offset(), &FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(format_slot(&t), "2024-03-04T15:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for s in ["", "   ", "tomorrow at noon", "2024-13-40T99:00", "15:00"] {
            assert!(parse_client_time(s, utc()).is_none(), "accepted {:?}", s);
        }
    }

    #[test]
    fn test_parse_slot_range() {
        let (start, end) =
            parse_slot_range("2024-03-04T14:00/2024-03-04T18:00", utc()).unwrap();
        assert_eq!(format_slot(&start), "2024-03-04T14:00");
        assert_eq!(format_slot(&end), "2024-03-04T18:00");
    }

    #[test]
    fn test_parse_slot_range_rejects_bad_input() {
        // No separator, unparsable end, backwards range
        assert!(parse_slot_range("2024-03-04T14:00", utc()).is_none());
        assert!(parse_slot_range("2024-03-04T14:00/later", utc()).is_none());
        assert!(parse_slot_range("2024-03-04T18:00/2024-03-04T14:00", utc()).is_none());
    }
}
