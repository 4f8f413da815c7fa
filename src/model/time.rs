//! Timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a feed timestamp into an absolute UTC instant.
///
/// Accepts RFC 3339 (offsets are converted to UTC), ISO-like date-times
/// without an offset, and bare `YYYY-MM-DD` dates (midnight). Forms
/// without an offset are read as UTC.
///
/// Returns `None` for anything else, including out-of-range components.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_date_only_is_midnight_utc() {
        let dt = parse_timestamp("2025-02-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 2, 15));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn test_minute_precision_datetime() {
        let dt = parse_timestamp("2025-03-01T09:00").unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_seconds_and_fraction() {
        let dt = parse_timestamp("2025-03-01T09:15:30.250").unwrap();
        assert_eq!(dt.second(), 30);
        assert_eq!(dt.timestamp_subsec_millis(), 250);
        assert!(parse_timestamp("2025-03-01 09:15").is_some());
    }

    #[test]
    fn test_rfc3339_offset_converted_to_utc() {
        let dt = parse_timestamp("2025-03-01T10:00:00+01:00").unwrap();
        assert_eq!(dt, parse_timestamp("2025-03-01T09:00").unwrap());
    }

    #[test]
    fn test_date_equals_its_midnight() {
        assert_eq!(
            parse_timestamp("2025-02-15"),
            parse_timestamp("2025-02-15T00:00")
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("2025-13-01").is_none());
        assert!(parse_timestamp("01/02/2025").is_none());
    }
}
