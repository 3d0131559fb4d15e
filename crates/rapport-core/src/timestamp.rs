//! Timestamp parsing for backend payloads.
//!
//! Backend timestamps are ISO-8601 strings. A value that cannot be parsed is
//! replaced by the current time instead of failing the request. That fallback
//! can misorder notes, so the result is tagged to keep it observable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Wire format for calendar dates in request paths.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Source of the current time.
///
/// Injected so aggregation results can be reproduced in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// How a [`ParsedTimestamp`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// The raw string was a valid timestamp.
    Parsed,
    /// The raw string was unusable and the current time was substituted.
    Fallback,
}

impl TimestampSource {
    pub fn is_fallback(self) -> bool {
        self == Self::Fallback
    }
}

/// A timestamp together with whether it came from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub value: DateTime<Utc>,
    pub source: TimestampSource,
}

impl ParsedTimestamp {
    pub fn is_fallback(&self) -> bool {
        self.source.is_fallback()
    }
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with or without fractional seconds, and a zone-less
/// date-time which is read as UTC.
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Parses `raw`, substituting `clock.now()` when it is not a valid timestamp.
pub fn parse_or_now(raw: &str, clock: &dyn Clock) -> ParsedTimestamp {
    match parse_iso8601(raw) {
        Some(value) => ParsedTimestamp {
            value,
            source: TimestampSource::Parsed,
        },
        None => ParsedTimestamp {
            value: clock.now(),
            source: TimestampSource::Fallback,
        },
    }
}

/// Formats a date the way the backend expects it in paths (`yyyy-MM-dd`).
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `yyyy-MM-dd` date.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_parse_rfc3339_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_iso8601("2024-01-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_iso8601("2024-01-01T10:00:00.000Z"), Some(expected));
        assert_eq!(parse_iso8601("2024-01-01T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_iso8601("2024-01-01T10:00:00.000000"), Some(expected));
    }

    #[test]
    fn test_parse_or_now_tags_fallback() {
        let clock = fixed();
        let parsed = parse_or_now("yesterday-ish", &clock);
        assert!(parsed.is_fallback());
        assert_eq!(parsed.value, clock.0);

        let parsed = parse_or_now("2024-01-01T10:00:00Z", &clock);
        assert_eq!(parsed.source, TimestampSource::Parsed);
    }

    #[test]
    fn test_wire_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_wire_date(date), "2024-03-07");
        assert_eq!(parse_wire_date("2024-03-07"), Some(date));
        assert_eq!(parse_wire_date("07/03/2024"), None);
    }
}
