//! Temporal parsing and formatting.
//!
//! Every date-like conversion goes through one canonical representation
//! (`NaiveDateTime`) and is projected onto the requested shape afterwards,
//! so there is one normalization per source shape instead of one routine
//! per (source, target) pair.
//!
//! String parsing uses the chrono strftime syntax. With an explicit
//! pattern hint the parse is strict: a mismatch is an error. Without one,
//! an ordered fallback list is tried: date patterns, then datetime
//! patterns, then time patterns.

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::error::{ValueError, ValueResult};

/// Default date rendering, `2024-03-05`.
pub const FORMAT_DATE: &str = "%Y-%m-%d";
/// Default time rendering, `13:45:59`.
pub const FORMAT_TIME: &str = "%H:%M:%S";
/// Default datetime rendering, `2024-03-05 13:45:59`.
pub const FORMAT_DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Fallback patterns for date-looking strings.
const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Fallback patterns for datetime-looking strings.
const DATE_TIME_PATTERNS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Fallback patterns for time-looking strings.
const TIME_PATTERNS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Midnight on the given date.
#[must_use]
pub fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The given time on the epoch date (1970-01-01).
#[must_use]
pub fn at_epoch_date(time: NaiveTime) -> NaiveDateTime {
    NaiveDateTime::UNIX_EPOCH.date().and_time(time)
}

/// Canonicalize epoch milliseconds (UTC).
pub fn from_epoch_millis(millis: i64) -> ValueResult<NaiveDateTime> {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| ValueError::parse_failure("timestamp", millis.to_string()))
}

/// Project a canonical datetime back onto epoch milliseconds (UTC).
#[must_use]
pub fn to_epoch_millis(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_millis()
}

/// Parse with a single explicit pattern.
///
/// Tries the pattern as a datetime first, then as a bare date (midnight),
/// then as a bare time (epoch date), since a pattern like `%Y-%m-%d`
/// carries no time fields at all.
pub fn parse_with_pattern(input: &str, pattern: &str) -> ValueResult<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, pattern) {
        return Ok(at_midnight(d));
    }
    if let Ok(t) = NaiveTime::parse_from_str(input, pattern) {
        return Ok(at_epoch_date(t));
    }
    Err(ValueError::parse_failure(
        format!("datetime[{pattern}]"),
        input,
    ))
}

/// Parse without a pattern hint, trying the fallback lists in order.
pub fn parse_fallback(input: &str) -> ValueResult<NaiveDateTime> {
    for pattern in DATE_PATTERNS {
        if let Ok(d) = NaiveDate::parse_from_str(input, pattern) {
            return Ok(at_midnight(d));
        }
    }
    for pattern in DATE_TIME_PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Ok(dt);
        }
    }
    for pattern in TIME_PATTERNS {
        if let Ok(t) = NaiveTime::parse_from_str(input, pattern) {
            return Ok(at_epoch_date(t));
        }
    }
    debug!(input, "no fallback pattern matched");
    Err(ValueError::parse_failure("datetime", input))
}

/// Render a datetime with a strftime pattern.
///
/// Returns None when the pattern itself is invalid, so callers can fall
/// back to a default pattern instead of panicking inside chrono.
#[must_use]
pub fn format_datetime(dt: NaiveDateTime, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(dt.format_with_items(items.iter()).to_string())
}

/// Render a bare date.
#[must_use]
pub fn format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    format_datetime(at_midnight(date), pattern)
}

/// Render a bare time.
#[must_use]
pub fn format_time(time: NaiveTime, pattern: &str) -> Option<String> {
    format_datetime(at_epoch_date(time), pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_with_pattern_strict() {
        let dt = parse_with_pattern("2024-03-05 10:20:30", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(dt.date(), ymd(2024, 3, 5));

        // date-only pattern lands at midnight
        let dt = parse_with_pattern("2024-03-05", "%Y-%m-%d").unwrap();
        assert_eq!(dt, at_midnight(ymd(2024, 3, 5)));

        // mismatch is fatal
        assert!(parse_with_pattern("05/03/2024", "%Y-%m-%d").is_err());
    }

    #[test]
    fn test_parse_fallback_single_digit_fields() {
        let dt = parse_fallback("2024-3-5").unwrap();
        assert_eq!(dt.date(), ymd(2024, 3, 5));
    }

    #[test]
    fn test_parse_fallback_order() {
        assert_eq!(
            parse_fallback("2024-03-05").unwrap(),
            at_midnight(ymd(2024, 3, 5))
        );
        let dt = parse_fallback("2024-03-05 10:00:00").unwrap();
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        let dt = parse_fallback("10:20:30").unwrap();
        assert_eq!(dt, at_epoch_date(NaiveTime::from_hms_opt(10, 20, 30).unwrap()));
        assert!(parse_fallback("nonsense").is_err());
    }

    #[test]
    fn test_epoch_round_trip() {
        let dt = from_epoch_millis(1_700_000_000_000).unwrap();
        assert_eq!(to_epoch_millis(dt), 1_700_000_000_000);
    }

    #[test]
    fn test_format_rejects_bad_pattern() {
        let dt = at_midnight(ymd(2024, 3, 5));
        assert_eq!(format_datetime(dt, "%Y-%m-%d"), Some("2024-03-05".into()));
        assert_eq!(format_datetime(dt, "%Q"), None);
    }
}
