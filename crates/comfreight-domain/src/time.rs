//! Timestamp parsing and the system clock

use crate::traits::Clock;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Local date-time layouts accepted in addition to RFC 3339
const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a caller-supplied timestamp
///
/// Accepts RFC 3339 (`2024-07-22T17:00:00Z`), a local date-time without
/// offset (`2024-07-22T17:00`, taken as UTC), or a plain date (`2024-08-01`,
/// taken as midnight UTC).
///
/// # Examples
///
/// ```
/// use comfreight_domain::parse_timestamp;
///
/// let eta = parse_timestamp("2024-08-01").unwrap();
/// assert_eq!(eta.to_rfc3339(), "2024-08-01T00:00:00+00:00");
/// assert!(parse_timestamp("next tuesday").is_err());
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("timestamp is empty".to_string());
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("unrecognized date/time '{}'", trimmed))
}

/// Wall clock backed by [`Utc::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2024-07-22T17:00:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 7, 22, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-07-22T12:00:00-05:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 7, 22, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_local_datetime() {
        let ts = parse_timestamp("2024-07-22T17:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 7, 22, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_plain_date() {
        let ts = parse_timestamp(" 2024-08-01 ").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("   ").is_err());
        assert!(parse_timestamp("2024-13-01").is_err());
        assert!(parse_timestamp("soon").is_err());
    }
}
