//! Timestamp handling for the Intercity API.
//!
//! The carrier speaks local wall-clock time with no offset. Search and
//! connection payloads use `YYYY-MM-DD HH:MM:SS`, the availability endpoint
//! wants the ISO form with a `T` separator, and the station update endpoint
//! wants millisecond precision.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Error returned when parsing an invalid timestamp or duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

const CARRIER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a carrier timestamp.
///
/// Accepts a space or `T` separator and optional fractional seconds.
///
/// # Examples
///
/// ```
/// use seat_finder::domain::parse_carrier_timestamp;
///
/// let t = parse_carrier_timestamp("2024-05-01 08:00:00").unwrap();
/// assert_eq!(t, parse_carrier_timestamp("2024-05-01T08:00:00.000").unwrap());
///
/// assert!(parse_carrier_timestamp("2024-05-01").is_err());
/// ```
pub fn parse_carrier_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    let normalized = s.trim().replacen('T', " ", 1);

    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M"))
        .map_err(|_| TimeError::new(s, "expected YYYY-MM-DD HH:MM:SS"))
}

/// Format a timestamp the way the carrier sends it (`YYYY-MM-DD HH:MM:SS`).
pub fn format_carrier(t: NaiveDateTime) -> String {
    t.format(CARRIER_FORMAT).to_string()
}

/// Format a timestamp for the availability path (`YYYY-MM-DDTHH:MM:SS`).
pub fn format_iso(t: NaiveDateTime) -> String {
    t.format(ISO_FORMAT).to_string()
}

/// Format a timestamp for the station update request
/// (`YYYY-MM-DD HH:MM:SS.mmm`).
pub fn format_update_stamp(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Parse a search date (`YYYY-MM-DD`).
pub fn parse_search_date(s: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| TimeError::new(s, "expected YYYY-MM-DD"))
}

/// Parse a travel duration given as `H:MM` (hours may exceed 23).
pub fn parse_hhmm_duration(s: &str) -> Result<Duration, TimeError> {
    let (hours, mins) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| TimeError::new(s, "expected H:MM"))?;

    let hours: i64 = hours
        .parse()
        .map_err(|_| TimeError::new(s, "hours must be a number"))?;
    let mins: i64 = mins
        .parse()
        .map_err(|_| TimeError::new(s, "minutes must be a number"))?;

    if hours < 0 || !(0..60).contains(&mins) {
        return Err(TimeError::new(s, "out of range"));
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(mins))
        .and_then(Duration::try_minutes)
        .ok_or_else(|| TimeError::new(s, "out of range"))
}
