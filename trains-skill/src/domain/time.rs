//! Schedule time handling.
//!
//! NJ Transit reports stop times as local wall-clock timestamps such as
//! `11-Dec-2018 01:30:00 AM`. The engine works on `NaiveDateTime` values in
//! the network's local time zone; callers holding an instant (the voice
//! platform sends UTC) convert it with [`to_network_time`].

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Format used by the schedule feed for every timestamp.
pub const NJT_TIMESTAMP_FORMAT: &str = "%d-%b-%Y %I:%M:%S %p";

/// Time zone the schedule feed reports wall-clock times in.
pub const NETWORK_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: String,
}

/// Parse a feed timestamp (`11-Dec-2018 01:30:00 AM`).
///
/// Surrounding whitespace is ignored; the feed pads some elements.
///
/// # Examples
///
/// ```
/// use trains_skill::domain::parse_njt_timestamp;
/// use chrono::Timelike;
///
/// let t = parse_njt_timestamp("11-Dec-2018 01:30:00 PM").unwrap();
/// assert_eq!(t.hour(), 13);
/// assert_eq!(t.minute(), 30);
///
/// assert!(parse_njt_timestamp("2018-12-11 13:30").is_err());
/// ```
pub fn parse_njt_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    let trimmed = s.trim();
    NaiveDateTime::parse_from_str(trimmed, NJT_TIMESTAMP_FORMAT).map_err(|e| TimeError {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// Format a time the way the feed does.
pub fn format_njt_timestamp(t: NaiveDateTime) -> String {
    t.format(NJT_TIMESTAMP_FORMAT).to_string()
}

/// Convert an instant to wall-clock time on the network.
pub fn to_network_time(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&NETWORK_TIME_ZONE).naive_local()
}
