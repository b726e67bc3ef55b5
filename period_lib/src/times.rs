use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// A point in time.  All periods are expressed in UTC, so that comparing
/// and shifting timestamps never depends on the local timezone.
pub type Timestamp = DateTime<Utc>;

/// A signed amount of elapsed time.
pub type Duration = chrono::Duration;

/// Shift a timestamp forward (or backward for negative durations).
pub(crate) fn add(ts: &Timestamp, duration: &Duration) -> Result<Timestamp> {
    ts.checked_add_signed(*duration).ok_or(Error::TimestampOverflow)
}

/// Shift a timestamp backward (or forward for negative durations).
pub(crate) fn sub(ts: &Timestamp, duration: &Duration) -> Result<Timestamp> {
    ts.checked_sub_signed(*duration).ok_or(Error::TimestampOverflow)
}

/// Number of seconds in the duration, including the fractional part.
pub fn as_seconds(duration: &Duration) -> f64 {
    duration.num_seconds() as f64
        + f64::from(duration.subsec_nanos()) / 1_000_000_000.0
}

/// Midnight UTC at the start of the given day.
pub(crate) fn midnight(year: i32, month: u32, day: u32) -> Result<Timestamp> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .ok_or(Error::InvalidDate { year, month, day })
}
