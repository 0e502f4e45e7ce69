//! Conversion between `chrono` instants and Unix timestamps in milliseconds.

use chrono::{DateTime, TimeZone, Utc};

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Instant `millis` milliseconds after 1970-01-01T00:00:00Z.
///
/// Returns `None` if the result is outside the range chrono can represent.
#[must_use]
pub fn from_unix_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Fractional variant of [`from_unix_millis`]; the fraction is kept down to nanoseconds.
///
/// Returns `None` for NaN, infinities and out-of-range values.
#[must_use]
pub fn from_unix_millis_f64(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    let whole = millis.floor();
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }
    let nanos = ((millis - whole) * NANOS_PER_MILLI).round() as i64;
    from_unix_millis(whole as i64)?.checked_add_signed(chrono::Duration::nanoseconds(nanos))
}

/// Milliseconds between 1970-01-01T00:00:00Z and `date`, truncated toward zero.
#[must_use]
pub fn to_unix_millis<Tz: TimeZone>(date: &DateTime<Tz>) -> i64 {
    // timestamp_millis floors, which is off by one before the epoch
    let nanos = i128::from(date.timestamp()) * NANOS_PER_SEC
        + i128::from(date.timestamp_subsec_nanos());
    (nanos / 1_000_000) as i64
}
