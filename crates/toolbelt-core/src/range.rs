//! Validated, immutable date/time range.
//!
//! Every instance satisfies `start <= end`. Derived ranges (new start, new end,
//! new duration, canonical day/week/month ranges) go back through
//! [`DateTimeRange::create`], so they fail with the same errors as direct
//! construction and never modify the receiver.

use crate::validation::{RangeSide, ValidationError};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// A `[start, end]` pair of offset-aware instants with `start <= end`.
///
/// Equality and hashing compare the instants, so the same moment written with
/// two different offsets is equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl DateTimeRange {
    /// Build a range, rejecting `start > end`. Equal instants are a valid zero-length range.
    pub fn create(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::StartAfterEnd);
        }
        Ok(Self { start, end })
    }

    /// Parse both ends against an ordered list of `strftime` patterns.
    ///
    /// For each value the patterns are tried in order and the first one that
    /// matches wins. Patterns with `%z`/`%:z` keep the parsed offset, patterns
    /// without one are read as UTC, and date-only patterns give midnight UTC.
    /// Parsing never depends on the process locale.
    ///
    /// The start is validated before the end.
    pub fn parse(start: &str, end: &str, formats: &[&str]) -> Result<Self, ValidationError> {
        let start = parse_instant(start, formats, RangeSide::Start)?;
        let end = parse_instant(end, formats, RangeSide::End)?;
        Self::create(start, end)
    }

    #[must_use]
    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Format the start with a `strftime` pattern, or `None` if the pattern is invalid.
    #[must_use]
    pub fn start_formatted(&self, format: &str) -> Option<String> {
        format_instant(&self.start, format)
    }

    /// Format the end with a `strftime` pattern, or `None` if the pattern is invalid.
    #[must_use]
    pub fn end_formatted(&self, format: &str) -> Option<String> {
        format_instant(&self.end, format)
    }

    /// Same end, new start.
    pub fn with_new_start(&self, start: DateTime<FixedOffset>) -> Result<Self, ValidationError> {
        Self::create(start, self.end)
    }

    /// Same start, new end.
    pub fn with_new_end(&self, end: DateTime<FixedOffset>) -> Result<Self, ValidationError> {
        Self::create(self.start, end)
    }

    /// Same start, end moved to `start + duration`.
    pub fn with_duration(&self, duration: Duration) -> Result<Self, ValidationError> {
        let end = self
            .start
            .checked_add_signed(duration)
            .ok_or(ValidationError::OutOfRange)?;
        Self::create(self.start, end)
    }

    /// The 24 hours starting at `day`.
    pub fn one_day(day: DateTime<FixedOffset>) -> Result<Self, ValidationError> {
        Self::starting_at(day, Duration::days(1))
    }

    /// The 7 days starting at `start_day`.
    pub fn one_week(start_day: DateTime<FixedOffset>) -> Result<Self, ValidationError> {
        Self::starting_at(start_day, Duration::days(7))
    }

    /// From one calendar month before `now` up to `now`.
    ///
    /// The day is clamped to the end of the shorter month, so March 31 goes
    /// back to February 28/29. `None` uses the current UTC time.
    pub fn previous_month(now: Option<DateTime<FixedOffset>>) -> Result<Self, ValidationError> {
        let now = now.unwrap_or_else(utc_now);
        let start = now
            .checked_sub_months(Months::new(1))
            .ok_or(ValidationError::OutOfRange)?;
        Self::create(start, now)
    }

    /// From `days` days before `now` up to `now`. `None` uses the current UTC time.
    ///
    /// A negative `days` puts the start after `now` and fails like any other
    /// inverted range.
    pub fn previous_days(
        days: i64,
        now: Option<DateTime<FixedOffset>>,
    ) -> Result<Self, ValidationError> {
        let now = now.unwrap_or_else(utc_now);
        let start = Duration::try_days(days)
            .and_then(|d| now.checked_sub_signed(d))
            .ok_or(ValidationError::OutOfRange)?;
        Self::create(start, now)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole minutes, rounded to nearest with ties away from zero.
    #[must_use]
    pub fn duration_in_minutes(&self) -> i64 {
        let d = self.duration();
        let seconds = d.num_seconds() as f64 + f64::from(d.subsec_nanos()) / 1e9;
        (seconds / 60.0).round() as i64
    }

    fn starting_at(
        start: DateTime<FixedOffset>,
        length: Duration,
    ) -> Result<Self, ValidationError> {
        let end = start
            .checked_add_signed(length)
            .ok_or(ValidationError::OutOfRange)?;
        Self::create(start, end)
    }
}

impl fmt::Display for DateTimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Start date/time: {} - End date/time: {}",
            self.start, self.end
        )
    }
}

fn utc_now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

fn parse_instant(
    value: &str,
    formats: &[&str],
    side: RangeSide,
) -> Result<DateTime<FixedOffset>, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyDateTime(side));
    }

    formats
        .iter()
        .find_map(|format| parse_with_format(value, format))
        .ok_or(ValidationError::UnrecognizedFormat(side))
}

fn parse_with_format(value: &str, format: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_str(value, format) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(value, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn format_instant(instant: &DateTime<FixedOffset>, format: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    Some(instant.format_with_items(items.into_iter()).to_string())
}
