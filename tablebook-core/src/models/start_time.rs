//! Booking start time
//!
//! A start time is always a real instant. Missing values, text that does not
//! parse and epoch offsets outside chrono's range are rejected before a
//! `StartTime` exists.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use super::ValidationError;

const FIELD: &str = "start time";

/// Naive layouts accepted from form input, read as UTC.
///
/// `T`-separated forms are what HTML `datetime-local` inputs submit.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M %p",
];

/// Validated start instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StartTime(DateTime<Utc>);

impl StartTime {
    /// Wrap an instant that may be absent.
    pub fn new(value: Option<DateTime<Utc>>) -> Result<Self, ValidationError> {
        value
            .map(Self)
            .ok_or(ValidationError::Missing { field: FIELD })
    }

    /// Parse user-supplied text.
    ///
    /// Accepts RFC 3339 and the naive layouts in [`NAIVE_FORMATS`].
    ///
    /// # Example
    /// ```
    /// use tablebook_core::models::StartTime;
    ///
    /// assert!(StartTime::parse("2024-04-03T18:30:00Z").is_ok());
    /// assert!(StartTime::parse("2024-04-03 18:30").is_ok());
    /// assert!(StartTime::parse("next tuesday").is_err());
    /// assert!(StartTime::parse("").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Missing { field: FIELD });
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| ValidationError::Unparseable {
                field: FIELD,
                value: trimmed.to_owned(),
            })
    }

    /// Build from milliseconds since the Unix epoch.
    pub fn from_timestamp_millis(millis: i64) -> Result<Self, ValidationError> {
        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or(ValidationError::OutOfRange {
                field: FIELD,
                value: millis,
            })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Long-date, short-time rendering in UTC, e.g. `April 3rd 2024, 6:30 pm`.
    pub fn format_long(&self) -> String {
        self.format_long_in(&Utc)
    }

    /// Same rendering as [`StartTime::format_long`], in the given zone.
    pub fn format_long_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let local = self.0.with_timezone(tz);
        let day = local.day();
        format!(
            "{} {}{} {}",
            local.format("%B"),
            day,
            ordinal_suffix(day),
            local.format("%Y, %-I:%M %P"),
        )
    }
}

impl From<StartTime> for DateTime<Utc> {
    fn from(value: StartTime) -> Self {
        value.0
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
