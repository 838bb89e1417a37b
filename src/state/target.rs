//! Validated target instant of a countdown

use std::{fmt, str::FromStr};

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc,
};

use crate::error::CountdownError;

/// Layouts accepted for timestamps without an offset, read as local time
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Layouts accepted for timestamps with minute precision, read as local time
const NAIVE_MINUTE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Absolute, timezone-aware instant a countdown runs towards.
///
/// The only way to get one is through validation, so a countdown can never
/// start from an unparsable timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInstant {
    at: DateTime<FixedOffset>,
}

impl TargetInstant {
    /// Parse a timestamp.
    ///
    /// Accepts RFC 3339 with an offset, ISO-8601 without an offset (local
    /// time), or a bare `YYYY-MM-DD` date (UTC midnight).
    pub fn parse(input: &str) -> Result<Self, CountdownError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "timestamp is empty"));
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self { at });
        }

        let naive = NAIVE_FORMATS
            .iter()
            .chain(NAIVE_MINUTE_FORMATS.iter())
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok());

        if let Some(naive) = naive {
            return match Local.from_local_datetime(&naive) {
                LocalResult::Single(at) => Ok(Self::from_datetime(at)),
                LocalResult::Ambiguous(_, _) => {
                    Err(invalid(input, "local time is ambiguous, add an offset"))
                }
                LocalResult::None => Err(invalid(input, "local time does not exist")),
            };
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|midnight| Self::from_datetime(midnight.and_utc()))
                .ok_or_else(|| invalid(input, "date has no midnight"));
        }

        Err(invalid(input, "expected an ISO-8601 timestamp"))
    }

    /// Wrap an already known instant
    pub fn from_datetime<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        Self { at: at.fixed_offset() }
    }

    /// The instant, with the offset it was given in
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.at
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.at.with_timezone(&Utc)
    }

    /// Signed time left between `now` and the target
    pub fn remaining_at(&self, now: DateTime<Utc>) -> TimeDelta {
        self.utc() - now
    }
}

impl FromStr for TargetInstant {
    type Err = CountdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.at.to_rfc3339())
    }
}

fn invalid(input: &str, reason: &str) -> CountdownError {
    CountdownError::InvalidTarget {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
