//! Decomposition of the time left into hours, minutes and seconds

use std::fmt;

use chrono::TimeDelta;
use serde::Serialize;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Time left before the target, truncated to whole seconds.
///
/// Hours are not wrapped into days: 36 hours renders as `36h 0m 0s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    /// Decompose a positive delta. Returns `None` once the target is reached.
    pub fn from_delta(delta: TimeDelta) -> Option<Self> {
        if delta <= TimeDelta::zero() {
            return None;
        }

        // num_seconds truncates toward zero, which is floor for positive deltas
        let total = u64::try_from(delta.num_seconds()).ok()?;
        Some(Self::from_seconds(total))
    }

    /// Decompose a whole number of seconds
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * SECONDS_PER_HOUR + self.minutes * SECONDS_PER_MINUTE + self.seconds
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}
