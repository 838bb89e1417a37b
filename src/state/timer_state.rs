//! Run state and observable snapshot of a countdown

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a countdown stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The target instant was reached and the terminal message was shown
    Elapsed,
    /// `stop()` was called, or the timer was dropped, before the target
    Cancelled,
}

/// Lifecycle of a countdown. `Active` only ever moves to `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum RunState {
    Active,
    Stopped(StopReason),
}

impl RunState {
    /// Check if recomputation is still scheduled
    pub fn is_active(&self) -> bool {
        matches!(self, RunState::Active)
    }

    /// Check if the countdown has stopped for any reason
    pub fn is_stopped(&self) -> bool {
        !self.is_active()
    }

    /// Get the stop reason, if stopped
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            RunState::Active => None,
            RunState::Stopped(reason) => Some(*reason),
        }
    }
}

/// Point-in-time view of a countdown, published to subscribers after every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    #[serde(flatten)]
    pub state: RunState,
    pub target: DateTime<Utc>,
    /// Whole seconds left at the last recomputation
    pub remaining_seconds: Option<u64>,
    /// Text last rendered, whether or not the surface accepted it
    pub display: Option<String>,
}

impl TimerSnapshot {
    /// Create the snapshot of a countdown that has not rendered anything yet
    pub fn pending(target: DateTime<Utc>) -> Self {
        Self {
            state: RunState::Active,
            target,
            remaining_seconds: None,
            display: None,
        }
    }

    /// Get remaining seconds if the countdown is active
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.state.is_active() {
            self.remaining_seconds
        } else {
            None
        }
    }
}
