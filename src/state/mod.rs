//! State management module
//! 
//! This module contains the countdown's target, its run state and the
//! decomposition of the time left.

pub mod remaining;
pub mod target;
pub mod timer_state;

// Re-export main types
pub use remaining::Remaining;
pub use target::TargetInstant;
pub use timer_state::{RunState, StopReason, TimerSnapshot};
