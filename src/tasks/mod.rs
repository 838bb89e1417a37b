//! Background tasks module
//! 
//! This module contains the countdown timer and the task that drives it.

pub mod countdown_timer;

// Re-export main types
pub use countdown_timer::{
    CountdownSettings, CountdownTimer, DEFAULT_PERIOD, DEFAULT_TERMINAL_MESSAGE,
};
