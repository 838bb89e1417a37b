//! Match Countdown - A cancellable countdown to a scheduled match
//! 
//! This library renders the time left before a target instant on a display
//! surface once per second, then shows a terminal message once the instant
//! has passed and stops for good.

pub mod clock;
pub mod config;
pub mod error;
pub mod state;
pub mod surfaces;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use clock::{Clock, MonotonicClock, SystemClock};
pub use config::Config;
pub use error::{CountdownError, SurfaceError};
pub use state::{Remaining, RunState, StopReason, TargetInstant, TimerSnapshot};
pub use surfaces::DisplaySurface;
pub use tasks::{CountdownSettings, CountdownTimer};
pub use utils::signals::shutdown_signal;
