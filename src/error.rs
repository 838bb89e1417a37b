//! Error types for countdown construction and display surfaces

use thiserror::Error;

/// Errors raised while configuring or starting a countdown
#[derive(Error, Debug)]
pub enum CountdownError {
    /// The target timestamp could not be understood
    #[error("Invalid target timestamp {input:?}: {reason}")]
    InvalidTarget { input: String, reason: String },

    /// The display surface was already gone when the countdown started
    #[error("Display surface is not attached")]
    SurfaceUnavailable,

    /// A recomputation period of zero would spin forever
    #[error("Recomputation period must be greater than zero")]
    InvalidPeriod,
}

/// Errors raised by a single write to a display surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Nobody is looking at the surface anymore
    #[error("Display surface has been detached")]
    Detached,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
