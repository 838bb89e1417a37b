//! Display surfaces module
//! 
//! A display surface is wherever the countdown text ends up: a terminal, a
//! stream of JSON lines, a watch channel feeding a UI label, or memory.
//! The countdown is handed a surface; it never looks one up itself.

pub mod json_lines;
pub mod memory;
pub mod terminal;
pub mod watch;

use crate::error::SurfaceError;

// Re-export main types
pub use json_lines::JsonLinesSurface;
pub use memory::{MemoryLog, MemorySurface};
pub use terminal::{LineMode, TerminalSurface};
pub use watch::WatchSurface;

/// Writable text target updated on every tick
pub trait DisplaySurface: Send + 'static {
    /// Replace the text currently shown
    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Check if the surface can still be written to
    fn is_attached(&self) -> bool {
        true
    }

    /// Called once with the terminal message. Defaults to a regular write.
    fn write_final(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.write_text(text)
    }
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        (**self).write_text(text)
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn write_final(&mut self, text: &str) -> Result<(), SurfaceError> {
        (**self).write_final(text)
    }
}
