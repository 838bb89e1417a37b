//! In-memory display surface

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use crate::error::SurfaceError;

use super::DisplaySurface;

#[derive(Debug, Default)]
struct Shared {
    writes: Mutex<Vec<String>>,
    detached: AtomicBool,
}

/// Records every write. Keep the [`MemoryLog`] to read them back.
#[derive(Debug)]
pub struct MemorySurface {
    shared: Arc<Shared>,
}

/// Read side of a [`MemorySurface`]
#[derive(Debug, Clone)]
pub struct MemoryLog {
    shared: Arc<Shared>,
}

impl MemorySurface {
    pub fn new() -> (Self, MemoryLog) {
        let shared = Arc::new(Shared::default());
        (
            Self { shared: Arc::clone(&shared) },
            MemoryLog { shared },
        )
    }
}

impl MemoryLog {
    /// Every text written so far, oldest first
    pub fn writes(&self) -> Vec<String> {
        self.shared
            .writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The text currently shown
    pub fn current(&self) -> Option<String> {
        self.writes().pop()
    }

    /// Tear the surface down; later writes fail with `Detached`
    pub fn detach(&self) {
        self.shared.detached.store(true, Ordering::SeqCst);
    }
}

impl DisplaySurface for MemorySurface {
    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        if !self.is_attached() {
            return Err(SurfaceError::Detached);
        }

        self.shared
            .writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }

    fn is_attached(&self) -> bool {
        !self.shared.detached.load(Ordering::SeqCst)
    }
}
