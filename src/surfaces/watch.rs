//! Display surface backed by a tokio watch channel

use tokio::sync::watch;

use crate::error::SurfaceError;

use super::DisplaySurface;

/// Publishes the latest text to any number of watchers, such as a UI label.
///
/// Once every receiver is dropped the surface counts as torn down.
#[derive(Debug)]
pub struct WatchSurface {
    tx: watch::Sender<String>,
}

impl WatchSurface {
    /// Create a surface together with its first receiver
    pub fn channel() -> (Self, watch::Receiver<String>) {
        let (tx, rx) = watch::channel(String::new());
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl DisplaySurface for WatchSurface {
    fn write_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.tx
            .send(text.to_string())
            .map_err(|_| SurfaceError::Detached)
    }

    fn is_attached(&self) -> bool {
        !self.tx.is_closed()
    }
}
