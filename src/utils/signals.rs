//! Signal handling for graceful shutdown

use std::future::Future;

use signal_hook_tokio::Signals;
use futures::{future, stream::StreamExt};
use tracing::{info, warn};

/// Wait for shutdown signals (SIGTERM, SIGINT) and return the one received
pub async fn shutdown_signal() -> std::io::Result<i32> {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])?;
    let handle = signals.handle();

    let signal = signals.next().await;
    handle.close();

    match signal {
        Some(signal) => {
            info!("Received signal: {}", signal);
            Ok(signal)
        }
        None => Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "Signal stream closed unexpectedly",
        )),
    }
}

/// Resolve once `signal` delivers a shutdown signal.
///
/// If listening fails, log it and never resolve, so a running countdown is
/// left to finish on its own.
pub async fn shutdown_requested<F>(signal: F)
where
    F: Future<Output = std::io::Result<i32>>,
{
    if let Err(e) = signal.await {
        warn!("Cannot listen for shutdown signals: {}", e);
        future::pending::<()>().await;
    }
}
