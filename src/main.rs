//! Match Countdown - A cancellable countdown to a scheduled match
//!
//! This is the main entry point for the match-countdown command.

use std::sync::Arc;
use tracing::info;

use match_countdown::{
    clock::SystemClock,
    config::Config,
    surfaces::{DisplaySurface, JsonLinesSurface, LineMode, TerminalSurface},
    tasks::CountdownTimer,
    utils::{shutdown_requested, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries the countdown
    tracing_subscriber::fmt()
        .with_env_filter(format!("match_countdown={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting match-countdown v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: target={}, period={}ms, json={}",
          config.target, config.period_ms, config.json);

    let surface: Box<dyn DisplaySurface> = if config.json {
        Box::new(JsonLinesSurface::stdout())
    } else if config.append {
        Box::new(TerminalSurface::new(std::io::stdout(), LineMode::Append))
    } else {
        Box::new(TerminalSurface::stdout())
    };

    let mut timer = CountdownTimer::start_with(
        config.target,
        surface,
        config.settings(),
        Arc::new(SystemClock),
    )?;

    let interrupted = tokio::select! {
        reason = timer.wait() => {
            info!("Countdown finished: {:?}", reason);
            false
        }
        _ = shutdown_requested(shutdown_signal()) => true,
    };

    if interrupted {
        info!("Shutdown signal received, stopping countdown");
        timer.stop();
    }

    info!("match-countdown exited");
    Ok(())
}
