//! Countdown timer background task

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    error::CountdownError,
    state::{Remaining, RunState, StopReason, TargetInstant, TimerSnapshot},
    surfaces::DisplaySurface,
};

/// Text shown once the target instant has passed.
///
/// The Spanish match page shows `¡El partido ha comenzado!`; pass it through
/// [`CountdownSettings::terminal_message`] to keep that wording.
pub const DEFAULT_TERMINAL_MESSAGE: &str = "The match has started!";

/// Time between two recomputations
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Tunables of a countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSettings {
    pub terminal_message: String,
    pub period: Duration,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            terminal_message: DEFAULT_TERMINAL_MESSAGE.to_string(),
            period: DEFAULT_PERIOD,
        }
    }
}

/// What a single recomputation led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Continue,
    Stopped(StopReason),
}

/// Surface and run state live behind one lock, so a write can never slip in
/// after the state has moved to `Stopped`.
struct Inner {
    surface: Box<dyn DisplaySurface>,
    state: RunState,
}

struct Shared {
    target: TargetInstant,
    terminal_message: String,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl Shared {
    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("Countdown state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Recompute the time left and render it
    fn tick(&self) -> Tick {
        let mut inner = self.lock_inner();
        if let RunState::Stopped(reason) = inner.state {
            return Tick::Stopped(reason);
        }

        let now = self.clock.now();
        match Remaining::from_delta(self.target.remaining_at(now)) {
            Some(remaining) => {
                let text = remaining.to_string();
                debug!("Countdown tick: {}", text);

                if let Err(e) = inner.surface.write_text(&text) {
                    warn!("Skipping countdown render: {}", e);
                }

                self.publish(inner.state, Some(remaining.total_seconds()), text);
                Tick::Continue
            }
            None => {
                let state = RunState::Stopped(StopReason::Elapsed);
                inner.state = state;
                info!("Countdown to {} elapsed", self.target);

                if let Err(e) = inner.surface.write_final(&self.terminal_message) {
                    warn!("Failed to render terminal message: {}", e);
                }

                self.publish(state, None, self.terminal_message.clone());
                Tick::Stopped(StopReason::Elapsed)
            }
        }
    }

    /// Move to `Stopped(Cancelled)` unless already stopped
    fn cancel(&self) -> RunState {
        let mut inner = self.lock_inner();
        if inner.state.is_stopped() {
            return inner.state;
        }

        inner.state = RunState::Stopped(StopReason::Cancelled);
        info!("Countdown to {} cancelled", self.target);

        self.snapshot_tx.send_modify(|snapshot| {
            snapshot.state = inner.state;
            snapshot.remaining_seconds = None;
        });
        inner.state
    }

    fn state(&self) -> RunState {
        self.lock_inner().state
    }

    fn publish(&self, state: RunState, remaining_seconds: Option<u64>, display: String) {
        self.snapshot_tx.send_replace(TimerSnapshot {
            state,
            target: self.target.utc(),
            remaining_seconds,
            display: Some(display),
        });
    }
}

/// Counts down to a target instant, rendering the time left on a display
/// surface once immediately and then once per period.
///
/// The periodic task belongs to this value: it is released on elapse, on
/// [`stop`](Self::stop), or when the timer is dropped.
pub struct CountdownTimer {
    shared: Arc<Shared>,
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<StopReason>>,
}

impl CountdownTimer {
    /// Start a countdown with default settings on the system clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S: DisplaySurface>(target: TargetInstant, surface: S) -> Result<Self, CountdownError> {
        Self::start_with(target, surface, CountdownSettings::default(), Arc::new(SystemClock))
    }

    /// Start a countdown.
    ///
    /// The first recomputation happens before this returns. If the target has
    /// already passed, the terminal message is shown and no task is spawned.
    pub fn start_with<S: DisplaySurface>(
        target: TargetInstant,
        surface: S,
        settings: CountdownSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CountdownError> {
        if settings.period.is_zero() {
            return Err(CountdownError::InvalidPeriod);
        }
        if !surface.is_attached() {
            return Err(CountdownError::SurfaceUnavailable);
        }

        info!("Starting countdown to {} (period {:?})", target, settings.period);

        let (snapshot_tx, _) = watch::channel(TimerSnapshot::pending(target.utc()));
        let shared = Arc::new(Shared {
            target,
            terminal_message: settings.terminal_message,
            clock,
            inner: Mutex::new(Inner {
                surface: Box::new(surface),
                state: RunState::Active,
            }),
            snapshot_tx,
        });

        let mut timer = Self {
            shared: Arc::clone(&shared),
            cancel_tx: None,
            handle: None,
        };

        if let Tick::Stopped(reason) = shared.tick() {
            debug!("Countdown stopped on first tick ({:?}), no task spawned", reason);
            return Ok(timer);
        }

        let (cancel_tx, cancel_rx) = oneshot::channel();
        timer.cancel_tx = Some(cancel_tx);
        timer.handle = Some(tokio::spawn(countdown_timer_task(
            shared,
            settings.period,
            cancel_rx,
        )));

        Ok(timer)
    }

    /// Stop the countdown. No write reaches the surface after this returns.
    ///
    /// Calling it again, or after the target elapsed, changes nothing.
    pub fn stop(&mut self) -> RunState {
        let state = self.shared.cancel();

        if let Some(cancel_tx) = self.cancel_tx.take() {
            // The task may already have finished on its own
            let _ = cancel_tx.send(());
        }

        state
    }

    pub fn state(&self) -> RunState {
        self.shared.state()
    }

    pub fn target(&self) -> TargetInstant {
        self.shared.target
    }

    /// Watch every change of the countdown
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> TimerSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Wait until the countdown stops, by elapsing or by being stopped.
    ///
    /// Cancel-safe: dropping this future leaves the countdown running and a
    /// later call picks the task up again.
    pub async fn wait(&mut self) -> StopReason {
        if let Some(handle) = self.handle.as_mut() {
            let result = handle.await;
            self.handle = None;

            if let Err(e) = result {
                error!("Countdown task failed: {}", e);
                // Whatever happened to the task, nothing may render anymore
                self.shared.cancel();
            }
        }

        // Without a task the countdown is always stopped: it elapsed on the
        // first tick, its task finished, or the failure above cancelled it
        self.shared
            .state()
            .stop_reason()
            .unwrap_or(StopReason::Cancelled)
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if self.state().is_active() {
            debug!("Countdown timer dropped while active, stopping");
        }
        self.stop();
    }
}

/// Background task that recomputes the countdown every `period` until it
/// elapses or is cancelled
async fn countdown_timer_task(
    shared: Arc<Shared>,
    period: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) -> StopReason {
    debug!("Starting countdown timer task");

    // The first recomputation already ran synchronously
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Tick::Stopped(reason) = shared.tick() {
                    debug!("Countdown timer task finished: {:?}", reason);
                    return reason;
                }
            }

            // Fires on stop() and when the timer is dropped
            _ = &mut cancel_rx => {
                debug!("Countdown timer task cancelled");
                return shared.cancel().stop_reason().unwrap_or(StopReason::Cancelled);
            }
        }
    }
}
