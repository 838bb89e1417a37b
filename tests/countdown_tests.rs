//! Countdown behavior under simulated time
//!
//! Every test runs on a paused tokio clock with a `MonotonicClock` anchored at
//! a fixed wall instant, so renders land on exact second boundaries.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::sleep;

use match_countdown::{
    clock::{Clock, MonotonicClock},
    state::{RunState, StopReason, TargetInstant},
    surfaces::{MemoryLog, MemorySurface, WatchSurface},
    tasks::{CountdownSettings, CountdownTimer, DEFAULT_TERMINAL_MESSAGE},
};

// ============================================================================
// Helpers
// ============================================================================

fn origin() -> DateTime<Utc> {
    "2025-03-01T18:00:00Z".parse().unwrap()
}

fn target_in(seconds: i64) -> TargetInstant {
    TargetInstant::from_datetime(origin() + TimeDelta::seconds(seconds))
}

fn start(seconds: i64) -> (CountdownTimer, MemoryLog) {
    let (surface, log) = MemorySurface::new();
    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::anchored_at(origin()));
    let timer = CountdownTimer::start_with(
        target_in(seconds),
        surface,
        CountdownSettings::default(),
        clock,
    )
    .unwrap();
    (timer, log)
}

fn is_countdown_text(text: &str) -> bool {
    text.ends_with('s') && text.contains("h ") && text.contains("m ")
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test(start_paused = true)]
async fn first_render_happens_on_start() {
    let (timer, log) = start(3661);

    assert_eq!(log.writes(), vec!["1h 1m 1s"]);
    assert_eq!(timer.state(), RunState::Active);
}

#[tokio::test(start_paused = true)]
async fn renders_once_per_second() {
    let (_timer, log) = start(3661);

    sleep(Duration::from_millis(2_500)).await;

    assert_eq!(log.writes(), vec!["1h 1m 1s", "1h 1m 0s", "1h 0m 59s"]);
}

#[tokio::test(start_paused = true)]
async fn hours_are_not_capped_at_a_day() {
    let (_timer, log) = start(90_000);

    assert_eq!(log.current().as_deref(), Some("25h 0m 0s"));
}

// ============================================================================
// Elapse
// ============================================================================

#[tokio::test(start_paused = true)]
async fn past_target_only_shows_terminal_message() {
    let (mut timer, log) = start(-1);

    assert_eq!(timer.state(), RunState::Stopped(StopReason::Elapsed));
    assert_eq!(timer.wait().await, StopReason::Elapsed);

    sleep(Duration::from_secs(5)).await;

    assert_eq!(log.writes(), vec![DEFAULT_TERMINAL_MESSAGE]);
    assert!(!log.writes().iter().any(|text| is_countdown_text(text)));
}

#[tokio::test(start_paused = true)]
async fn terminal_message_is_written_exactly_once() {
    let (mut timer, log) = start(2);

    assert_eq!(timer.wait().await, StopReason::Elapsed);
    sleep(Duration::from_secs(10)).await;

    assert_eq!(
        log.writes(),
        vec!["0h 0m 2s", "0h 0m 1s", DEFAULT_TERMINAL_MESSAGE]
    );
    assert_eq!(timer.state(), RunState::Stopped(StopReason::Elapsed));
}

#[tokio::test(start_paused = true)]
async fn stop_after_elapse_does_not_rewrite() {
    let (mut timer, log) = start(1);

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(timer.stop(), RunState::Stopped(StopReason::Elapsed));

    assert_eq!(log.writes(), vec!["0h 0m 1s", DEFAULT_TERMINAL_MESSAGE]);
}

#[tokio::test(start_paused = true)]
async fn abandoned_wait_leaves_the_countdown_running() {
    let (mut timer, log) = start(5);

    let first = tokio::time::timeout(Duration::from_millis(1_500), timer.wait()).await;
    assert!(first.is_err());
    assert_eq!(timer.state(), RunState::Active);

    assert_eq!(timer.wait().await, StopReason::Elapsed);
    assert_eq!(
        log.writes(),
        vec!["0h 0m 5s", "0h 0m 4s", "0h 0m 3s", "0h 0m 2s", "0h 0m 1s", DEFAULT_TERMINAL_MESSAGE]
    );

    // A finished countdown keeps answering
    assert_eq!(timer.wait().await, StopReason::Elapsed);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn stop_prevents_further_writes() {
    let (mut timer, log) = start(3600);

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(log.writes().len(), 2);

    assert_eq!(timer.stop(), RunState::Stopped(StopReason::Cancelled));
    sleep(Duration::from_secs(7_200)).await;

    assert_eq!(log.writes(), vec!["1h 0m 0s", "0h 59m 59s"]);
    assert_eq!(timer.wait().await, StopReason::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_timer_stops_it() {
    let (timer, log) = start(3600);

    drop(timer);
    sleep(Duration::from_secs(10)).await;

    assert_eq!(log.writes(), vec!["1h 0m 0s"]);
}

// ============================================================================
// Surfaces and snapshots
// ============================================================================

#[tokio::test(start_paused = true)]
async fn detached_surface_skips_writes_but_keeps_counting() {
    let (timer, log) = start(10);
    let mut snapshots = timer.subscribe();
    snapshots.borrow_and_update();

    log.detach();
    sleep(Duration::from_millis(1_500)).await;

    assert!(snapshots.has_changed().unwrap());
    let snapshot = snapshots.borrow_and_update().clone();
    assert_eq!(snapshot.remaining_seconds(), Some(9));
    assert_eq!(snapshot.display.as_deref(), Some("0h 0m 9s"));
    assert_eq!(log.writes(), vec!["0h 0m 10s"]);
}

#[tokio::test(start_paused = true)]
async fn snapshots_follow_the_countdown() {
    let (mut timer, _log) = start(2);
    let snapshot = timer.snapshot();

    assert_eq!(snapshot.state, RunState::Active);
    assert_eq!(snapshot.target, origin() + TimeDelta::seconds(2));
    assert_eq!(snapshot.remaining_seconds(), Some(2));

    timer.wait().await;

    let snapshot = timer.snapshot();
    assert_eq!(snapshot.state, RunState::Stopped(StopReason::Elapsed));
    assert_eq!(snapshot.remaining_seconds(), None);
    assert_eq!(snapshot.display.as_deref(), Some(DEFAULT_TERMINAL_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn watch_surface_feeds_a_label() {
    let (surface, mut label) = WatchSurface::channel();
    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::anchored_at(origin()));
    let settings = CountdownSettings {
        terminal_message: "Kickoff!".to_string(),
        period: Duration::from_millis(500),
    };

    let mut timer = CountdownTimer::start_with(target_in(1), surface, settings, clock).unwrap();
    assert_eq!(*label.borrow_and_update(), "0h 0m 1s");

    sleep(Duration::from_millis(600)).await;
    assert_eq!(*label.borrow_and_update(), "0h 0m 0s");

    assert_eq!(timer.wait().await, StopReason::Elapsed);
    assert_eq!(*label.borrow_and_update(), "Kickoff!");
}
