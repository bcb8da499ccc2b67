//! The cancellable periodic loop that drives the radar.
//!
//! A [`tokio::time::interval`] fires the tick at a fixed cadence. Ticks
//! are strictly serialized: the loop only asks for the next fire after
//! the current tick has completed, and
//! [`MissedTickBehavior::Delay`] absorbs fires that elapsed while a tick
//! was still running -- a late tick starts immediately after the current
//! one finishes and is never enqueued twice.
//!
//! The loop stops cleanly through [`RadarControl::request_stop`] or an
//! optional tick limit; a tick that logged errors still counts as
//! complete and never terminates the loop.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::snapshot::{RadarSnapshot, SnapshotHandle};
use crate::tick::{self, SimulationState, TickSummary};

/// Reason why the radar loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// Reached the configured tick limit.
    MaxTicksReached,
    /// A stop was requested through the control handle.
    StopRequested,
}

/// Result of a radar loop run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Why the loop ended.
    pub end_reason: RunEndReason,
    /// Ticks executed during this run.
    pub total_ticks: u64,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
}

/// Shared control state for the radar loop.
///
/// Wrapped in an [`std::sync::Arc`] by callers and shared between the
/// loop task and whoever handles shutdown. The stop flag is atomic so
/// requesting a stop never blocks.
#[derive(Debug)]
pub struct RadarControl {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,
    /// Real-time milliseconds between ticks.
    tick_interval_ms: u64,
    /// Maximum number of ticks (0 = unlimited).
    max_ticks: u64,
}

impl RadarControl {
    /// Create a control handle for the given pacing and bounds.
    pub const fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            tick_interval_ms,
            max_ticks,
        }
    }

    /// Request a clean stop; the loop exits before its next tick.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// The configured tick interval in milliseconds.
    pub const fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// The configured tick limit (0 = unlimited).
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// Whether the given completed-tick count hits the limit.
    pub const fn tick_limit_reached(&self, total_ticks: u64) -> bool {
        self.max_ticks > 0 && total_ticks >= self.max_ticks
    }
}

/// Run the radar loop until stopped or the tick limit is reached.
///
/// After every completed tick the post-tick read models are published
/// into `snapshots`, so queriers always observe a fully-applied tick.
/// The first tick fires immediately; subsequent ticks follow the
/// configured interval.
pub async fn run_radar(
    state: &mut SimulationState,
    control: &RadarControl,
    snapshots: &SnapshotHandle,
) -> RunOutcome {
    let interval_ms = control.tick_interval_ms().max(1);
    let mut interval =
        tokio::time::interval(std::time::Duration::from_millis(interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval_ms,
        max_ticks = control.max_ticks(),
        "Radar loop starting"
    );

    let mut total_ticks: u64 = 0;
    let mut final_summary: Option<TickSummary> = None;

    loop {
        interval.tick().await;

        if control.is_stop_requested() {
            info!(total_ticks, "Stop requested, radar loop exiting");
            return RunOutcome {
                end_reason: RunEndReason::StopRequested,
                total_ticks,
                final_summary,
            };
        }

        let summary = tick::run_tick(state, Utc::now());
        total_ticks = total_ticks.saturating_add(1);

        snapshots
            .publish(RadarSnapshot::capture(state, summary.timestamp))
            .await;
        final_summary = Some(summary);

        if control.tick_limit_reached(total_ticks) {
            info!(total_ticks, "Tick limit reached, radar loop exiting");
            return RunOutcome {
                end_reason: RunEndReason::MaxTicksReached,
                total_ticks,
                final_summary,
            };
        }
    }
}
