// src/pipeline/schedule.rs

//! Periodic check loop with a runtime deadline.
//!
//! One check runs immediately at startup, then one per interval tick.
//! Before each ticked check the elapsed time is compared against the
//! maximum runtime; once it is reached the loop stops without checking.
//! An external shutdown future stops the loop between checks.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::pipeline::check::SeatMonitor;

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Starting,
    Running,
    Stopped,
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    MaxRuntime,
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxRuntime => f.write_str("maximum runtime reached"),
            Self::Interrupted => f.write_str("interrupted"),
        }
    }
}

/// Totals reported when the loop ends.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub checks: u64,
    pub reason: StopReason,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Drives a [`SeatMonitor`] on a fixed interval until the deadline.
pub struct Scheduler {
    interval: Duration,
    max_runtime: Duration,
    state: RunState,
    check_count: u64,
}

impl Scheduler {
    pub fn new(interval: Duration, max_runtime: Duration) -> Self {
        Self {
            interval,
            max_runtime,
            state: RunState::Starting,
            check_count: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn check_count(&self) -> u64 {
        self.check_count
    }

    /// Run until the maximum runtime elapses or `shutdown` resolves.
    ///
    /// A check in progress is always awaited to completion; `shutdown`
    /// is observed while waiting for the next tick.
    pub async fn run<F>(&mut self, monitor: &SeatMonitor, shutdown: F) -> RunSummary
    where
        F: Future,
    {
        tokio::pin!(shutdown);

        let started = Instant::now();
        let started_at = Utc::now();
        self.state = RunState::Starting;
        self.check_count = 0;

        self.cycle(monitor).await;

        let mut ticker = interval_at(started + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.state = RunState::Running;

        let reason = loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break StopReason::Interrupted,
                _ = ticker.tick() => {
                    if started.elapsed() >= self.max_runtime {
                        break StopReason::MaxRuntime;
                    }
                    self.cycle(monitor).await;
                }
            }
        };

        drop(ticker);
        self.state = RunState::Stopped;

        RunSummary {
            checks: self.check_count,
            reason,
            started_at,
            ended_at: Utc::now(),
        }
    }

    /// Run one check and count it. Errors end the cycle, never the loop.
    async fn cycle(&mut self, monitor: &SeatMonitor) {
        if let Err(e) = monitor.check().await {
            log::error!("Check failed: {}", e);
        }
        self.check_count += 1;
        log::debug!("Completed check #{}", self.check_count);
    }
}
