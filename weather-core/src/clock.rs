//! Live date/time readout, refreshed on a fixed period.
//!
//! The clock knows nothing about weather lookups: it only publishes
//! [`ClockReading`]s on a `watch` channel for whoever wants to redraw.

use chrono::{DateTime, Local, TimeZone};
use std::{fmt, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// Two-digit 24h `HH:MM`.
    pub time: String,
    /// e.g. `Mon Oct 19 2026`.
    pub date: String,
}

impl ClockReading {
    pub fn at<Tz>(now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            time: now.format("%H:%M").to_string(),
            date: now.format("%a %b %d %Y").to_string(),
        }
    }

    pub fn now() -> Self {
        Self::at(&Local::now())
    }
}

/// Background task publishing a fresh reading every period.
///
/// The task is aborted when the `Clock` is dropped, and stops by itself once
/// every receiver is gone.
#[derive(Debug)]
pub struct Clock {
    readings: watch::Receiver<ClockReading>,
    task: JoinHandle<()>,
}

impl Clock {
    /// Must be called from within a tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        Self::spawn_with(period, ClockReading::now)
    }

    /// A zero `period` falls back to [`DEFAULT_TICK`].
    pub fn spawn_with<F>(period: Duration, source: F) -> Self
    where
        F: Fn() -> ClockReading + Send + 'static,
    {
        let period = if period.is_zero() { DEFAULT_TICK } else { period };
        let (tx, rx) = watch::channel(source());

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // first tick is immediate and the initial reading is already published
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(source()).is_err() {
                    tracing::debug!("clock has no subscribers left, stopping");
                    break;
                }
            }
        });

        Self { readings: rx, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.readings.clone()
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.task.abort();
    }
}
