//! Cooperative acquisition tick scheduling.
//!
//! An explicit polling timer instead of a callback registration: the render
//! loop asks whether a tick is due and how long until the next one, and runs
//! the tick body itself. Single-threaded by contract; nothing here may be
//! driven from a second thread without external synchronization.

use embassy_time::{Duration, Instant};

/// Periodic tick timer for the acquisition pipeline.
///
/// Two states: idle (before [`start`](Self::start)) and running. Once
/// running it never stops.
pub struct AcquisitionScheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl AcquisitionScheduler {
    /// Create an idle scheduler with a period of `1000 / sampling_rate_hz`
    /// milliseconds.
    pub fn new(sampling_rate_hz: u32) -> Self {
        let period_ms = (1000 / sampling_rate_hz.max(1)).max(1) as u64;
        Self {
            period: Duration::from_millis(period_ms),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Begin ticking; the first tick comes due one period after `now`.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when a tick is due at `now`, rescheduling the next tick
    /// one period after the fire time.
    ///
    /// A late poll produces one late tick, never a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time until the next tick comes due, or [`Duration::MAX`] while idle.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) if due > now => due - now,
            Some(_) => Duration::from_ticks(0),
            None => Duration::MAX,
        }
    }
}
