//! Time sources for the scheduler.
//!
//! Timestamps are offsets from the clock's own epoch, so a virtual clock can
//! start at zero and never has to fabricate an `Instant`.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Duration;

    /// Block the calling thread for `dur`. This is the scheduler's only
    /// blocking point.
    fn wait(&self, dur: Duration);
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn wait(&self, dur: Duration) {
        if !dur.is_zero() {
            std::thread::sleep(dur);
        }
    }
}

/// Deterministic clock: waiting jumps time forward instead of blocking.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Cell<Duration>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dur: Duration) {
        self.now.set(self.now.get() + dur);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn wait(&self, dur: Duration) {
        self.advance(dur);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/clock.rs"]
mod tests;
