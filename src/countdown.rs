//! Level countdown module.
//!
//! This module contains the one-second countdown that drives a level's timer. The countdown is a
//! plain handle: owning it means a countdown is pending, dropping it cancels it.

use std::time::{Duration, Instant};

/// Interval between two countdown ticks.
pub(crate) const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Pending one-second countdown.
///
/// This structure remembers when the last tick was delivered so the owner can ask how many ticks
/// have become due since, no matter how irregularly it polls.
#[derive(Debug)]
pub(crate) struct Countdown {
    /// Timestamp of the last delivered tick.
    ///
    /// This field starts at the moment the countdown was armed and moves forward by exactly one
    /// [`TICK_INTERVAL`] per delivered tick, so late polls never lose time.
    last_tick_time: Instant,
}

impl Countdown {
    /// Arms a new countdown whose first tick becomes due one interval after `now`.
    pub(crate) const fn start(now: Instant) -> Self {
        Self {
            last_tick_time: now,
        }
    }

    /// Returns how many ticks became due up to `now` and consumes them.
    pub(crate) fn due_ticks(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;

        while now.saturating_duration_since(self.last_tick_time) >= TICK_INTERVAL {
            self.last_tick_time += TICK_INTERVAL;
            ticks += 1;
        }

        ticks
    }
}
