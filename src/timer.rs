//! Deadline and interval primitives driven by an externally supplied clock.
//!
//! Nothing here sleeps or spawns. Callers pass the current [`Instant`] and the
//! timers report what fell due, which keeps every timed transition testable
//! with synthetic instants. Dropping a timer is its cancellation.

use std::time::{Duration, Instant};

/// A one-shot point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Creates a deadline `delay` after `start`.
    pub fn after(start: Instant, delay: Duration) -> Self {
        Self { at: start + delay }
    }

    /// The instant the deadline fires.
    pub fn at(self) -> Instant {
        self.at
    }

    /// Returns `true` once `now` has reached the deadline.
    pub fn is_due(self, now: Instant) -> bool {
        now >= self.at
    }
}

/// A fixed-period repeating timer.
///
/// Firings are anchored on the start instant, so observing the timer late
/// reports every missed period instead of drifting.
#[derive(Clone, Debug)]
pub struct Interval {
    next: Instant,
    period: Duration,
}

impl Interval {
    /// Starts an interval whose first firing is one `period` after `start`.
    pub fn starting_at(start: Instant, period: Duration) -> Self {
        Self {
            next: start + period,
            period,
        }
    }

    /// Returns how many periods elapsed up to `now` and consumes them.
    pub fn poll(&mut self, now: Instant) -> u64 {
        if self.period.is_zero() {
            return 0;
        }

        let mut fired = 0;
        while now >= self.next {
            fired += 1;
            self.next += self.period;
        }
        fired
    }
}
