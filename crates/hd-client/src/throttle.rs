//! Minimum spacing between dispatches.

use std::fmt;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Delays each call until at least `interval` has passed since the previous
/// one was admitted. Shared by every clone of a client.
///
/// Backed by a single-cell GCRA limiter, so there is no burst: the first call
/// goes through at once and every later one waits for its own slot. A zero
/// interval admits everything immediately.
pub struct Throttle {
    interval: Duration,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        let limiter = Quota::with_period(interval).map(RateLimiter::direct);
        Self { interval, limiter }
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for this call's slot.
    pub async fn acquire(&self) {
        if let Some(ref limiter) = self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl fmt::Debug for Throttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
