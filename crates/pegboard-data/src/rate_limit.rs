//! Minimum-interval request pacing shared by the HTTP providers.

use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Default spacing between Yahoo Finance requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(250);

/// Enforces a minimum interval between consecutive requests.
///
/// Providers hold this behind an `Arc<tokio::sync::Mutex<_>>` so concurrent
/// fetches queue on the lock.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    /// Create a limiter that lets the first request through immediately.
    pub fn new(min_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            last_request: now.checked_sub(min_interval).unwrap_or(now),
            min_interval,
        }
    }

    /// Configured minimum interval.
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Sleep until the minimum interval since the previous request has passed.
    pub async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_LIMIT)
    }
}
