//! Global request-rate limiter shared by all workers

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between any two permitted requests,
/// regardless of which worker asks
///
/// The last-permit instant sits behind a tokio Mutex that is held across
/// the wait, so check-and-update is one critical section and two workers
/// can never be granted permits closer together than the interval.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_permit: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_permit: Mutex::new(None),
        }
    }

    /// Waits until a request is permitted, then records the permit time
    pub async fn acquire(&self) {
        let mut last = self.last_permit.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
    }
}
