//! Shared minimum-interval rate limiter.
//!
//! Every outbound call, regardless of source, waits until the configured
//! interval has elapsed since the previous call. This is deliberate
//! serialization, not a token bucket: the registries ask for politeness, not
//! throughput.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Clock-gated serializer for outbound calls.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter enforcing `min_interval` between calls.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_call: Mutex::new(None) }
    }

    /// Wait until the interval since the last call has elapsed, then stamp
    /// the current time. The lock is held across the sleep so the stamp is
    /// atomic relative to request issuance.
    pub async fn acquire(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(500));

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spacing_applies_to_every_pair() {
        let limiter = RateLimiter::new(Duration::from_millis(500));

        let start = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }

        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_zero_interval_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(0));
        limiter.acquire().await;
        limiter.acquire().await;
    }
}
