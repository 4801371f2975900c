// Request pacing for the Reddit OAuth API.
//
// Reddit allows 100 OAuth requests per minute per client. Every GET goes
// through acquire(), which sleeps until the minimum interval since the
// previous request has passed.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Spaces requests at least `1 / requests_per_second` apart.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
}

struct RateLimiterInner {
    interval: Duration,
    last_request: Option<Instant>,
}

/// Interval used when the rate is too small to express as a Duration.
const MAX_INTERVAL: Duration = Duration::from_secs(100);

impl RateLimiter {
    /// Non-positive or vanishing rates fall back to MAX_INTERVAL.
    pub fn new(requests_per_second: f64) -> Self {
        let interval = Duration::try_from_secs_f64(1.0 / requests_per_second)
            .map(|d| d.min(MAX_INTERVAL))
            .unwrap_or(MAX_INTERVAL);
        Self {
            inner: Arc::new(Mutex::new(RateLimiterInner {
                interval,
                last_request: None,
            })),
        }
    }

    /// Wait until a request is allowed, then return.
    pub async fn acquire(&self) {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();

        if let Some(last) = inner.last_request {
            let elapsed = now.duration_since(last);
            if elapsed < inner.interval {
                tokio::time::sleep(inner.interval - elapsed).await;
            }
        }

        inner.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_request_is_immediate() {
        let limiter = RateLimiter::new(1.0);
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn second_request_waits_for_interval() {
        let limiter = RateLimiter::new(2.0);
        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;
        assert!(
            start.elapsed() >= Duration::from_millis(400),
            "Expected ~500ms spacing, got {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn degenerate_rates_do_not_panic() {
        for rate in [1e-20, 0.0, -1.0, f64::NAN] {
            let limiter = RateLimiter::new(rate);
            assert_eq!(limiter.inner.lock().await.interval, MAX_INTERVAL);
        }
    }
}
