use anyhow::{anyhow, Result};
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Shared outbound request ceiling: one request per `period`, no burst.
///
/// Clones share the same bucket. Waiters are admitted in arrival order because the
/// admission lock (a fair tokio mutex) is held while waiting on the limiter.
#[derive(Clone)]
pub struct Throttle {
    limiter: Arc<DirectLimiter>,
    admission: Arc<Mutex<()>>,
    period: Duration,
}

impl Throttle {
    /// Production ceiling: 1 request per second.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

    pub fn new(period: Duration) -> Result<Self> {
        let quota = Quota::with_period(period)
            .ok_or_else(|| anyhow!("Throttle period must be non-zero"))?
            .allow_burst(NonZeroU32::MIN);

        Ok(Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            admission: Arc::new(Mutex::new(())),
            period,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits until this caller may issue its request.
    pub async fn acquire(&self) {
        let _admission = self.admission.lock().await;
        debug!("Waiting on request throttle ({:?} period)", self.period());
        self.limiter.until_ready().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_zero_period_rejected() {
        assert!(Throttle::new(Duration::ZERO).is_err());
    }

    #[test]
    fn test_default_ceiling() {
        let throttle = Throttle::new(Throttle::DEFAULT_PERIOD).unwrap();
        assert_eq!(throttle.period(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_acquire_spaces_requests() {
        let throttle = Throttle::new(Duration::from_millis(50)).unwrap();
        let start = Instant::now();

        for _ in 0..3 {
            throttle.acquire().await;
        }

        // First admission is immediate, the next two wait a full period each.
        assert!(start.elapsed() >= Duration::from_millis(95));
    }

    #[tokio::test]
    async fn test_clones_share_bucket() {
        let throttle = Throttle::new(Duration::from_millis(50)).unwrap();
        let other = throttle.clone();
        let start = Instant::now();

        throttle.acquire().await;
        other.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(45));
    }
}
