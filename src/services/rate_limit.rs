//! Per-client request limiter
//!
//! Fixed window per client: each address may make `max_requests` requests
//! per `window`. The window restarts on the first request after it elapsed,
//! so a burst straddling the rollover can exceed the limit.
//!
//! Records live in a bounded LRU map. Expired records are removed by
//! [`RateLimiter::sweep`], run periodically from the cleanup task.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Longest accepted window; keeps `Instant` arithmetic from overflowing
pub const MAX_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Counter state for one client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    pub count: u32,
    pub reset_time: Instant,
}

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Limited,
}

pub struct RateLimiter {
    enabled: bool,
    window: Duration,
    max_requests: u32,
    records: Mutex<LruCache<String, RateLimitRecord>>,
}

impl RateLimiter {
    /// `window` is clamped to [`MAX_WINDOW`]
    pub fn new(enabled: bool, window: Duration, max_requests: u32, max_clients: usize) -> Self {
        let capacity = NonZeroUsize::new(max_clients).unwrap_or(NonZeroUsize::MIN);

        Self {
            enabled,
            window: window.min(MAX_WINDOW),
            max_requests,
            records: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check and count a request from `client` at the current time
    pub async fn check(&self, client: &str) -> Admission {
        self.check_at(client, Instant::now()).await
    }

    /// Check and count a request from `client` at `now`.
    ///
    /// The read-modify-write of the client's record happens under one lock,
    /// so concurrent requests from the same client are counted exactly.
    pub async fn check_at(&self, client: &str, now: Instant) -> Admission {
        if !self.enabled {
            return Admission::Admitted;
        }

        let mut records = self.records.lock().await;
        let mut record = records.pop(client).unwrap_or(RateLimitRecord {
            count: 0,
            reset_time: now + self.window,
        });

        // Window elapsed: start a fresh one
        if now > record.reset_time {
            record.count = 0;
            record.reset_time = now + self.window;
        }

        let admission = if record.count >= self.max_requests {
            Admission::Limited
        } else {
            record.count += 1;
            Admission::Admitted
        };

        records.put(client.to_string(), record);
        admission
    }

    /// Remove records whose window ended more than one window ago.
    /// Returns the number of removed records.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut records = self.records.lock().await;

        let expired: Vec<String> = records
            .iter()
            .filter(|(_, record)| now > record.reset_time + self.window)
            .map(|(client, _)| client.clone())
            .collect();

        for client in &expired {
            records.pop(client);
        }

        expired.len()
    }

    /// Number of clients currently tracked
    pub async fn tracked_clients(&self) -> usize {
        self.records.lock().await.len()
    }

    #[cfg(test)]
    async fn record(&self, client: &str) -> Option<RateLimitRecord> {
        self.records.lock().await.peek(client).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(5 * 60);

    fn limiter() -> RateLimiter {
        RateLimiter::new(true, WINDOW, 10, 100)
    }

    #[tokio::test]
    async fn test_eleventh_request_is_limited() {
        let limiter = limiter();
        let start = Instant::now();

        for i in 0..10 {
            let now = start + Duration::from_secs(i);
            assert_eq!(limiter.check_at("10.0.0.1", now).await, Admission::Admitted);
        }
        assert_eq!(
            limiter.check_at("10.0.0.1", start + Duration::from_secs(10)).await,
            Admission::Limited
        );
    }

    #[tokio::test]
    async fn test_limited_request_is_not_counted() {
        let limiter = limiter();
        let now = Instant::now();

        for _ in 0..15 {
            limiter.check_at("10.0.0.1", now).await;
        }
        assert_eq!(limiter.record("10.0.0.1").await.unwrap().count, 10);
    }

    #[tokio::test]
    async fn test_clients_are_counted_separately() {
        let limiter = limiter();
        let now = Instant::now();

        for _ in 0..10 {
            limiter.check_at("10.0.0.1", now).await;
        }
        assert_eq!(limiter.check_at("10.0.0.1", now).await, Admission::Limited);
        assert_eq!(limiter.check_at("10.0.0.2", now).await, Admission::Admitted);
    }

    #[tokio::test]
    async fn test_window_rollover_resets_count() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..10 {
            limiter.check_at("10.0.0.1", start).await;
        }
        assert_eq!(limiter.check_at("10.0.0.1", start).await, Admission::Limited);

        // Exactly at reset_time the window is still active
        assert_eq!(
            limiter.check_at("10.0.0.1", start + WINDOW).await,
            Admission::Limited
        );

        let later = start + WINDOW + Duration::from_millis(1);
        assert_eq!(limiter.check_at("10.0.0.1", later).await, Admission::Admitted);

        let record = limiter.record("10.0.0.1").await.unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(record.reset_time, later + WINDOW);
    }

    #[tokio::test]
    async fn test_disabled_admits_everything() {
        let limiter = RateLimiter::new(false, WINDOW, 10, 100);
        let now = Instant::now();

        for _ in 0..100 {
            assert_eq!(limiter.check_at("10.0.0.1", now).await, Admission::Admitted);
        }
        assert_eq!(limiter.tracked_clients().await, 0);
    }

    #[tokio::test]
    async fn test_sweep_removes_stale_records() {
        let limiter = limiter();
        let start = Instant::now();

        limiter.check_at("old", start).await;
        limiter.check_at("recent", start + WINDOW).await;

        // "old" window ended at start + W; stale once past start + 2W
        let removed = limiter.sweep(start + WINDOW * 2 + Duration::from_secs(1)).await;
        assert_eq!(removed, 1);
        assert!(limiter.record("old").await.is_none());
        assert!(limiter.record("recent").await.is_some());
    }

    #[tokio::test]
    async fn test_huge_window_is_clamped() {
        let limiter = RateLimiter::new(true, Duration::MAX, 1, 10);
        assert_eq!(limiter.window(), MAX_WINDOW);

        let now = Instant::now();
        assert_eq!(limiter.check_at("10.0.0.1", now).await, Admission::Admitted);
        assert_eq!(limiter.check_at("10.0.0.1", now).await, Admission::Limited);
        assert_eq!(limiter.sweep(now).await, 0);
    }

    #[tokio::test]
    async fn test_map_is_bounded() {
        let limiter = RateLimiter::new(true, WINDOW, 10, 2);
        let now = Instant::now();

        limiter.check_at("a", now).await;
        limiter.check_at("b", now).await;
        limiter.check_at("c", now).await;

        assert_eq!(limiter.tracked_clients().await, 2);
        assert!(limiter.record("a").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_counted_exactly() {
        let limiter = std::sync::Arc::new(limiter());
        let now = Instant::now();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.check_at("10.0.0.1", now).await })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() == Admission::Admitted {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 10);
    }
}
