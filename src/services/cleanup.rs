//! Cleanup service for stale rate-limit records
//!
//! Runs as a background task on startup, then periodically.
//! - Removes client records whose window ended more than one window ago

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time;

use super::rate_limit::RateLimiter;

/// Configuration for the cleanup service
pub struct CleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_secs: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60, // Run every minute
        }
    }
}

/// Run a single cleanup cycle, returning the number of removed records
pub async fn run_cleanup(limiter: &RateLimiter) -> usize {
    let removed = limiter.sweep(Instant::now()).await;
    if removed > 0 {
        tracing::debug!("Cleanup: removed {} stale rate-limit records", removed);
    }
    removed
}

/// Start the background cleanup task
///
/// This should be spawned as a background task using `tokio::spawn`.
pub async fn start_cleanup_task(limiter: Arc<RateLimiter>, config: CleanupConfig) {
    tracing::info!(
        "Starting rate-limit cleanup task (interval: {}s)",
        config.interval_secs
    );

    // The first tick completes immediately
    let mut interval = time::interval(Duration::from_secs(config.interval_secs.max(1)));

    loop {
        interval.tick().await;
        run_cleanup(&limiter).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_cleanup_keeps_fresh_records() {
        let limiter = RateLimiter::new(true, Duration::from_secs(300), 10, 100);
        limiter.check("10.0.0.1").await;

        assert_eq!(run_cleanup(&limiter).await, 0);
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[tokio::test]
    async fn test_run_cleanup_removes_expired_records() {
        let limiter = RateLimiter::new(true, Duration::from_millis(1), 10, 100);
        limiter.check("10.0.0.1").await;

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(run_cleanup(&limiter).await, 1);
        assert_eq!(limiter.tracked_clients().await, 0);
    }
}
