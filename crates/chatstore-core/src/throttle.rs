//! Sliding-window request limiter.
//!
//! Each client key owns a bucket of request timestamps. A request is admitted
//! when fewer than `max_requests` timestamps fall inside the trailing window.
//! Buckets live in a [`DashMap`] so concurrent requests for different clients
//! never contend on one lock.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Rate limit configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window.
    pub max_requests: u32,
    /// Time window duration.
    pub window: Duration,
}

impl RateLimitConfig {
    /// Build a config; both values are floored at 1.
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window: Duration::from_secs(window_secs.max(1)),
        }
    }
}

/// Outcome of a single admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    /// Requests still available in the current window.
    pub remaining: u32,
    /// How long until the oldest counted request leaves the window.
    pub retry_after: Duration,
}

/// In-process sliding-window limiter keyed by client identity.
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    buckets: DashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            buckets: DashMap::new(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record a request for `key` and decide whether to admit it.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let window = self.config.window;
        let limit = self.config.max_requests;

        let mut bucket = self.buckets.entry(key.to_string()).or_default();
        while bucket
            .front()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= window)
        {
            bucket.pop_front();
        }

        if bucket.len() >= limit as usize {
            let retry_after = bucket
                .front()
                .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or(window);
            return RateLimitDecision {
                allowed: false,
                limit,
                remaining: 0,
                retry_after,
            };
        }

        bucket.push_back(now);
        RateLimitDecision {
            allowed: true,
            limit,
            remaining: limit - bucket.len() as u32,
            retry_after: Duration::ZERO,
        }
    }

    /// Drop buckets with no request inside the window. Returns how many were removed.
    pub fn prune(&self) -> usize {
        self.prune_at(Instant::now())
    }

    fn prune_at(&self, now: Instant) -> usize {
        let window = self.config.window;
        let before = self.buckets.len();
        self.buckets.retain(|_, bucket| {
            bucket
                .back()
                .is_some_and(|newest| now.saturating_duration_since(*newest) < window)
        });
        before - self.buckets.len()
    }

    /// Number of tracked clients.
    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: u32, secs: u64) -> SlidingWindowLimiter {
        SlidingWindowLimiter::new(RateLimitConfig::new(max, secs))
    }

    #[test]
    fn test_admits_up_to_limit_then_rejects() {
        let limiter = limiter(3, 60);
        let start = Instant::now();

        for expected_remaining in [2, 1, 0] {
            let d = limiter.check_at("10.0.0.1", start);
            assert!(d.allowed);
            assert_eq!(d.remaining, expected_remaining);
        }

        let denied = limiter.check_at("10.0.0.1", start + Duration::from_secs(10));
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.retry_after, Duration::from_secs(50));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = limiter(1, 60);
        let start = Instant::now();
        assert!(limiter.check_at("a", start).allowed);
        assert!(!limiter.check_at("a", start).allowed);
        assert!(limiter.check_at("b", start).allowed);
    }

    #[test]
    fn test_window_slides() {
        let limiter = limiter(2, 60);
        let start = Instant::now();
        assert!(limiter.check_at("a", start).allowed);
        assert!(limiter.check_at("a", start + Duration::from_secs(30)).allowed);
        assert!(!limiter.check_at("a", start + Duration::from_secs(59)).allowed);

        // The first request has left the window; the second still counts.
        let d = limiter.check_at("a", start + Duration::from_secs(60));
        assert!(d.allowed);
        assert_eq!(d.remaining, 0);
        assert!(!limiter.check_at("a", start + Duration::from_secs(61)).allowed);
    }

    #[test]
    fn test_rejections_are_not_counted() {
        let limiter = limiter(1, 10);
        let start = Instant::now();
        assert!(limiter.check_at("a", start).allowed);
        for s in 1..10 {
            assert!(!limiter.check_at("a", start + Duration::from_secs(s)).allowed);
        }
        assert!(limiter.check_at("a", start + Duration::from_secs(10)).allowed);
    }

    #[test]
    fn test_prune_drops_idle_buckets() {
        let limiter = limiter(5, 60);
        let start = Instant::now();
        limiter.check_at("idle", start);
        limiter.check_at("busy", start + Duration::from_secs(50));
        assert_eq!(limiter.tracked_clients(), 2);

        let removed = limiter.prune_at(start + Duration::from_secs(70));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_config_floors_zero_values() {
        let config = RateLimitConfig::new(0, 0);
        assert_eq!(config.max_requests, 1);
        assert_eq!(config.window, Duration::from_secs(1));
    }
}
