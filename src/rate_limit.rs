//! Per-client token bucket gating requests before they reach the generator.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    /// Epoch milliseconds at which the next refill lands.
    pub reset_at: i64,
}

struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

pub struct TokenBucketLimiter {
    max_tokens: u32,
    refill_rate: u32,
    refill_interval: Duration,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl TokenBucketLimiter {
    pub fn new(max_tokens: u32, refill_rate: u32, refill_interval: Duration) -> Self {
        Self {
            max_tokens,
            refill_rate,
            refill_interval: refill_interval.max(Duration::from_millis(1)),
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Reports the bucket state without taking a token.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.apply(key, Instant::now(), false)
    }

    pub fn consume(&self, key: &str) -> RateLimitDecision {
        self.apply(key, Instant::now(), true)
    }

    fn apply(&self, key: &str, now: Instant, take: bool) -> RateLimitDecision {
        let mut buckets = self.buckets.lock();
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket { tokens: self.max_tokens, last_refill: now });

        let elapsed = now.saturating_duration_since(bucket.last_refill);
        let intervals = (elapsed.as_millis() / self.refill_interval.as_millis()) as u32;
        if intervals > 0 {
            let added = intervals.saturating_mul(self.refill_rate);
            bucket.tokens = bucket.tokens.saturating_add(added).min(self.max_tokens);
            bucket.last_refill = now;
        }

        let allowed = bucket.tokens > 0;
        if allowed && take {
            bucket.tokens -= 1;
        }

        let until_refill = self
            .refill_interval
            .saturating_sub(now.saturating_duration_since(bucket.last_refill));
        RateLimitDecision {
            allowed,
            remaining: bucket.tokens,
            reset_at: Utc::now().timestamp_millis() + until_refill.as_millis() as i64,
        }
    }

    #[cfg(test)]
    fn consume_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        self.apply(key, now, true)
    }
}

impl Default for TokenBucketLimiter {
    fn default() -> Self {
        Self::new(20, 2, Duration::from_millis(1000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_then_refuses() {
        let limiter = TokenBucketLimiter::new(2, 1, Duration::from_secs(60));
        assert_eq!(limiter.consume("10.0.0.1").remaining, 1);
        assert!(limiter.consume("10.0.0.1").allowed);
        let refused = limiter.consume("10.0.0.1");
        assert!(!refused.allowed);
        assert_eq!(refused.remaining, 0);
        assert!(refused.reset_at > Utc::now().timestamp_millis());
    }

    #[test]
    fn clients_have_separate_buckets() {
        let limiter = TokenBucketLimiter::new(1, 1, Duration::from_secs(60));
        assert!(limiter.consume("a").allowed);
        assert!(!limiter.consume("a").allowed);
        assert!(limiter.consume("b").allowed);
    }

    #[test]
    fn refills_per_elapsed_interval_up_to_max() {
        let limiter = TokenBucketLimiter::new(3, 2, Duration::from_millis(100));
        let start = Instant::now();
        for _ in 0..3 {
            limiter.consume_at("k", start);
        }
        assert!(!limiter.consume_at("k", start).allowed);
        // one interval adds two tokens, one is taken
        assert_eq!(limiter.consume_at("k", start + Duration::from_millis(150)).remaining, 1);
        // ten intervals cap at max
        assert_eq!(limiter.consume_at("k", start + Duration::from_secs(2)).remaining, 2);
    }

    #[test]
    fn check_does_not_consume() {
        let limiter = TokenBucketLimiter::default();
        assert_eq!(limiter.check("k").remaining, 20);
        assert_eq!(limiter.check("k").remaining, 20);
    }
}
