//! Per-key token bucket with periodic refill.

use std::collections::HashMap;
use std::sync::Arc;

use super::clock::Clock;
use crate::error_handling::{QuotaExceeded, QuotaKind};

#[derive(Debug, Clone, Copy)]
struct BucketState {
    tokens: f64,
    last_refill_at: f64,
}

/// Token bucket keyed by quota key.
///
/// A key's bucket is seeded full on first use. Refills happen in whole
/// periods: `floor(elapsed / period)` refills of `refill_amount` tokens, capped
/// at capacity, with `last_refill_at` advanced by the same whole periods.
pub struct TokenBucket {
    kind: QuotaKind,
    capacity: f64,
    refill_period: f64,
    refill_amount: f64,
    clock: Arc<dyn Clock>,
    states: HashMap<String, BucketState>,
}

impl TokenBucket {
    pub fn new(
        kind: QuotaKind,
        capacity: u32,
        refill_period_seconds: f64,
        refill_amount: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            kind,
            capacity: f64::from(capacity),
            refill_period: refill_period_seconds,
            refill_amount: f64::from(refill_amount),
            clock,
            states: HashMap::new(),
        }
    }

    /// Bucket refilled in full once per `period_seconds`.
    pub fn per_period(kind: QuotaKind, limit: u32, period_seconds: f64, clock: Arc<dyn Clock>) -> Self {
        Self::new(kind, limit, period_seconds, limit, clock)
    }

    /// Takes one token for `key`.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` with a retry-after of at least one second when
    /// the bucket holds less than one token. State is still updated with any
    /// refill that happened.
    pub fn consume(&mut self, key: &str) -> Result<(), QuotaExceeded> {
        let now = self.clock.now_seconds();
        let capacity = self.capacity;
        let state = self.states.entry(key.to_string()).or_insert(BucketState {
            tokens: capacity,
            last_refill_at: now,
        });

        if self.refill_period > 0.0 {
            let elapsed = (now - state.last_refill_at).max(0.0);
            let refills = (elapsed / self.refill_period).floor();
            if refills > 0.0 {
                state.tokens = (state.tokens + refills * self.refill_amount).min(capacity);
                state.last_refill_at += refills * self.refill_period;
            }
        }

        if state.tokens < 1.0 {
            let remaining = self.refill_period - (now - state.last_refill_at);
            let retry_after = remaining.ceil().max(1.0) as u64;
            log::debug!(
                "{} quota exhausted for {} (retry after {}s)",
                self.kind,
                key,
                retry_after
            );
            return Err(QuotaExceeded::new(self.kind, Some(retry_after)));
        }

        state.tokens -= 1.0;
        Ok(())
    }

    /// Tokens currently held for `key`, without refilling. `None` before first use.
    pub fn tokens(&self, key: &str) -> Option<f64> {
        self.states.get(key).map(|state| state.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::clock::ManualClock;

    fn bucket(capacity: u32, period: f64) -> (TokenBucket, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0.0));
        let bucket = TokenBucket::per_period(QuotaKind::Qpm, capacity, period, clock.clone());
        (bucket, clock)
    }

    #[test]
    fn test_first_use_seeds_full_bucket() {
        let (mut bucket, _clock) = bucket(3, 60.0);
        assert!(bucket.tokens("k").is_none());
        bucket.consume("k").unwrap();
        assert_eq!(bucket.tokens("k"), Some(2.0));
    }

    #[test]
    fn test_exhaustion_reports_retry_after() {
        let (mut bucket, clock) = bucket(2, 60.0);
        bucket.consume("k").unwrap();
        bucket.consume("k").unwrap();
        clock.advance(15.0);
        let err = bucket.consume("k").unwrap_err();
        assert_eq!(err.kind, QuotaKind::Qpm);
        assert_eq!(err.retry_after_seconds, Some(45));
    }

    #[test]
    fn test_retry_after_is_at_least_one_second() {
        let (mut bucket, clock) = bucket(1, 60.0);
        bucket.consume("k").unwrap();
        clock.advance(59.5);
        let err = bucket.consume("k").unwrap_err();
        assert_eq!(err.retry_after_seconds, Some(1));
    }

    #[test]
    fn test_partial_period_does_not_refill() {
        let (mut bucket, clock) = bucket(1, 10.0);
        bucket.consume("k").unwrap();
        clock.advance(9.9);
        assert!(bucket.consume("k").is_err());
        clock.advance(0.1);
        bucket.consume("k").unwrap();
    }

    #[test]
    fn test_refill_is_capped_at_capacity() {
        let (mut bucket, clock) = bucket(2, 1.0);
        bucket.consume("k").unwrap();
        clock.advance(100.0);
        bucket.consume("k").unwrap();
        bucket.consume("k").unwrap();
        assert!(bucket.consume("k").is_err());
    }

    #[test]
    fn test_partial_refill_amount() {
        let clock = Arc::new(ManualClock::new(0.0));
        let mut bucket = TokenBucket::new(QuotaKind::Qpm, 4, 10.0, 1, clock.clone());
        for _ in 0..4 {
            bucket.consume("k").unwrap();
        }
        clock.advance(25.0);
        // two whole periods -> two tokens; last_refill_at advanced to 20
        bucket.consume("k").unwrap();
        bucket.consume("k").unwrap();
        let err = bucket.consume("k").unwrap_err();
        assert_eq!(err.retry_after_seconds, Some(5));
    }

    #[test]
    fn test_keys_are_independent() {
        let (mut bucket, _clock) = bucket(1, 60.0);
        bucket.consume("a").unwrap();
        assert!(bucket.consume("a").is_err());
        bucket.consume("b").unwrap();
    }
}
