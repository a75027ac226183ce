//! Exponential backoff between retries.
//!
//! Delay for retry `attempt` (1-based) is `base * 2^(attempt - 1)` seconds.
//! With jitter enabled the delay is scaled by a factor in `[0.5, 1.0]` and
//! rounded up. Attempt 0 (the first try) never waits.

use std::sync::Mutex;
use std::time::Duration;

use rand::Rng;

/// Async sleep primitive used for retry backoff and quota waits.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

impl<S: Sleeper> Sleeper for &S {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

/// Sleeps on the Tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records requested sleeps instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(duration);
        }
    }
}

/// Source of the jitter factor.
#[derive(Debug, Clone, Copy)]
pub enum Jitter {
    Disabled,
    /// Random factor in `[0.5, 1.0]` per call
    Random,
    /// Fixed factor, clamped to `[0.5, 1.0]`
    Fixed(f64),
}

/// Exponential-delay calculator for batch retries.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    base_seconds: u64,
    jitter: Jitter,
}

impl Backoff {
    pub fn new(base_seconds: u64, jitter: Jitter) -> Self {
        Self {
            base_seconds,
            jitter,
        }
    }

    fn factor(&self) -> Option<f64> {
        match self.jitter {
            Jitter::Disabled => None,
            Jitter::Random => Some(rand::rng().random_range(0.5..=1.0)),
            Jitter::Fixed(factor) => Some(factor.clamp(0.5, 1.0)),
        }
    }

    /// Delay before retry `attempt`, or `None` when no wait is needed.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 {
            return None;
        }
        let exponent = (attempt - 1).min(62);
        let mut seconds = self.base_seconds.saturating_mul(1u64 << exponent);
        if let Some(factor) = self.factor() {
            seconds = (seconds as f64 * factor).ceil() as u64;
        }
        (seconds > 0).then(|| Duration::from_secs(seconds))
    }

    /// Waits out the delay of retry `attempt` on `sleeper`.
    pub async fn sleep_before_retry(&self, attempt: u32, sleeper: &impl Sleeper) {
        if let Some(delay) = self.delay_for(attempt) {
            log::debug!("Backing off {}s before retry {}", delay.as_secs(), attempt);
            sleeper.sleep(delay).await;
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(crate::config::RETRY_BACKOFF_BASE_SECS, Jitter::Random)
    }
}
