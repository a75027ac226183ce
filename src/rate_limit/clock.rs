//! Time sources injected into the rate limiter.

use std::sync::Mutex;
use std::time::Instant;

/// Monotonic clock in seconds.
pub trait Clock: Send + Sync {
    fn now_seconds(&self) -> f64;
}

/// Current-date source for daily budgets. Any change of the returned string
/// starts a new day.
pub trait DateSource: Send + Sync {
    fn today(&self) -> String;
}

/// Seconds elapsed since construction, backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// UTC calendar date as `YYYY-MM-DD`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcDate;

impl DateSource for UtcDate {
    fn today(&self) -> String {
        chrono::Utc::now().format("%Y-%m-%d").to_string()
    }
}

/// Manually advanced clock for tests and replay.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, seconds: f64) {
        if let Ok(mut now) = self.now.lock() {
            *now += seconds;
        }
    }

    pub fn set(&self, seconds: f64) {
        if let Ok(mut now) = self.now.lock() {
            *now = seconds;
        }
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}

/// Date source returning whatever date it was last set to.
#[derive(Debug)]
pub struct FixedDate {
    date: Mutex<String>,
}

impl FixedDate {
    pub fn new(date: &str) -> Self {
        Self {
            date: Mutex::new(date.to_string()),
        }
    }

    pub fn set(&self, date: &str) {
        if let Ok(mut current) = self.date.lock() {
            *current = date.to_string();
        }
    }
}

impl DateSource for FixedDate {
    fn today(&self) -> String {
        self.date
            .lock()
            .map(|date| date.clone())
            .unwrap_or_default()
    }
}
