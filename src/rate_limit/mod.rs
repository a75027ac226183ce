//! Quota-based rate limiting for Google API families.
//!
//! This module implements:
//! - A per-key token bucket refilled in whole periods (per-minute/per-second quotas)
//! - A per-key daily budget reset when the date changes (per-day quotas)
//! - A limiter composing both according to a fixed quota table per API family
//!
//! Clock and date are injected so quota behaviour is deterministic under test.

mod bucket;
mod clock;
mod daily;
mod limiter;

pub use bucket::TokenBucket;
pub use clock::{Clock, DateSource, FixedDate, ManualClock, MonotonicClock, UtcDate};
pub use daily::DailyBudget;
pub use limiter::RateLimiter;
