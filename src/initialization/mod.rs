//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON output)
//! - HTTP client for the Google APIs
//! - The quota rate limiter on the system clock

mod client;
mod logger;

use crate::config::QuotaTable;
use crate::rate_limit::RateLimiter;

// Re-export public API
pub use client::init_client;
pub use logger::{init_logger_with, json_log_line};

/// Initializes the quota rate limiter on the monotonic clock and UTC calendar.
pub fn init_rate_limiter(quotas: &QuotaTable) -> RateLimiter {
    RateLimiter::with_system_clock(quotas)
}
