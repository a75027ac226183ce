// Shared test helpers: a scripted inspection API and deterministic limiters.
//
// This module is included by several test files with `mod helpers;`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gsc_status::batch::{PerUrlResult, RunnerOptions};
use gsc_status::classification::{classify, OperatingMode, RawIndexStatus};
use gsc_status::client::InspectionApi;
use gsc_status::config::{FamilyQuota, QuotaTable, ApiFamily};
use gsc_status::error_handling::ApiError;
use gsc_status::rate_limit::{FixedDate, ManualClock, RateLimiter};
use gsc_status::utils::{Backoff, Jitter, Sleeper};

/// In-memory `InspectionApi` that replays scripted responses per URL.
///
/// A URL with no remaining script fails with `MissingIndexStatus`, so a test
/// that calls more often than it planned fails loudly.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<HashMap<String, VecDeque<Result<RawIndexStatus, ApiError>>>>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, response: Result<RawIndexStatus, ApiError>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls().iter().filter(|called| *called == url).count()
    }
}

impl InspectionApi for &ScriptedApi {
    async fn inspect(&self, url: &str, _site_url: &str) -> Result<RawIndexStatus, ApiError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(ApiError::MissingIndexStatus))
    }
}

#[allow(dead_code)]
pub fn indexed_raw() -> RawIndexStatus {
    RawIndexStatus {
        verdict: Some("PASS".to_string()),
        coverage_state: Some("Submitted and indexed".to_string()),
        robots_txt_state: Some("ALLOWED".to_string()),
        indexing_state: Some("INDEXING_ALLOWED".to_string()),
        page_fetch_state: Some("SUCCESSFUL".to_string()),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn noindex_raw() -> RawIndexStatus {
    RawIndexStatus {
        verdict: Some("FAIL".to_string()),
        coverage_state: Some("Excluded by 'noindex' tag".to_string()),
        indexing_state: Some("BLOCKED_BY_META_TAG".to_string()),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn status_error(code: u16) -> ApiError {
    ApiError::Status {
        code,
        message: format!("upstream returned {code}"),
    }
}

/// A classified result built from `raw` in strict mode.
#[allow(dead_code)]
pub fn classified(url: &str, raw: RawIndexStatus) -> PerUrlResult {
    let classification = classify(&raw, None, OperatingMode::Strict);
    PerUrlResult::classified(url, raw, classification)
}

/// Limiter on a manual clock and a fixed date; nothing refills unless the
/// test advances the clock.
#[allow(dead_code)]
pub fn manual_limiter(table: &QuotaTable) -> (RateLimiter, Arc<ManualClock>, Arc<FixedDate>) {
    let clock = Arc::new(ManualClock::new(0.0));
    let dates = Arc::new(FixedDate::new("2024-05-01"));
    let limiter = RateLimiter::new(table, clock.clone(), dates.clone());
    (limiter, clock, dates)
}

/// Quota table whose URL Inspection family only has a daily limit.
#[allow(dead_code)]
pub fn daily_only_table(qpd: u32) -> QuotaTable {
    let mut table = QuotaTable::default();
    table.set(
        ApiFamily::UrlInspection,
        FamilyQuota {
            qpd: Some(qpd),
            qpm: None,
            qps: None,
        },
    );
    table
}

/// Quota table whose URL Inspection family only has a per-minute limit.
#[allow(dead_code)]
pub fn per_minute_table(qpm: u32) -> QuotaTable {
    let mut table = QuotaTable::default();
    table.set(
        ApiFamily::UrlInspection,
        FamilyQuota {
            qpd: None,
            qpm: Some(qpm),
            qps: None,
        },
    );
    table
}

/// Sleeper that returns at once and moves the manual clock forward instead,
/// so waits on a `manual_limiter` actually refill its buckets.
#[allow(dead_code)]
pub struct ClockAdvancingSleeper {
    clock: Arc<ManualClock>,
    calls: Mutex<Vec<Duration>>,
}

#[allow(dead_code)]
impl ClockAdvancingSleeper {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            clock,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

impl Sleeper for ClockAdvancingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
        self.clock.advance(duration.as_secs_f64());
    }
}

/// Runner options that never sleep between retries.
#[allow(dead_code)]
pub fn fast_options(max_attempts: u32) -> RunnerOptions {
    RunnerOptions {
        mode: OperatingMode::Strict,
        max_attempts,
        max_batch_size: 500,
        backoff: Backoff::new(0, Jitter::Disabled),
    }
}
