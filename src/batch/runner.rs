//! Batch orchestration: quota, inspection, retry and classification per URL.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};

use super::failure::{degrade_or_fail, is_soft_failure};
use super::types::{BatchResult, PerUrlResult};
use crate::classification::{classify, OperatingMode};
use crate::client::InspectionApi;
use crate::config::{ApiFamily, Config, QUOTA_WAIT_MAX};
use crate::error_handling::{
    update_error_stats, BatchError, ErrorType, InfoType, ProcessingStats, QuotaKind,
    ValidationError,
};
use crate::rate_limit::RateLimiter;
use crate::utils::{Backoff, Jitter, Sleeper, TokioSleeper};

/// Rejects empty or oversized batches before any work starts.
///
/// # Errors
///
/// Returns `ValidationError::EmptyBatch` or `ValidationError::BatchTooLarge`.
pub fn validate_batch_size(size: usize, max: usize) -> Result<(), ValidationError> {
    if size == 0 {
        return Err(ValidationError::EmptyBatch);
    }
    if size > max {
        return Err(ValidationError::BatchTooLarge { size, max });
    }
    Ok(())
}

/// Tunables for a [`BatchRunner`].
#[derive(Debug, Clone, Copy)]
pub struct RunnerOptions {
    pub mode: OperatingMode,
    pub max_attempts: u32,
    pub max_batch_size: usize,
    pub backoff: Backoff,
}

impl From<&Config> for RunnerOptions {
    fn from(config: &Config) -> Self {
        let jitter = if config.jitter {
            Jitter::Random
        } else {
            Jitter::Disabled
        };
        Self {
            mode: config.mode,
            max_attempts: config.max_attempts,
            max_batch_size: config.max_batch_size,
            backoff: Backoff::new(config.backoff_base_secs, jitter),
        }
    }
}

/// Runs URL inspections one at a time against a single rate limiter.
///
/// Backoff delays and quota waits go through the `Sleeper`.
pub struct BatchRunner<A, S = TokioSleeper> {
    api: A,
    limiter: RateLimiter,
    options: RunnerOptions,
    stats: Arc<ProcessingStats>,
    sleeper: S,
}

impl<A: InspectionApi> BatchRunner<A> {
    pub fn new(api: A, limiter: RateLimiter, options: RunnerOptions) -> Self {
        Self {
            api,
            limiter,
            options,
            stats: Arc::new(ProcessingStats::new()),
            sleeper: TokioSleeper,
        }
    }
}

impl<A: InspectionApi, S: Sleeper> BatchRunner<A, S> {
    /// Replaces the sleeper used for backoff and quota waits.
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> BatchRunner<A, T> {
        BatchRunner {
            api: self.api,
            limiter: self.limiter,
            options: self.options,
            stats: self.stats,
            sleeper,
        }
    }

    pub fn stats(&self) -> Arc<ProcessingStats> {
        Arc::clone(&self.stats)
    }

    /// Inspects and classifies every URL for `site_url`, in order.
    ///
    /// Soft failures are retried with backoff and finally recorded as UNKNOWN
    /// results; they never stop the batch.
    ///
    /// # Errors
    ///
    /// - `BatchError::Validation` when the batch is empty or too large (nothing runs)
    /// - `BatchError::Quota` when the daily quota runs out or the per-minute
    ///   quota keeps refusing
    /// - `BatchError::Hard` on the first non-retryable API failure
    ///
    /// `Quota` and `Hard` errors carry the results completed before the stop.
    pub async fn run(&mut self, site_url: &str, urls: &[String]) -> Result<BatchResult, BatchError> {
        validate_batch_size(urls.len(), self.options.max_batch_size)?;

        let started_at = Utc::now();
        info!(
            "Inspecting {} URL{} for {} ({} mode)",
            urls.len(),
            if urls.len() == 1 { "" } else { "s" },
            site_url,
            self.options.mode
        );

        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            let result = match self.inspect_one(site_url, url).await {
                Ok(result) => result,
                Err(error) => {
                    warn!(
                        "Batch stopped after {} of {} URLs",
                        results.len(),
                        urls.len()
                    );
                    return Err(error.with_completed(results));
                }
            };
            debug!("{} -> {}", url, result.status);
            results.push(result);
        }

        let batch = BatchResult::new(site_url, self.options.mode, started_at, Utc::now(), results);
        info!(
            "Batch finished: {} indexed, {} not indexed, {} unknown ({} soft failures)",
            batch.aggregation.indexed_count,
            batch.aggregation.not_indexed_count,
            batch.aggregation.unknown_count,
            batch.soft_failure_count
        );
        Ok(batch)
    }

    async fn acquire_quota(&mut self, site_url: &str) -> Result<(), BatchError> {
        let mut waits = 0;
        loop {
            let refusal = match self.limiter.consume(ApiFamily::UrlInspection, Some(site_url)) {
                Ok(()) => return Ok(()),
                Err(refusal) => refusal,
            };
            match refusal.retry_after_seconds {
                Some(seconds) if refusal.kind != QuotaKind::Qpd && waits < QUOTA_WAIT_MAX => {
                    waits += 1;
                    self.stats.increment_info(InfoType::QuotaWait);
                    debug!("{}; waiting {}s", refusal, seconds);
                    self.sleeper.sleep(Duration::from_secs(seconds)).await;
                }
                _ => {
                    if refusal.kind == QuotaKind::Qpd {
                        self.stats.increment_error(ErrorType::QuotaExceededPerDay);
                    }
                    warn!("Stopping batch for {}: {}", site_url, refusal);
                    return Err(refusal.into());
                }
            }
        }
    }

    async fn inspect_one(&mut self, site_url: &str, url: &str) -> Result<PerUrlResult, BatchError> {
        let mut attempt: u32 = 0;
        loop {
            self.options
                .backoff
                .sleep_before_retry(attempt, &self.sleeper)
                .await;
            self.acquire_quota(site_url).await?;

            let error = match self.api.inspect(url, site_url).await {
                Ok(raw) => {
                    let classification = classify(&raw, None, self.options.mode);
                    return Ok(PerUrlResult::classified(url, raw, classification));
                }
                Err(error) => error,
            };

            update_error_stats(&self.stats, &error);
            let retryable = error.status_code().is_some_and(is_soft_failure);
            attempt += 1;
            if retryable && attempt < self.options.max_attempts {
                self.stats.increment_info(InfoType::Retry);
                debug!(
                    "Retrying {} after {} (attempt {}/{})",
                    url,
                    error,
                    attempt + 1,
                    self.options.max_attempts
                );
                continue;
            }

            let result = degrade_or_fail(url, error, None)?;
            self.stats.increment_info(InfoType::SoftFailureRecorded);
            warn!(
                "Recording {} as UNKNOWN after {} attempt{}: {}",
                url,
                attempt,
                if attempt == 1 { "" } else { "s" },
                result.error.as_deref().unwrap_or("soft failure")
            );
            return Ok(result);
        }
    }
}
