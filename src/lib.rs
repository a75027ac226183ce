//! gsc_status library: Google Search Console indexing-status classification
//!
//! This library turns raw URL Inspection API fields into an actionable
//! verdict (INDEXED / NOT_INDEXED / UNKNOWN) with reason codes and
//! recommendations, keeps API calls inside Google's published quotas, runs
//! batches with soft/hard failure handling, and compares two runs.
//!
//! # Example
//!
//! ```no_run
//! use gsc_status::{run_inspection, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("urls.txt"),
//!     site_url: "sc-domain:example.com".to_string(),
//!     access_token: std::env::var("GSC_ACCESS_TOKEN")?,
//!     ..Default::default()
//! };
//!
//! let batch = run_inspection(config).await?;
//! println!(
//!     "{} indexed, {} not indexed, {} unknown",
//!     batch.aggregation.indexed_count,
//!     batch.aggregation.not_indexed_count,
//!     batch.aggregation.unknown_count
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Classification itself is pure and synchronous:
//!
//! ```
//! use gsc_status::classification::{classify, IndexingStatus, OperatingMode, RawIndexStatus};
//!
//! let raw = RawIndexStatus {
//!     verdict: Some("PASS".to_string()),
//!     coverage_state: Some("Submitted and indexed".to_string()),
//!     ..Default::default()
//! };
//! let result = classify(&raw, None, OperatingMode::Strict);
//! assert_eq!(result.status(), IndexingStatus::Indexed);
//! ```
//!
//! # Requirements
//!
//! The batch runner and API client require a Tokio runtime.

mod app;
pub mod batch;
pub mod classification;
pub mod client;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod rate_limit;
pub mod utils;

// Re-export public API
pub use app::{load_url_list, parse_url_list, read_url_list, validate_and_normalize_url};
pub use config::{Cli, Command, Config, LogFormat, LogLevel};
pub use run::{
    classify_file, compare_files, list_sites, query_search_analytics, run_inspection, submit_url,
};

// Internal run module (wires the components together for each subcommand)
mod run {
    use std::path::Path;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::{info, warn};

    use crate::app::{
        load_url_list, print_batch_summary, print_comparison, print_error_statistics,
    };
    use crate::batch::{compare, BatchResult, BatchRunner, ComparisonResult, PerUrlResult, RunnerOptions};
    use crate::classification::{classify, OperatingMode};
    use crate::client::{
        NotificationMetadata, NotificationType, SearchAnalyticsQuery, SearchAnalyticsResponse,
        SearchConsoleClient, SiteEntry,
    };
    use crate::config::{ApiFamily, Config, QuotaTable};
    use crate::rate_limit::RateLimiter;
    use crate::export::{export_batch, read_raw_statuses, read_snapshot};
    use crate::initialization::{init_client, init_rate_limiter};

    const SUMMARY_TOP_REASON_CODES: usize = 5;

    /// Runs an inspection batch with the provided configuration.
    ///
    /// Reads URLs from `config.file` (stdin for `-`), inspects and classifies
    /// each one within quota, prints a summary and writes the result to
    /// `config.output` (JSON, or JSONL for a `.jsonl` path) when one is set.
    ///
    /// When the batch stops early, the URLs finished before the stop are still
    /// summarized and written to `config.output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the URL list cannot be
    /// read, the batch is empty or too large, the daily quota runs out, or an
    /// inspection fails with a non-retryable error.
    pub async fn run_inspection(config: Config) -> Result<BatchResult> {
        config.validate().context("Invalid configuration")?;

        let urls = load_url_list(&config.file)
            .await
            .with_context(|| format!("Failed to read URL list: {}", config.file.display()))?;
        info!("Total URLs in input: {}", urls.len());

        let http = init_client(config.timeout).context("Failed to initialize HTTP client")?;
        let api = SearchConsoleClient::new(http, config.access_token.clone());
        let limiter = init_rate_limiter(&config.quotas);
        let mut runner = BatchRunner::new(api, limiter, RunnerOptions::from(&config));

        let started_at = Utc::now();
        let outcome = runner.run(&config.site_url, &urls).await;
        print_error_statistics(&runner.stats());

        let error = match outcome {
            Ok(batch) => {
                print_batch_summary(&batch, SUMMARY_TOP_REASON_CODES);
                save_batch(&batch, &config)?;
                return Ok(batch);
            }
            Err(error) => error,
        };

        if !error.completed().is_empty() {
            let partial = BatchResult::new(
                config.site_url.as_str(),
                config.mode,
                started_at,
                Utc::now(),
                error.completed().to_vec(),
            );
            warn!(
                "Batch stopped early; keeping {} of {} results",
                partial.results.len(),
                urls.len()
            );
            print_batch_summary(&partial, SUMMARY_TOP_REASON_CODES);
            save_batch(&partial, &config)?;
        }
        Err(error).context("Inspection batch failed")
    }

    fn save_batch(batch: &BatchResult, config: &Config) -> Result<()> {
        if let Some(output) = config.output.as_deref() {
            export_batch(batch, Some(output))?;
            info!("Results saved in {}", output.display());
        }
        Ok(())
    }

    /// Classifies a saved raw-status file without calling the API.
    ///
    /// Every record is stamped with the current time.
    pub fn classify_file(path: &Path, mode: OperatingMode) -> Result<BatchResult> {
        let started_at = Utc::now();
        let records = read_raw_statuses(path)?;
        let results: Vec<PerUrlResult> = records
            .into_iter()
            .map(|record| {
                let classification = classify(&record.index_status, Some(started_at), mode);
                PerUrlResult::classified(record.url, record.index_status, classification)
            })
            .collect();
        Ok(BatchResult::new(
            String::new(),
            mode,
            started_at,
            Utc::now(),
            results,
        ))
    }

    /// Compares two saved batch results and prints the outcome.
    pub fn compare_files(previous: &Path, current: &Path, top: usize) -> Result<ComparisonResult> {
        let previous = read_snapshot(previous).context("Failed to load previous run")?;
        let current = read_snapshot(current).context("Failed to load current run")?;
        let comparison = compare(&previous, &current);
        print_comparison(&comparison, top);
        Ok(comparison)
    }

    /// Publishes an Indexing API notification for one URL.
    pub async fn submit_url(
        url: &str,
        notification_type: NotificationType,
        timeout: Duration,
        access_token: &str,
    ) -> Result<NotificationMetadata> {
        let mut limiter = init_rate_limiter(&QuotaTable::default());
        limiter
            .consume(ApiFamily::Indexing, None)
            .context("Indexing API quota exhausted")?;

        let http = init_client(timeout).context("Failed to initialize HTTP client")?;
        let client = SearchConsoleClient::new(http, access_token);
        let metadata = client
            .publish(url, notification_type)
            .await
            .with_context(|| format!("Failed to publish {notification_type} for {url}"))?;
        info!("Published {} for {}", notification_type, url);
        Ok(metadata)
    }

    /// Runs one Search Analytics query, charged to the site's quota.
    ///
    /// # Errors
    ///
    /// Returns an error when the quota refuses the call or the API fails.
    pub async fn query_search_analytics(
        client: &SearchConsoleClient,
        limiter: &mut RateLimiter,
        site_url: &str,
        query: &SearchAnalyticsQuery,
    ) -> Result<SearchAnalyticsResponse> {
        anyhow::ensure!(
            query.start_date <= query.end_date,
            "Start date {} is after end date {}",
            query.start_date,
            query.end_date
        );
        limiter
            .consume(ApiFamily::SearchAnalytics, Some(site_url))
            .context("Search Analytics quota exhausted")?;
        let response = client
            .search_analytics(site_url, query)
            .await
            .with_context(|| format!("Search Analytics query failed for {site_url}"))?;
        info!("{} Search Analytics rows for {}", response.rows.len(), site_url);
        Ok(response)
    }

    /// Lists the properties visible to the token, charged to the shared quota.
    ///
    /// # Errors
    ///
    /// Returns an error when the quota refuses the call or the API fails.
    pub async fn list_sites(
        client: &SearchConsoleClient,
        limiter: &mut RateLimiter,
    ) -> Result<Vec<SiteEntry>> {
        limiter
            .consume(ApiFamily::Other, None)
            .context("Search Console quota exhausted")?;
        client.list_sites().await.context("Failed to list sites")
    }
}
