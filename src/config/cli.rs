//! Command-line interface definition.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use super::constants::{
    ACCESS_TOKEN_ENV, DEFAULT_MAX_BATCH_SIZE, RETRY_BACKOFF_BASE_SECS, RETRY_MAX_ATTEMPTS,
    SEARCH_ANALYTICS_MAX_ROWS,
};
use super::types::{Config, LogFormat, LogLevel};
use super::QuotaTable;
use crate::classification::OperatingMode;
use crate::client::{Dimension, SearchAnalyticsQuery};

/// Inspect Search Console URLs and classify their index status.
#[derive(Debug, Parser)]
#[command(name = "gsc_status", version, about)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect a list of URLs and classify each one
    Inspect(InspectArgs),
    /// Classify raw index-status records from a JSON file without calling the API
    Classify(ClassifyArgs),
    /// Compare two saved inspection runs
    Compare(CompareArgs),
    /// Notify the Indexing API that a URL was updated or removed
    Submit(SubmitArgs),
    /// Query Search Analytics (clicks, impressions, CTR, position) for a property
    Analytics(AnalyticsArgs),
    /// List the Search Console properties the token can access
    Sites(SitesArgs),
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// File with one URL per line (`-` for stdin)
    pub file: PathBuf,

    /// Search Console property, e.g. https://example.com/ or sc-domain:example.com
    #[arg(long)]
    pub site: String,

    #[arg(long, value_enum, default_value_t = OperatingMode::Strict)]
    pub mode: OperatingMode,

    /// Write the batch result as JSON to this path
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MAX_BATCH_SIZE)]
    pub max_batch_size: usize,

    /// Attempts per URL before recording a soft failure
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Backoff base delay in seconds
    #[arg(long, default_value_t = RETRY_BACKOFF_BASE_SECS)]
    pub backoff_base: u64,

    /// Disable random jitter on backoff delays
    #[arg(long)]
    pub no_jitter: bool,

    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    /// OAuth2 bearer token
    #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
    pub access_token: String,
}

impl InspectArgs {
    pub fn into_config(self) -> Config {
        Config {
            file: self.file,
            site_url: self.site,
            output: self.output,
            mode: self.mode,
            max_batch_size: self.max_batch_size,
            max_attempts: self.max_attempts,
            backoff_base_secs: self.backoff_base,
            jitter: !self.no_jitter,
            timeout: Duration::from_secs(self.timeout_seconds),
            access_token: self.access_token,
            quotas: QuotaTable::default(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// JSON array of `{"url": ..., "indexStatus": {...}}` records
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = OperatingMode::Strict)]
    pub mode: OperatingMode,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Earlier run (JSON written by `inspect --output`)
    pub previous: PathBuf,

    /// Later run
    pub current: PathBuf,

    /// Number of dominant reason codes to print
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    pub url: String,

    /// Report the URL as removed instead of updated
    #[arg(long)]
    pub deleted: bool,

    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
    pub access_token: String,
}

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    /// Search Console property
    #[arg(long)]
    pub site: String,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start_date: NaiveDate,

    /// Last day (inclusive), YYYY-MM-DD
    #[arg(long)]
    pub end_date: NaiveDate,

    /// Group rows by these dimensions, comma separated
    #[arg(long = "dimension", value_enum, value_delimiter = ',')]
    pub dimensions: Vec<Dimension>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(SEARCH_ANALYTICS_MAX_ROWS)))]
    pub row_limit: Option<u32>,

    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
    pub access_token: String,
}

impl AnalyticsArgs {
    pub fn query(&self) -> SearchAnalyticsQuery {
        SearchAnalyticsQuery {
            start_date: self.start_date,
            end_date: self.end_date,
            dimensions: self.dimensions.clone(),
            row_limit: self.row_limit,
        }
    }
}

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    #[arg(long, env = ACCESS_TOKEN_ENV, hide_env_values = true)]
    pub access_token: String,
}
