//! Configuration types.
//!
//! This module defines the enums and structs used for command-line parsing and
//! library-side run configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use super::constants::{
    DEFAULT_MAX_BATCH_SIZE, MAX_BATCH_SIZE_LIMIT, REQUEST_TIMEOUT, RETRY_BACKOFF_BASE_SECS,
    RETRY_MAX_ATTEMPTS, RETRY_MAX_ATTEMPTS_LIMIT,
};
use super::quota::QuotaTable;
use crate::classification::OperatingMode;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Library configuration for an inspection run (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use gsc_status::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("urls.txt"),
///     site_url: "sc-domain:example.com".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// File to read URLs from (`-` for stdin)
    pub file: PathBuf,

    /// Search Console property (`https://example.com/` or `sc-domain:example.com`)
    pub site_url: String,

    /// Where to write the batch result as JSON
    pub output: Option<PathBuf>,

    /// Classification decision path
    pub mode: OperatingMode,

    /// Largest URL list accepted in one run
    pub max_batch_size: usize,

    /// Attempts per URL before recording a soft failure
    pub max_attempts: u32,

    /// Backoff base delay in seconds
    pub backoff_base_secs: u64,

    /// Randomize backoff delays
    pub jitter: bool,

    /// Per-request timeout
    pub timeout: Duration,

    /// OAuth2 bearer token for the Google APIs
    pub access_token: String,

    /// Quota limits per API family
    pub quotas: QuotaTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("urls.txt"),
            site_url: String::new(),
            output: None,
            mode: OperatingMode::Strict,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_attempts: RETRY_MAX_ATTEMPTS,
            backoff_base_secs: RETRY_BACKOFF_BASE_SECS,
            jitter: true,
            timeout: REQUEST_TIMEOUT,
            access_token: String::new(),
            quotas: QuotaTable::default(),
        }
    }
}

impl Config {
    /// Checks field ranges before any network or quota work starts.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with an actionable message.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.site_url.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "site_url",
                message: "must name a Search Console property, e.g. https://example.com/ or sc-domain:example.com".to_string(),
            });
        }
        if self.max_batch_size == 0 || self.max_batch_size > MAX_BATCH_SIZE_LIMIT {
            return Err(ConfigValidationError {
                field: "max_batch_size",
                message: format!("must be greater than 0 and at most {MAX_BATCH_SIZE_LIMIT}"),
            });
        }
        if self.max_attempts == 0 || self.max_attempts > RETRY_MAX_ATTEMPTS_LIMIT {
            return Err(ConfigValidationError {
                field: "max_attempts",
                message: format!("must be greater than 0 and at most {RETRY_MAX_ATTEMPTS_LIMIT}"),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
