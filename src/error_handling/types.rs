//! Error type definitions.
//!
//! This module defines all error and statistics types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter as EnumIterMacro};
use thiserror::Error;

use crate::batch::PerUrlResult;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Quota axis that refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuotaKind {
    /// Queries per day
    Qpd,
    /// Queries per minute
    Qpm,
    /// Queries per second
    Qps,
}

/// A rate-limit quota refused the request.
///
/// Never retried internally; the caller decides whether to wait
/// `retry_after_seconds` (absent for daily budgets) and try again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} quota exceeded{}", retry_after_suffix(.retry_after_seconds))]
pub struct QuotaExceeded {
    pub kind: QuotaKind,
    pub retry_after_seconds: Option<u64>,
}

fn retry_after_suffix(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

impl QuotaExceeded {
    pub fn new(kind: QuotaKind, retry_after_seconds: Option<u64>) -> Self {
        Self {
            kind,
            retry_after_seconds,
        }
    }
}

/// Batch input rejected before any classification or quota work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("batch of {size} URLs exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("batch contains no URLs")]
    EmptyBatch,
}

/// Failure reported by a Google API call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-success HTTP status.
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection-level failure before any status was received.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response has no indexStatusResult")]
    MissingIndexStatus,
}

impl ApiError {
    /// HTTP-equivalent status code used for soft/hard failure decisions.
    ///
    /// Timeouts report 408 and connection failures 503; decode problems have
    /// no code and are always hard failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            ApiError::Timeout(_) => Some(408),
            ApiError::Transport(_) => Some(503),
            ApiError::Decode(_) | ApiError::MissingIndexStatus => None,
        }
    }
}

impl From<ReqwestError> for ApiError {
    fn from(error: ReqwestError) -> Self {
        if let Some(status) = error.status() {
            ApiError::Status {
                code: status.as_u16(),
                message: error.to_string(),
            }
        } else if error.is_timeout() {
            ApiError::Timeout(error.to_string())
        } else if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

/// Error that stops a whole batch.
///
/// `Quota` and `Hard` carry the results finished before the stop, in input order.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{source}")]
    Quota {
        #[source]
        source: QuotaExceeded,
        completed: Vec<PerUrlResult>,
    },

    /// Non-retryable failure for one URL; processing stops here.
    #[error("hard failure inspecting {url}: {source}")]
    Hard {
        url: String,
        #[source]
        source: ApiError,
        completed: Vec<PerUrlResult>,
    },
}

impl From<QuotaExceeded> for BatchError {
    fn from(source: QuotaExceeded) -> Self {
        BatchError::Quota {
            source,
            completed: Vec::new(),
        }
    }
}

impl BatchError {
    /// Results completed before the batch stopped.
    pub fn completed(&self) -> &[PerUrlResult] {
        match self {
            BatchError::Validation(_) => &[],
            BatchError::Quota { completed, .. } | BatchError::Hard { completed, .. } => completed,
        }
    }

    /// Attaches the results completed so far. Validation errors stay empty.
    pub fn with_completed(mut self, results: Vec<PerUrlResult>) -> Self {
        if let BatchError::Quota { completed, .. } | BatchError::Hard { completed, .. } = &mut self
        {
            *completed = results;
        }
        self
    }
}

/// Types of errors counted during a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    HttpRequestTimeout, // 408
    HttpRequestTooManyRequests, // 429
    HttpRequestServerError, // 500, 502
    HttpRequestServiceUnavailable, // 503
    HttpRequestGatewayTimeout, // 504
    HttpRequestClientError, // other 4xx
    HttpRequestOtherError,
    TransportError,
    DecodeError,
    MissingIndexStatus,
    QuotaExceededPerDay,
}

/// Informational events counted during a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    Retry,
    QuotaWait,
    SoftFailureRecorded,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestTimeout => "Request Timeout (408)",
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestServerError => "Server error (500/502)",
            ErrorType::HttpRequestServiceUnavailable => "Service Unavailable (503)",
            ErrorType::HttpRequestGatewayTimeout => "Gateway Timeout (504)",
            ErrorType::HttpRequestClientError => "Client error (4xx)",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::TransportError => "Transport error",
            ErrorType::DecodeError => "Response decode error",
            ErrorType::MissingIndexStatus => "Missing index status",
            ErrorType::QuotaExceededPerDay => "Daily quota exceeded",
        }
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::Retry => "Retried request",
            InfoType::QuotaWait => "Waited for per-minute quota",
            InfoType::SoftFailureRecorded => "Soft failure recorded as UNKNOWN",
        }
    }
}
