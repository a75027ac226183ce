//! Error categorization for statistics.

use super::stats::ProcessingStats;
use super::types::{ApiError, ErrorType};

/// Categorizes an `ApiError` into an `ErrorType`.
pub fn categorize_api_error(error: &ApiError) -> ErrorType {
    match error {
        ApiError::Status { code, .. } => match code {
            408 => ErrorType::HttpRequestTimeout,
            429 => ErrorType::HttpRequestTooManyRequests,
            500 | 502 => ErrorType::HttpRequestServerError,
            503 => ErrorType::HttpRequestServiceUnavailable,
            504 => ErrorType::HttpRequestGatewayTimeout,
            400..=499 => ErrorType::HttpRequestClientError,
            _ => ErrorType::HttpRequestOtherError,
        },
        ApiError::Timeout(_) => ErrorType::HttpRequestTimeout,
        ApiError::Transport(_) => ErrorType::TransportError,
        ApiError::Decode(_) => ErrorType::DecodeError,
        ApiError::MissingIndexStatus => ErrorType::MissingIndexStatus,
    }
}

/// Increments the counter matching `error`.
pub fn update_error_stats(stats: &ProcessingStats, error: &ApiError) {
    stats.increment_error(categorize_api_error(error));
}
