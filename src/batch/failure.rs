//! Soft versus hard failure classification.
//!
//! Transient upstream errors (timeouts, 429 and 5xx) degrade a single URL to
//! an UNKNOWN result so the batch can continue. Every other error is a hard
//! failure and stops the batch.

use chrono::{DateTime, Utc};

use super::types::{FailureType, InspectionResult, PerUrlResult};
use crate::classification::{
    ClassificationResult, Confidence, IndexingStatus, ReasonCode, SourceType,
};
use crate::error_handling::{ApiError, BatchError};

const SOFT_FAILURE_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// True when `error_code` is a transient failure worth degrading instead of aborting.
pub fn is_soft_failure(error_code: u16) -> bool {
    SOFT_FAILURE_CODES.contains(&error_code)
}

/// Reason code recorded for a soft failure.
pub fn soft_failure_reason(error_code: u16) -> ReasonCode {
    match error_code {
        429 => ReasonCode::RateLimited,
        408 | 504 => ReasonCode::Timeout,
        _ => ReasonCode::InsufficientData,
    }
}

/// Synthetic UNKNOWN result for a soft failure, carrying a single reason code.
///
/// `checked_at` defaults to the current time.
pub fn to_soft_failure_result(
    url: &str,
    error_code: u16,
    checked_at: Option<DateTime<Utc>>,
) -> PerUrlResult {
    let classification = ClassificationResult::new(
        IndexingStatus::Unknown,
        Confidence::Low,
        vec![soft_failure_reason(error_code)],
        checked_at.unwrap_or_else(Utc::now),
        SourceType::Authoritative,
    );
    PerUrlResult {
        url: url.to_string(),
        status: IndexingStatus::Unknown,
        inspection: InspectionResult {
            index_status: None,
            classification: Some(classification),
        },
        failure_type: Some(FailureType::Soft),
        error: None,
    }
}

/// Degrades a soft API error into a result, or returns the hard failure.
///
/// # Errors
///
/// Returns `BatchError::Hard` when the error has no soft status code. The
/// error carries no completed results; the caller attaches them.
pub fn degrade_or_fail(
    url: &str,
    error: ApiError,
    checked_at: Option<DateTime<Utc>>,
) -> Result<PerUrlResult, BatchError> {
    match error.status_code().filter(|code| is_soft_failure(*code)) {
        Some(code) => {
            Ok(to_soft_failure_result(url, code, checked_at).with_error(error.to_string()))
        }
        None => Err(BatchError::Hard {
            url: url.to_string(),
            source: error,
            completed: Vec::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_codes() {
        for code in [408, 429, 500, 502, 503, 504] {
            assert!(is_soft_failure(code), "{code}");
        }
        for code in [200, 400, 401, 403, 404, 410, 501, 505] {
            assert!(!is_soft_failure(code), "{code}");
        }
    }

    #[test]
    fn test_soft_failure_reasons() {
        assert_eq!(soft_failure_reason(429), ReasonCode::RateLimited);
        assert_eq!(soft_failure_reason(408), ReasonCode::Timeout);
        assert_eq!(soft_failure_reason(504), ReasonCode::Timeout);
        assert_eq!(soft_failure_reason(500), ReasonCode::InsufficientData);
        assert_eq!(soft_failure_reason(503), ReasonCode::InsufficientData);
    }

    #[test]
    fn test_soft_failure_result_shape() {
        let result = to_soft_failure_result("https://example.com/", 429, None);
        assert_eq!(result.status, IndexingStatus::Unknown);
        assert_eq!(result.failure_type, Some(FailureType::Soft));
        let classification = result.classification().unwrap();
        assert_eq!(classification.reason_codes(), &[ReasonCode::RateLimited]);
        assert_eq!(classification.status(), IndexingStatus::Unknown);
        assert_eq!(classification.recommendations().len(), 1);
    }

    #[test]
    fn test_soft_failure_result_uses_given_timestamp() {
        let checked_at = "2026-03-01T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let first = to_soft_failure_result("https://example.com/", 503, Some(checked_at));
        let second = to_soft_failure_result("https://example.com/", 503, Some(checked_at));
        assert_eq!(first, second);
        assert_eq!(first.classification().unwrap().checked_at(), checked_at);
    }

    #[test]
    fn test_degrade_soft_error() {
        let error = ApiError::Status {
            code: 503,
            message: "backend unavailable".into(),
        };
        let result = degrade_or_fail("https://example.com/", error, None).unwrap();
        assert!(result.is_soft_failure());
        assert!(result.error.unwrap().contains("503"));
    }

    #[test]
    fn test_timeout_error_degrades_to_timeout_reason() {
        let result =
            degrade_or_fail("https://example.com/", ApiError::Timeout("slow".into()), None).unwrap();
        assert!(result
            .classification()
            .unwrap()
            .has_reason(ReasonCode::Timeout));
    }

    #[test]
    fn test_hard_error_propagates() {
        let error = ApiError::Status {
            code: 404,
            message: "not found".into(),
        };
        let err = degrade_or_fail("https://example.com/", error, None).unwrap_err();
        match err {
            BatchError::Hard {
                url,
                source,
                completed,
            } => {
                assert_eq!(url, "https://example.com/");
                assert!(completed.is_empty());
                assert_eq!(source.status_code(), Some(404));
            }
            other => panic!("expected hard failure, got {other:?}"),
        }
        assert!(degrade_or_fail("u", ApiError::Decode("bad json".into()), None).is_err());
    }
}
