//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (quota, validation, API and batch errors)
//! - Error categorization for statistics
//! - Processing statistics tracking (errors and info metrics)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_api_error, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{
    ApiError, BatchError, ErrorType, InfoType, InitializationError, QuotaExceeded, QuotaKind,
    ValidationError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestGatewayTimeout);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestGatewayTimeout), 1);

        stats.increment_info(InfoType::Retry);
        stats.increment_info(InfoType::Retry);
        assert_eq!(stats.get_info_count(InfoType::Retry), 2);
        assert_eq!(stats.total_errors(), 1);
        assert_eq!(stats.total_info(), 2);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        use std::sync::Arc;
        let stats = Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_error(ErrorType::TransportError);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_error_count(ErrorType::TransportError), 400);
    }
}
