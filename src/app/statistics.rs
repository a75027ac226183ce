//! Summary printing for batch runs and run comparisons.

use log::info;
use strum::IntoEnumIterator;

use crate::batch::{BatchResult, ComparisonResult};
use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Prints a one-line outcome plus the most frequent reason codes of a batch.
pub fn print_batch_summary(batch: &BatchResult, top: usize) {
    let aggregation = &batch.aggregation;
    let elapsed = (batch.finished_at - batch.started_at).num_milliseconds() as f64 / 1000.0;
    info!(
        "Inspected {} URL{} for {} in {:.1}s: {} indexed, {} not indexed, {} unknown",
        aggregation.total(),
        if aggregation.total() == 1 { "" } else { "s" },
        batch.site_url,
        elapsed,
        aggregation.indexed_count,
        aggregation.not_indexed_count,
        aggregation.unknown_count
    );
    if batch.soft_failure_count > 0 {
        info!(
            "{} URL{} degraded to UNKNOWN after transient API failures",
            batch.soft_failure_count,
            if batch.soft_failure_count == 1 { "" } else { "s" }
        );
    }
    let ranked = aggregation.ranked_reason_codes();
    if !ranked.is_empty() {
        info!("Top reason codes:");
        for (code, count) in ranked.into_iter().take(top) {
            info!("   {}: {}", code, count);
        }
    }
}

fn signed(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// Prints change events, deltas and dominant reason codes of a comparison.
pub fn print_comparison(comparison: &ComparisonResult, top: usize) {
    info!(
        "Deltas over overlapping URLs: indexed {}, not indexed {}, unknown {}",
        signed(comparison.indexed_delta),
        signed(comparison.not_indexed_delta),
        signed(comparison.unknown_delta)
    );
    if comparison.changes.is_empty() {
        info!("No status changes");
    } else {
        info!("{} status change(s):", comparison.changes.len());
        for change in &comparison.changes {
            let reasons: Vec<&str> = change
                .current_reason_codes
                .iter()
                .map(|code| code.as_ref())
                .collect();
            info!(
                "   {} {} ({} -> {}) [{}]",
                change.change_type,
                change.url,
                change.previous_status,
                change.current_status,
                reasons.join(", ")
            );
        }
    }
    if !comparison.dominant_reason_codes.is_empty() {
        info!("Dominant reason codes:");
        for (code, count) in comparison.dominant_reason_codes.iter().take(top) {
            info!("   {}: {}", code, count);
        }
    }
}

/// Prints error and info statistics to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
