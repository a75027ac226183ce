//! Batch aggregation: status counts plus a reason-code histogram.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::PerUrlResult;
use crate::classification::{IndexingStatus, ReasonCode};

/// Counts derived from a list of per-URL results. Always recomputed from the
/// full list, never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAggregation {
    pub indexed_count: usize,
    pub not_indexed_count: usize,
    pub unknown_count: usize,
    pub reason_code_counts: BTreeMap<ReasonCode, usize>,
}

impl BatchAggregation {
    pub fn total(&self) -> usize {
        self.indexed_count + self.not_indexed_count + self.unknown_count
    }

    /// Reason codes by descending count, ties broken by code name.
    pub fn ranked_reason_codes(&self) -> Vec<(ReasonCode, usize)> {
        let mut ranked: Vec<_> = self
            .reason_code_counts
            .iter()
            .map(|(code, count)| (*code, *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_ref().cmp(b.0.as_ref())));
        ranked
    }
}

/// Folds per-URL results into a [`BatchAggregation`].
///
/// Every reason code of every classified result is counted, so the histogram
/// spans the whole batch rather than distinct URLs.
pub fn build_aggregation<'a, I>(results: I) -> BatchAggregation
where
    I: IntoIterator<Item = &'a PerUrlResult>,
{
    results
        .into_iter()
        .fold(BatchAggregation::default(), |mut aggregation, result| {
            match result.status {
                IndexingStatus::Indexed => aggregation.indexed_count += 1,
                IndexingStatus::NotIndexed => aggregation.not_indexed_count += 1,
                IndexingStatus::Unknown => aggregation.unknown_count += 1,
            }
            if let Some(classification) = result.classification() {
                for code in classification.reason_codes() {
                    *aggregation.reason_code_counts.entry(*code).or_insert(0) += 1;
                }
            }
            aggregation
        })
}
