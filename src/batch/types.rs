//! Batch result types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::aggregation::{build_aggregation, BatchAggregation};
use crate::classification::{ClassificationResult, IndexingStatus, OperatingMode, RawIndexStatus};

/// How a URL's inspection failed, if it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureType {
    Hard,
    Soft,
}

/// Inspection data behind a per-URL result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    /// Raw fields from the API; absent for synthetic failure results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_status: Option<RawIndexStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationResult>,
}

/// Outcome for one URL in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerUrlResult {
    pub url: String,
    pub status: IndexingStatus,
    pub inspection: InspectionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_type: Option<FailureType>,
    /// Upstream error text for soft failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PerUrlResult {
    /// Result for a URL whose inspection succeeded.
    pub fn classified(
        url: impl Into<String>,
        index_status: RawIndexStatus,
        classification: ClassificationResult,
    ) -> Self {
        Self {
            url: url.into(),
            status: classification.status(),
            inspection: InspectionResult {
                index_status: Some(index_status),
                classification: Some(classification),
            },
            failure_type: None,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn classification(&self) -> Option<&ClassificationResult> {
        self.inspection.classification.as_ref()
    }

    pub fn is_soft_failure(&self) -> bool {
        self.failure_type == Some(FailureType::Soft)
    }
}

/// URL to result map for one run, the unit compared between runs.
pub type RunSnapshot = BTreeMap<String, PerUrlResult>;

/// Everything produced by one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub site_url: String,
    pub mode: OperatingMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<PerUrlResult>,
    pub aggregation: BatchAggregation,
    pub soft_failure_count: usize,
}

impl BatchResult {
    pub fn new(
        site_url: impl Into<String>,
        mode: OperatingMode,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        results: Vec<PerUrlResult>,
    ) -> Self {
        let aggregation = build_aggregation(&results);
        let soft_failure_count = results.iter().filter(|r| r.is_soft_failure()).count();
        Self {
            site_url: site_url.into(),
            mode,
            started_at,
            finished_at,
            results,
            aggregation,
            soft_failure_count,
        }
    }

    /// Results keyed by URL. A URL listed twice keeps its last result.
    pub fn snapshot(&self) -> RunSnapshot {
        self.results
            .iter()
            .map(|result| (result.url.clone(), result.clone()))
            .collect()
    }
}
