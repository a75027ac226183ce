//! Batch processing of URL inspections.
//!
//! This module provides:
//! - Per-URL result types and the batch result
//! - Aggregation of results into status counts and a reason-code histogram
//! - Soft/hard failure classification
//! - Comparison of two runs
//! - The async batch runner tying quota, retries and classification together

mod aggregation;
mod compare;
mod failure;
mod runner;
mod types;

pub use aggregation::{build_aggregation, BatchAggregation};
pub use compare::{compare, transition, Change, ChangeType, ComparisonResult};
pub use failure::{degrade_or_fail, is_soft_failure, soft_failure_reason, to_soft_failure_result};
pub use runner::{validate_batch_size, BatchRunner, RunnerOptions};
pub use types::{BatchResult, FailureType, InspectionResult, PerUrlResult, RunSnapshot};
