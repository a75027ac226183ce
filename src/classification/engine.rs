//! Index-status classification engine.
//!
//! Turns raw inspection fields into a business verdict. Rules are evaluated in
//! a fixed order and the first match wins:
//!
//! 1. No verdict and no state fields: UNKNOWN / low / `INSUFFICIENT_DATA`
//! 2. Any blocking reason: NOT_INDEXED / high (overrides any verdict)
//! 3. `PASS` with an indexed coverage phrase: INDEXED / high
//! 4. `FAIL`: NOT_INDEXED / high
//! 5. `BestEffort` with an indexed coverage phrase: INDEXED / medium / heuristic
//! 6. Otherwise: UNKNOWN / medium
//!
//! The engine is total: every input yields a result.

use chrono::{DateTime, Utc};

use super::reason::{map_reason_codes, ReasonCode};
use super::types::{
    ClassificationResult, Confidence, IndexingStatus, OperatingMode, RawIndexStatus, SourceType,
};

const VERDICT_PASS: &str = "PASS";
const VERDICT_FAIL: &str = "FAIL";
const VERDICT_UNSPECIFIED: &str = "VERDICT_UNSPECIFIED";

const INDEXED_COVERAGE_PHRASES: [&str; 3] = ["Submitted and indexed", "Indexed", "indexed"];

fn coverage_says_indexed(coverage: &str) -> bool {
    INDEXED_COVERAGE_PHRASES
        .iter()
        .any(|phrase| coverage.contains(phrase))
}

fn has_no_signal(raw: &RawIndexStatus) -> bool {
    let verdict = raw.verdict();
    (verdict.is_empty() || verdict == VERDICT_UNSPECIFIED)
        && raw.coverage_state().is_empty()
        && raw.indexing_state().is_empty()
        && raw.robots_txt_state().is_empty()
        && raw.page_fetch_state().is_empty()
}

fn with_lead(lead: ReasonCode, rest: impl IntoIterator<Item = ReasonCode>) -> Vec<ReasonCode> {
    std::iter::once(lead).chain(rest).collect()
}

/// Classifies raw index-status fields.
///
/// `checked_at` defaults to the current time when `None`; pass a fixed value
/// for reproducible results.
pub fn classify(
    raw: &RawIndexStatus,
    checked_at: Option<DateTime<Utc>>,
    mode: OperatingMode,
) -> ClassificationResult {
    let checked_at = checked_at.unwrap_or_else(Utc::now);

    if has_no_signal(raw) {
        return ClassificationResult::new(
            IndexingStatus::Unknown,
            Confidence::Low,
            vec![ReasonCode::InsufficientData],
            checked_at,
            SourceType::Authoritative,
        );
    }

    let mapped = map_reason_codes(raw);
    let non_blocking = || mapped.iter().copied().filter(|code| !code.is_blocking());
    let verdict = raw.verdict();
    let indexed_phrase = coverage_says_indexed(raw.coverage_state());

    let (status, confidence, reason_codes, source_type) =
        if mapped.iter().any(|code| code.is_blocking()) {
            (
                IndexingStatus::NotIndexed,
                Confidence::High,
                with_lead(ReasonCode::NotIndexedConfirmed, mapped.iter().copied()),
                SourceType::Authoritative,
            )
        } else if verdict == VERDICT_PASS && indexed_phrase {
            (
                IndexingStatus::Indexed,
                Confidence::High,
                with_lead(ReasonCode::IndexedConfirmed, non_blocking()),
                SourceType::Authoritative,
            )
        } else if verdict == VERDICT_FAIL {
            (
                IndexingStatus::NotIndexed,
                Confidence::High,
                with_lead(ReasonCode::NotIndexedConfirmed, mapped.iter().copied()),
                SourceType::Authoritative,
            )
        } else if mode == OperatingMode::BestEffort && indexed_phrase {
            (
                IndexingStatus::Indexed,
                Confidence::Medium,
                with_lead(ReasonCode::HeuristicOnly, non_blocking()),
                SourceType::Heuristic,
            )
        } else {
            (
                IndexingStatus::Unknown,
                Confidence::Medium,
                with_lead(ReasonCode::InsufficientData, mapped.iter().copied()),
                SourceType::Authoritative,
            )
        };

    log::debug!(
        "Classified verdict={:?} coverage={:?} as {} ({}, {})",
        verdict,
        raw.coverage_state(),
        status,
        confidence,
        source_type
    );

    ClassificationResult::new(status, confidence, reason_codes, checked_at, source_type)
}
