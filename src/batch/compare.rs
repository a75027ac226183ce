//! Run-to-run comparison.
//!
//! Only URLs present in both runs are compared. URLs that appear in just one
//! run are ignored: they produce no change events and do not move the deltas.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::aggregation::build_aggregation;
use super::types::{PerUrlResult, RunSnapshot};
use crate::classification::{IndexingStatus, ReasonCode};

/// Kind of status transition between two runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    NewlyIndexed,
    DroppedFromIndex,
    BecameUnknown,
    RecoveredFromUnknown,
}

/// Maps a (previous, current) status pair to its change type; `None` means
/// no change.
pub fn transition(previous: IndexingStatus, current: IndexingStatus) -> Option<ChangeType> {
    use IndexingStatus::*;
    match (previous, current) {
        (Indexed, Indexed) | (NotIndexed, NotIndexed) | (Unknown, Unknown) => None,
        (Indexed, NotIndexed) => Some(ChangeType::DroppedFromIndex),
        (NotIndexed, Indexed) => Some(ChangeType::NewlyIndexed),
        (Indexed, Unknown) | (NotIndexed, Unknown) => Some(ChangeType::BecameUnknown),
        (Unknown, Indexed) | (Unknown, NotIndexed) => Some(ChangeType::RecoveredFromUnknown),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub url: String,
    pub change_type: ChangeType,
    pub previous_status: IndexingStatus,
    pub current_status: IndexingStatus,
    pub current_reason_codes: Vec<ReasonCode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub changes: Vec<Change>,
    pub indexed_delta: i64,
    pub not_indexed_delta: i64,
    pub unknown_delta: i64,
    /// Current-run reason codes over the overlapping URLs, most frequent first
    pub dominant_reason_codes: Vec<(ReasonCode, usize)>,
}

fn delta(previous: usize, current: usize) -> i64 {
    current as i64 - previous as i64
}

/// Diffs two runs over their overlapping URLs. Changes are ordered by URL.
pub fn compare(previous: &RunSnapshot, current: &RunSnapshot) -> ComparisonResult {
    let overlap: Vec<(&PerUrlResult, &PerUrlResult)> = current
        .iter()
        .filter_map(|(url, curr)| previous.get(url).map(|prev| (prev, curr)))
        .collect();

    if overlap.is_empty() {
        return ComparisonResult::default();
    }

    let changes = overlap
        .iter()
        .filter_map(|(prev, curr)| {
            transition(prev.status, curr.status).map(|change_type| Change {
                url: curr.url.clone(),
                change_type,
                previous_status: prev.status,
                current_status: curr.status,
                current_reason_codes: curr
                    .classification()
                    .map(|c| c.reason_codes().to_vec())
                    .unwrap_or_default(),
            })
        })
        .collect();

    let before = build_aggregation(overlap.iter().map(|(prev, _)| *prev));
    let after = build_aggregation(overlap.iter().map(|(_, curr)| *curr));

    ComparisonResult {
        changes,
        indexed_delta: delta(before.indexed_count, after.indexed_count),
        not_indexed_delta: delta(before.not_indexed_count, after.not_indexed_count),
        unknown_delta: delta(before.unknown_count, after.unknown_count),
        dominant_reason_codes: after.ranked_reason_codes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::failure::to_soft_failure_result;
    use crate::classification::{classify, OperatingMode, RawIndexStatus};

    fn indexed(url: &str) -> PerUrlResult {
        let raw = RawIndexStatus {
            verdict: Some("PASS".into()),
            coverage_state: Some("Submitted and indexed".into()),
            ..Default::default()
        };
        let classification = classify(&raw, None, OperatingMode::Strict);
        PerUrlResult::classified(url, raw, classification)
    }

    fn not_indexed(url: &str) -> PerUrlResult {
        let raw = RawIndexStatus {
            verdict: Some("FAIL".into()),
            indexing_state: Some("BLOCKED_BY_META_TAG".into()),
            ..Default::default()
        };
        let classification = classify(&raw, None, OperatingMode::Strict);
        PerUrlResult::classified(url, raw, classification)
    }

    fn snapshot(results: Vec<PerUrlResult>) -> RunSnapshot {
        results.into_iter().map(|r| (r.url.clone(), r)).collect()
    }

    #[test]
    fn test_transition_table() {
        use IndexingStatus::*;
        let all = [Indexed, NotIndexed, Unknown];
        let mut events = 0;
        for prev in all {
            for curr in all {
                let change = transition(prev, curr);
                if prev == curr {
                    assert!(change.is_none());
                } else {
                    events += 1;
                    assert!(change.is_some());
                }
            }
        }
        assert_eq!(events, 6);
        assert_eq!(
            transition(Indexed, NotIndexed),
            Some(ChangeType::DroppedFromIndex)
        );
        assert_eq!(transition(NotIndexed, Indexed), Some(ChangeType::NewlyIndexed));
        assert_eq!(transition(NotIndexed, Unknown), Some(ChangeType::BecameUnknown));
        assert_eq!(
            transition(Unknown, NotIndexed),
            Some(ChangeType::RecoveredFromUnknown)
        );
    }

    #[test]
    fn test_dropped_from_index() {
        let previous = snapshot(vec![indexed("https://a/")]);
        let current = snapshot(vec![not_indexed("https://a/")]);
        let result = compare(&previous, &current);
        assert_eq!(result.changes.len(), 1);
        let change = &result.changes[0];
        assert_eq!(change.change_type, ChangeType::DroppedFromIndex);
        assert_eq!(change.previous_status, IndexingStatus::Indexed);
        assert_eq!(change.current_status, IndexingStatus::NotIndexed);
        assert_eq!(
            change.current_reason_codes,
            vec![ReasonCode::NotIndexedConfirmed, ReasonCode::MetaNoindex]
        );
        assert_eq!(result.indexed_delta, -1);
        assert_eq!(result.not_indexed_delta, 1);
        assert_eq!(result.unknown_delta, 0);
    }

    #[test]
    fn test_non_overlapping_urls_are_ignored() {
        let previous = snapshot(vec![indexed("https://a/"), indexed("https://only-before/")]);
        let current = snapshot(vec![
            not_indexed("https://a/"),
            not_indexed("https://only-after/"),
            to_soft_failure_result("https://only-after-2/", 429, None),
        ]);
        let result = compare(&previous, &current);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].url, "https://a/");
        assert_eq!(result.indexed_delta, -1);
        assert_eq!(result.not_indexed_delta, 1);
        assert_eq!(result.unknown_delta, 0);
        assert!(!result
            .dominant_reason_codes
            .iter()
            .any(|(code, _)| *code == ReasonCode::RateLimited));
    }

    #[test]
    fn test_no_overlap_returns_empty() {
        let previous = snapshot(vec![indexed("https://a/")]);
        let current = snapshot(vec![indexed("https://b/")]);
        assert_eq!(compare(&previous, &current), ComparisonResult::default());
    }

    #[test]
    fn test_unchanged_urls_emit_nothing_but_count_in_dominant_codes() {
        let previous = snapshot(vec![not_indexed("https://a/"), not_indexed("https://b/")]);
        let current = snapshot(vec![not_indexed("https://a/"), not_indexed("https://b/")]);
        let result = compare(&previous, &current);
        assert!(result.changes.is_empty());
        assert_eq!(result.not_indexed_delta, 0);
        assert_eq!(
            result.dominant_reason_codes,
            vec![
                (ReasonCode::MetaNoindex, 2),
                (ReasonCode::NotIndexedConfirmed, 2)
            ]
        );
    }

    #[test]
    fn test_became_unknown_and_recovered() {
        let previous = snapshot(vec![
            indexed("https://a/"),
            to_soft_failure_result("https://b/", 503, None),
        ]);
        let current = snapshot(vec![
            to_soft_failure_result("https://a/", 429, None),
            indexed("https://b/"),
        ]);
        let result = compare(&previous, &current);
        let kinds: Vec<_> = result.changes.iter().map(|c| c.change_type).collect();
        assert_eq!(
            kinds,
            vec![ChangeType::BecameUnknown, ChangeType::RecoveredFromUnknown]
        );
        assert_eq!(result.indexed_delta, 0);
        assert_eq!(result.unknown_delta, 0);
        assert_eq!(result.changes[0].current_reason_codes, vec![ReasonCode::RateLimited]);
    }
}
