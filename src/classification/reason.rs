//! Reason codes and the raw-field to reason-code mapping.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::types::RawIndexStatus;
use crate::utils::dedup_preserving_order;

/// Machine-readable cause attached to a classification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    RobotsBlocked,
    MetaNoindex,
    #[serde(rename = "HTTP_STATUS_NOT_200")]
    #[strum(serialize = "HTTP_STATUS_NOT_200")]
    HttpStatusNot200,
    #[serde(rename = "SOFT_404_SUSPECTED")]
    #[strum(serialize = "SOFT_404_SUSPECTED")]
    Soft404Suspected,
    Redirected,
    AuthRequiredOrFailed,
    Timeout,
    IndexingPending,
    DuplicateWithoutCanonical,
    DuplicateCanonicalOther,
    CanonicalMismatch,
    IndexedConfirmed,
    NotIndexedConfirmed,
    InsufficientData,
    HeuristicOnly,
    RateLimited,
    CaptchaOrBlocked,
}

impl ReasonCode {
    /// Technical signals that force NOT_INDEXED no matter what the verdict says.
    pub const BLOCKING: [ReasonCode; 7] = [
        ReasonCode::RobotsBlocked,
        ReasonCode::MetaNoindex,
        ReasonCode::HttpStatusNot200,
        ReasonCode::Soft404Suspected,
        ReasonCode::Redirected,
        ReasonCode::AuthRequiredOrFailed,
        ReasonCode::Timeout,
    ];

    pub fn is_blocking(self) -> bool {
        Self::BLOCKING.contains(&self)
    }
}

const NOINDEX_INDEXING_STATES: [&str; 3] = [
    "BLOCKED_BY_META_TAG",
    "BLOCKED_BY_NOINDEX",
    "BLOCKED_BY_HTTP_HEADER",
];

/// Page-fetch states that carry no failure signal.
const BENIGN_PAGE_FETCH_STATES: [&str; 3] = ["", "SUCCESSFUL", "PAGE_FETCH_STATE_UNSPECIFIED"];

/// Maps a non-benign page-fetch state to its reason code.
fn page_fetch_reason(state: &str) -> ReasonCode {
    match state {
        "SOFT_404" => ReasonCode::Soft404Suspected,
        "REDIRECT_ERROR" => ReasonCode::Redirected,
        "ACCESS_DENIED" => ReasonCode::AuthRequiredOrFailed,
        "INTERNAL_CRAWL_ERROR" => ReasonCode::Timeout,
        "BLOCKED_ROBOTS_TXT" => ReasonCode::RobotsBlocked,
        _ => ReasonCode::HttpStatusNot200,
    }
}

fn coverage_reasons(coverage: &str, out: &mut Vec<ReasonCode>) {
    if coverage.contains("Crawled - not indexed") {
        out.push(ReasonCode::IndexingPending);
    }
    if coverage.contains("Duplicate") {
        if coverage.contains("without user-selected canonical") {
            out.push(ReasonCode::DuplicateWithoutCanonical);
        } else if coverage.contains("chose different") {
            out.push(ReasonCode::DuplicateCanonicalOther);
        }
    }
    // Only this phrase is matched case-insensitively.
    if coverage.to_lowercase().contains("soft 404") {
        out.push(ReasonCode::Soft404Suspected);
    }
}

/// Derives reason codes from raw index-status fields.
///
/// Each rule is evaluated independently; the concatenated output is
/// deduplicated keeping the first occurrence. Never fails.
pub fn map_reason_codes(raw: &RawIndexStatus) -> Vec<ReasonCode> {
    let mut reasons = Vec::new();

    let robots = raw.robots_txt_state();
    if !robots.is_empty() && robots != "ALLOWED" {
        reasons.push(ReasonCode::RobotsBlocked);
    }

    if NOINDEX_INDEXING_STATES.contains(&raw.indexing_state()) {
        reasons.push(ReasonCode::MetaNoindex);
    }

    let fetch = raw.page_fetch_state();
    if !BENIGN_PAGE_FETCH_STATES.contains(&fetch) {
        reasons.push(page_fetch_reason(fetch));
    }

    coverage_reasons(raw.coverage_state(), &mut reasons);

    let google = raw.google_canonical();
    let user = raw.user_canonical();
    if !google.is_empty() && !user.is_empty() && google != user {
        reasons.push(ReasonCode::CanonicalMismatch);
    }

    dedup_preserving_order(reasons)
}
