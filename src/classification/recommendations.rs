//! Static reason-code to recommendation text lookup.

use super::reason::ReasonCode;
use crate::utils::dedup_preserving_order;

const CANONICAL_TEXT: &str =
    "Google selected a different canonical. Consolidate duplicate content or align rel=canonical with the preferred URL.";

/// Returns the recommendation text for a reason code, if it has one.
///
/// Confirmation and bookkeeping codes (`INDEXED_CONFIRMED`,
/// `NOT_INDEXED_CONFIRMED`, `HEURISTIC_ONLY`) have no text.
pub fn recommendation_text(code: ReasonCode) -> Option<&'static str> {
    let text = match code {
        ReasonCode::RobotsBlocked => {
            "Allow Googlebot to crawl this URL in robots.txt."
        }
        ReasonCode::MetaNoindex => {
            "Remove the noindex directive (meta robots tag or X-Robots-Tag header) if the page should be indexed."
        }
        ReasonCode::HttpStatusNot200 => "Make the URL respond with HTTP 200.",
        ReasonCode::Soft404Suspected => {
            "Add meaningful content to the page, or return a real 404/410 status if it is gone."
        }
        ReasonCode::Redirected => {
            "Inspect and submit the final redirect target instead of the redirecting URL."
        }
        ReasonCode::AuthRequiredOrFailed => {
            "Make the page reachable without authentication."
        }
        ReasonCode::Timeout => {
            "Improve server response time and inspect the URL again later."
        }
        ReasonCode::IndexingPending => {
            "The page was crawled but not indexed. Improve content quality and internal linking, then request indexing."
        }
        ReasonCode::DuplicateWithoutCanonical => {
            "Add a rel=canonical tag pointing at the preferred URL."
        }
        ReasonCode::DuplicateCanonicalOther | ReasonCode::CanonicalMismatch => CANONICAL_TEXT,
        ReasonCode::InsufficientData => {
            "Request indexing in Search Console and inspect the URL again later."
        }
        ReasonCode::RateLimited => "API quota was exhausted. Retry this URL later.",
        ReasonCode::CaptchaOrBlocked => {
            "Let Googlebot through bot protection or CAPTCHA challenges."
        }
        ReasonCode::IndexedConfirmed
        | ReasonCode::NotIndexedConfirmed
        | ReasonCode::HeuristicOnly => return None,
    };
    Some(text)
}

/// Derives the ordered, deduplicated recommendation list for a set of reason codes.
pub fn recommendations_for(codes: &[ReasonCode]) -> Vec<String> {
    dedup_preserving_order(
        codes
            .iter()
            .filter_map(|code| recommendation_text(*code))
            .map(str::to_string),
    )
}
