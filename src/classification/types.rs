//! Classification input and output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::reason::ReasonCode;
use super::recommendations::recommendations_for;

/// Raw index-status fields as returned by the URL Inspection API.
///
/// Every field may be absent. An absent field is not the same as a positive
/// value such as `ALLOWED` or `SUCCESSFUL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIndexStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots_txt_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_fetch_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_canonical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_canonical: Option<String>,
}

impl RawIndexStatus {
    pub fn verdict(&self) -> &str {
        field(&self.verdict)
    }

    pub fn coverage_state(&self) -> &str {
        field(&self.coverage_state)
    }

    pub fn indexing_state(&self) -> &str {
        field(&self.indexing_state)
    }

    pub fn robots_txt_state(&self) -> &str {
        field(&self.robots_txt_state)
    }

    pub fn page_fetch_state(&self) -> &str {
        field(&self.page_fetch_state)
    }

    pub fn google_canonical(&self) -> &str {
        field(&self.google_canonical)
    }

    pub fn user_canonical(&self) -> &str {
        field(&self.user_canonical)
    }
}

/// Absent and whitespace-only values both read as "".
fn field(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// Business verdict for a single URL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexingStatus {
    Indexed,
    NotIndexed,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Whether a verdict comes from the API's own signals or from coverage-text heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceType {
    Authoritative,
    Heuristic,
}

/// Decision path used by the classification engine.
///
/// `BestEffort` additionally accepts an "indexed" coverage phrase as a weaker,
/// heuristic positive signal when the verdict itself is inconclusive.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatingMode {
    /// Only authoritative signals produce INDEXED
    #[default]
    Strict,
    /// Coverage text alone may produce a heuristic INDEXED
    BestEffort,
}

/// Classification output for one URL.
///
/// Built once by [`ClassificationResult::new`]; recommendations are always
/// derived from the reason codes and cannot be set independently.
/// Deserialization goes through `new` as well, so a loaded file cannot carry
/// duplicate reason codes or its own recommendation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ClassificationRecord")]
pub struct ClassificationResult {
    status: IndexingStatus,
    confidence: Confidence,
    reason_codes: Vec<ReasonCode>,
    checked_at: DateTime<Utc>,
    source_type: SourceType,
    recommendations: Vec<String>,
}

/// Stored form of a [`ClassificationResult`]. A stored `recommendations`
/// field is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassificationRecord {
    status: IndexingStatus,
    confidence: Confidence,
    #[serde(default)]
    reason_codes: Vec<ReasonCode>,
    checked_at: DateTime<Utc>,
    source_type: SourceType,
}

impl From<ClassificationRecord> for ClassificationResult {
    fn from(record: ClassificationRecord) -> Self {
        ClassificationResult::new(
            record.status,
            record.confidence,
            record.reason_codes,
            record.checked_at,
            record.source_type,
        )
    }
}

impl ClassificationResult {
    pub fn new(
        status: IndexingStatus,
        confidence: Confidence,
        reason_codes: Vec<ReasonCode>,
        checked_at: DateTime<Utc>,
        source_type: SourceType,
    ) -> Self {
        let reason_codes = crate::utils::dedup_preserving_order(reason_codes);
        let recommendations = recommendations_for(&reason_codes);
        Self {
            status,
            confidence,
            reason_codes,
            checked_at,
            source_type,
            recommendations,
        }
    }

    pub fn status(&self) -> IndexingStatus {
        self.status
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    pub fn reason_codes(&self) -> &[ReasonCode] {
        &self.reason_codes
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn has_reason(&self, code: ReasonCode) -> bool {
        self.reason_codes.contains(&code)
    }
}
