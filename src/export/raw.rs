//! Loading raw index-status records for offline classification.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classification::RawIndexStatus;

/// One URL with its raw index-status fields, as saved from the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatusRecord {
    pub url: String,
    #[serde(default)]
    pub index_status: RawIndexStatus,
}

/// Reads a JSON array of `{ "url": ..., "indexStatus": { ... } }` records.
pub fn read_raw_statuses(path: &Path) -> Result<Vec<RawStatusRecord>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read raw statuses: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse raw statuses: {}", path.display()))
}
