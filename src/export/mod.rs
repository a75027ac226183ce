//! Export and import of run results.
//!
//! Batch results are written as a single JSON document (the format that
//! `compare` reads back) or as JSON Lines with one flattened record per URL.
//! Raw index-status records can be loaded for offline classification.

mod json;
mod jsonl;
mod raw;
mod types;
mod writer;

pub use json::{read_batch_json, read_snapshot, write_batch_json};
pub use jsonl::{export_jsonl, write_results_jsonl};
pub use raw::{read_raw_statuses, RawStatusRecord};
pub use types::ExportFormat;
pub use writer::open_output;

use std::path::Path;

use anyhow::Result;

use crate::batch::BatchResult;

/// Writes a batch result in the format implied by `output`, or as JSON to
/// stdout when no path is given.
pub fn export_batch(batch: &BatchResult, output: Option<&Path>) -> Result<()> {
    match output.map(ExportFormat::from_path).unwrap_or_default() {
        ExportFormat::Json => write_batch_json(batch, output),
        ExportFormat::Jsonl => export_jsonl(&batch.results, output).map(|_| ()),
    }
}
