//! JSONL export functionality.
//!
//! Each line is a complete JSON object describing one URL's outcome, flattened
//! for piping to `jq` or loading into a spreadsheet tool.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use super::writer::open_output;
use crate::batch::PerUrlResult;

fn result_to_json(result: &PerUrlResult) -> Value {
    let classification = result.classification();
    json!({
        "url": result.url,
        "status": result.status,
        "confidence": classification.map(|c| c.confidence()),
        "reasonCodes": classification.map(|c| c.reason_codes()).unwrap_or_default(),
        "recommendations": classification.map(|c| c.recommendations()).unwrap_or_default(),
        "checkedAt": classification.map(|c| c.checked_at()),
        "sourceType": classification.map(|c| c.source_type()),
        "failureType": result.failure_type,
        "error": result.error,
    })
}

/// Writes one JSON object per result to `writer`.
///
/// Returns the number of records written.
pub fn write_results_jsonl<W: Write>(results: &[PerUrlResult], writer: &mut W) -> Result<usize> {
    let mut record_count = 0;
    for result in results {
        serde_json::to_writer(&mut *writer, &result_to_json(result))?;
        writeln!(writer)?;
        record_count += 1;
    }
    writer.flush()?;
    Ok(record_count)
}

/// Exports results as JSONL to a file, or stdout when `output` is `None`.
pub fn export_jsonl(results: &[PerUrlResult], output: Option<&Path>) -> Result<usize> {
    let mut writer = open_output(output)?;
    write_results_jsonl(results, &mut writer)
}
