//! JSON export of a whole batch result.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::writer::open_output;
use crate::batch::{BatchResult, RunSnapshot};

/// Writes the batch result as pretty-printed JSON.
pub fn write_batch_json(batch: &BatchResult, output: Option<&Path>) -> Result<()> {
    let mut writer = open_output(output)?;
    serde_json::to_writer_pretty(&mut writer, batch).context("Failed to serialize batch result")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a batch result previously written by [`write_batch_json`].
pub fn read_batch_json(path: &Path) -> Result<BatchResult> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch result: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse batch result: {}", path.display()))
}

/// Reads a saved batch result and keys its results by URL.
pub fn read_snapshot(path: &Path) -> Result<RunSnapshot> {
    Ok(read_batch_json(path)?.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::to_soft_failure_result;
    use crate::classification::{IndexingStatus, OperatingMode};
    use chrono::Utc;

    #[test]
    fn test_write_then_read_batch_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let now = Utc::now();
        let batch = BatchResult::new(
            "sc-domain:example.com",
            OperatingMode::Strict,
            now,
            now,
            vec![to_soft_failure_result("https://example.com/a", 503, None)],
        );

        write_batch_json(&batch, Some(&path)).unwrap();
        let loaded = read_batch_json(&path).unwrap();

        assert_eq!(loaded, batch);
        let snapshot = read_snapshot(&path).unwrap();
        assert_eq!(
            snapshot["https://example.com/a"].status,
            IndexingStatus::Unknown
        );
    }

    #[test]
    fn test_read_batch_json_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, "not json").unwrap();
        let err = read_batch_json(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse batch result"));
    }

    #[test]
    fn test_read_batch_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_batch_json(&dir.path().join("absent.json")).is_err());
    }
}
