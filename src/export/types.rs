//! Export types.

use std::path::Path;

/// Output format for batch results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Full batch result as one JSON document
    #[default]
    Json,
    /// One flattened JSON object per URL
    Jsonl,
}

impl ExportFormat {
    /// Picks the format from a file extension; anything but `.jsonl` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") => ExportFormat::Jsonl,
            _ => ExportFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.jsonl")), ExportFormat::Jsonl);
        assert_eq!(ExportFormat::from_path(Path::new("out.JSONL")), ExportFormat::Jsonl);
        assert_eq!(ExportFormat::from_path(Path::new("out.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Json);
    }
}
