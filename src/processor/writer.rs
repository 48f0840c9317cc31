//! JSON Lines output for batch results
//!
//! One JSON object per input file, in the report's path order.

use super::{FileOutcome, FileResult};
use crate::error::{MrzError, Result};
use crate::models::DocumentModel;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialized form of one batch entry
#[derive(Debug, Serialize)]
pub struct FileRecord<'a> {
    pub path: &'a Path,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<&'a DocumentModel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> From<&'a FileResult> for FileRecord<'a> {
    fn from(result: &'a FileResult) -> Self {
        match &result.outcome {
            FileOutcome::Parsed(document) => Self {
                path: &result.path,
                document: Some(document),
                error: None,
            },
            FileOutcome::Failed(error) => Self {
                path: &result.path,
                document: None,
                error: Some(error.as_str()),
            },
        }
    }
}

/// Writes batch results as JSON Lines
#[derive(Debug)]
pub struct JsonLinesWriter {
    output_path: PathBuf,
}

impl JsonLinesWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write every result, creating parent directories as needed.
    /// Returns the number of records written.
    pub fn write_all(&self, results: &[FileResult]) -> Result<usize> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    MrzError::io(format!("Failed to create {}", parent.display()), e)
                })?;
            }
        }

        let file = File::create(&self.output_path).map_err(|e| {
            MrzError::io(format!("Failed to create {}", self.output_path.display()), e)
        })?;
        let mut writer = BufWriter::new(file);

        for result in results {
            serde_json::to_writer(&mut writer, &FileRecord::from(result)).map_err(|e| {
                MrzError::serialization(format!("Failed to encode {}", result.path.display()), e)
            })?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        debug!(
            "Wrote {} record(s) to {}",
            results.len(),
            self.output_path.display()
        );
        Ok(results.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentIssue;
    use tempfile::TempDir;

    fn results() -> Vec<FileResult> {
        vec![
            FileResult {
                path: PathBuf::from("scans/a.mrz"),
                outcome: FileOutcome::Parsed(DocumentModel::unrecognized(
                    DocumentIssue::EmptyInput,
                )),
            },
            FileResult {
                path: PathBuf::from("scans/b.mrz"),
                outcome: FileOutcome::Failed("permission denied".to_string()),
            },
        ]
    }

    #[test]
    fn test_writes_one_line_per_result() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out").join("results.jsonl");
        let writer = JsonLinesWriter::new(&output);

        assert_eq!(writer.write_all(&results()).unwrap(), 2);

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0]["path"], "scans/a.mrz");
        assert_eq!(lines[0]["document"]["format"], "Unrecognized");
        assert_eq!(lines[0]["document"]["issue"], "emptyInput");
        assert!(lines[0].get("error").is_none());

        assert_eq!(lines[1]["error"], "permission denied");
        assert!(lines[1].get("document").is_none());
    }

    #[test]
    fn test_empty_results_create_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("empty.jsonl");
        let writer = JsonLinesWriter::new(&output);

        assert_eq!(writer.write_all(&[]).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
        assert_eq!(writer.output_path(), output.as_path());
    }
}
