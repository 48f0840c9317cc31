//! Batch validation engine.
//!
//! Parses many MRZ files concurrently. File reads and parses run on the
//! blocking pool, bounded by a semaphore sized to the configured worker
//! count, and results are gathered into a [`BatchReport`] sorted by path.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use crate::config::MrzConfig;
use crate::error::{MrzError, Result};
use crate::models::{DocumentModel, FormatType};
use crate::parser::MrzParser;
use crate::reader::{FrameConfig, strip_frame};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, info, warn};

/// What happened to one input file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The file was read and parsed (the document may still be invalid)
    Parsed(DocumentModel),
    /// The file could not be read
    Failed(String),
}

/// Outcome for one input file
#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileResult {
    pub fn document(&self) -> Option<&DocumentModel> {
        match &self.outcome {
            FileOutcome::Parsed(document) => Some(document),
            FileOutcome::Failed(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.document().is_some_and(|document| document.valid)
    }
}

/// Aggregate counts for a batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    pub files_processed: usize,
    pub valid_documents: usize,
    pub invalid_documents: usize,
    pub files_failed: usize,
    pub by_format: BTreeMap<FormatType, usize>,
    pub processing_time: Duration,
}

impl BatchStats {
    /// Tally a set of results
    pub fn from_results(results: &[FileResult], processing_time: Duration) -> Self {
        let mut stats = Self {
            processing_time,
            ..Default::default()
        };
        for result in results {
            stats.files_processed += 1;
            match &result.outcome {
                FileOutcome::Parsed(document) => {
                    *stats.by_format.entry(document.format).or_insert(0) += 1;
                    if document.valid {
                        stats.valid_documents += 1;
                    } else {
                        stats.invalid_documents += 1;
                    }
                }
                FileOutcome::Failed(_) => stats.files_failed += 1,
            }
        }
        stats
    }

    /// Calculate files processed per second
    pub fn files_per_second(&self) -> f64 {
        if self.processing_time.as_secs_f64() > 0.0 {
            self.files_processed as f64 / self.processing_time.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Percentage of processed files holding a valid document
    pub fn valid_rate(&self) -> f64 {
        if self.files_processed > 0 {
            (self.valid_documents as f64 / self.files_processed as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Whether every file parsed to a valid document
    pub fn all_valid(&self) -> bool {
        self.valid_documents == self.files_processed
    }
}

/// Per-file results and aggregate counts of a batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub results: Vec<FileResult>,
    pub stats: BatchStats,
}

/// Concurrent MRZ file validator
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    parser: MrzParser<'static>,
    workers: usize,
    frame: Option<FrameConfig>,
    show_progress: bool,
}

impl BatchProcessor {
    /// Create a processor using the configured worker count
    pub fn new(config: &MrzConfig) -> Self {
        Self {
            parser: MrzParser::standard(),
            workers: config.workers.max(1),
            frame: None,
            show_progress: false,
        }
    }

    /// Strip serial reader framing from each file before parsing
    pub fn with_frame(mut self, frame: FrameConfig) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Show an indicatif progress bar on stderr
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Parse every file. Unreadable files are recorded as failures, never
    /// aborting the run.
    pub async fn process_files(&self, files: &[PathBuf]) -> Result<BatchReport> {
        let start_time = Instant::now();
        info!(
            "Processing {} file(s) with {} worker(s)",
            files.len(),
            self.workers
        );

        let progress_bar = if self.show_progress && !files.is_empty() {
            Some(create_progress_bar(files.len() as u64))
        } else {
            None
        };

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let parser = self.parser;
        let frame = self.frame;

        let outcomes = stream::iter(files.iter().cloned())
            .map(|path| {
                let semaphore = semaphore.clone();
                let progress_bar = progress_bar.clone();
                async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| MrzError::task(format!("Worker pool closed: {}", e)))?;

                    let task_path = path.clone();
                    let outcome =
                        task::spawn_blocking(move || process_file(parser, &task_path, frame))
                            .await
                            .map_err(|e| {
                                MrzError::task(format!("Failed to process {}: {}", path.display(), e))
                            })?;

                    if let Some(pb) = &progress_bar {
                        pb.inc(1);
                    }
                    Ok::<_, MrzError>(FileResult { path, outcome })
                }
            })
            .buffer_unordered(self.workers)
            .collect::<Vec<_>>()
            .await;

        let mut results = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
        results.sort_by(|a, b| a.path.cmp(&b.path));

        let stats = BatchStats::from_results(&results, start_time.elapsed());

        if let Some(pb) = &progress_bar {
            pb.finish_with_message(format!(
                "{} valid, {} invalid, {} failed",
                stats.valid_documents, stats.invalid_documents, stats.files_failed
            ));
        }

        info!(
            "Batch complete: {} file(s) in {:.2}s ({:.1} files/sec)",
            stats.files_processed,
            stats.processing_time.as_secs_f64(),
            stats.files_per_second()
        );

        Ok(BatchReport { results, stats })
    }
}

/// Read and parse one file on the blocking pool
fn process_file(parser: MrzParser<'static>, path: &Path, frame: Option<FrameConfig>) -> FileOutcome {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return FileOutcome::Failed(e.to_string());
        }
    };

    let text = match frame {
        Some(frame) => strip_frame(&raw, frame),
        None => raw,
    };
    let document = parser.parse(&text);
    debug!(
        "{}: {} (valid={})",
        path.display(),
        document.format,
        document.valid
    );
    FileOutcome::Parsed(document)
}

/// Create a progress bar with the standard batch styling
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("Parsing MRZ files");
    pb
}
