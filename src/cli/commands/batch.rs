//! Batch command implementation
//!
//! Discovers MRZ files, validates them concurrently, prints a summary and
//! optionally writes per-file results as JSON Lines.

use super::shared::{CommandOutcome, to_json, verdict};
use crate::cli::args::{BatchArgs, OutputFormat};
use crate::config::MrzConfig;
use crate::error::Result;
use crate::processor::discovery::discover_inputs;
use crate::processor::writer::JsonLinesWriter;
use crate::processor::{BatchProcessor, BatchReport, FileOutcome};
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// JSON shape of the batch summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub files_processed: usize,
    pub valid_documents: usize,
    pub invalid_documents: usize,
    pub files_failed: usize,
    pub by_format: BTreeMap<String, usize>,
    pub processing_time_ms: u128,
}

impl From<&BatchReport> for BatchSummary {
    fn from(report: &BatchReport) -> Self {
        let stats = &report.stats;
        Self {
            files_processed: stats.files_processed,
            valid_documents: stats.valid_documents,
            invalid_documents: stats.invalid_documents,
            files_failed: stats.files_failed,
            by_format: stats
                .by_format
                .iter()
                .map(|(format, count)| (format.to_string(), *count))
                .collect(),
            processing_time_ms: stats.processing_time.as_millis(),
        }
    }
}

/// Run the batch command
pub async fn run_batch(
    args: &BatchArgs,
    config: &MrzConfig,
    show_progress: bool,
) -> Result<CommandOutcome> {
    args.validate()?;

    let files = discover_inputs(&args.input, &config.input_extension)?;
    info!("Found {} input file(s)", files.len());

    let mut processor = BatchProcessor::new(config)
        .with_progress(show_progress && args.output_format == OutputFormat::Human);
    if args.framed {
        processor = processor.with_frame(config.frame);
    }

    let report = processor.process_files(&files).await?;

    if let Some(output) = &args.output {
        let written = JsonLinesWriter::new(output).write_all(&report.results)?;
        info!("Wrote {} result(s) to {}", written, output.display());
    }

    match args.output_format {
        OutputFormat::Json => println!("{}", to_json(&BatchSummary::from(&report))?),
        OutputFormat::Human => print_summary(&report),
    }

    Ok(CommandOutcome::from_valid(report.stats.all_valid()))
}

fn print_summary(report: &BatchReport) {
    for result in &report.results {
        match &result.outcome {
            FileOutcome::Parsed(document) if !document.valid => {
                let reason = document
                    .issue
                    .map(|issue| issue.to_string())
                    .unwrap_or_else(|| {
                        document
                            .invalid_details()
                            .map(|detail| detail.name.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    });
                println!(
                    "  {} {} [{}] {}",
                    verdict(false),
                    result.path.display(),
                    document.format,
                    reason.bright_yellow()
                );
            }
            FileOutcome::Failed(error) => {
                println!(
                    "  {} {} {}",
                    "FAILED".bright_red().bold(),
                    result.path.display(),
                    error.bright_red()
                );
            }
            FileOutcome::Parsed(_) => {}
        }
    }

    let stats = &report.stats;
    println!("\n{}", "Batch Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time.as_millis().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    println!(
        "  {} {} ({:.1}%)",
        "Valid documents:".bright_cyan(),
        stats.valid_documents.to_string().bright_green().bold(),
        stats.valid_rate()
    );
    if stats.invalid_documents > 0 {
        println!(
            "  {} {}",
            "Invalid documents:".bright_red(),
            stats.invalid_documents.to_string().bright_red().bold()
        );
    }
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    for (format, count) in &stats.by_format {
        println!(
            "  {} {}",
            format!("{}:", format).bright_cyan(),
            count.to_string().bright_white()
        );
    }
}
