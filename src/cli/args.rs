//! Command-line argument definitions for the MRZ reader
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::MAX_WORKERS;
use crate::error::{MrzError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the MRZ reader
///
/// Parses and validates the Machine Readable Zone of passports, identity
/// cards and visas (ICAO 9303 TD1, TD2, TD3, MRV-A and MRV-B).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mrz-reader",
    version,
    about = "Parse and validate ICAO 9303 Machine Readable Zones",
    long_about = "Parses the Machine Readable Zone printed on passports, identity cards and visas. \
                  Detects the layout from the line shape, decodes every field and verifies the \
                  ICAO check digits, reporting a per-field diagnosis."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/mrz-reader/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,
}

/// Available subcommands for the MRZ reader
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a single MRZ block
    Parse(ParseArgs),
    /// Validate many MRZ files concurrently
    Batch(BatchArgs),
    /// List the supported MRZ layouts
    Formats(FormatsArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// File holding the MRZ block; reads stdin when neither FILE nor --text is given
    #[arg(value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// MRZ block given directly, lines separated by newlines
    #[arg(short = 't', long = "text", value_name = "TEXT")]
    pub text: Option<String>,

    /// Input is a raw serial reader transmission with guard characters
    #[arg(long = "framed", help = "Strip serial reader guard characters before parsing")]
    pub framed: bool,

    /// Output format for the parsed document
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Resolve the century of birth and expiry dates against today
    #[arg(long = "resolve-dates", help = "Show full birth and expiry dates")]
    pub resolve_dates: bool,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Directory to scan recursively, a single file, or a glob pattern
    #[arg(value_name = "DIR|GLOB")]
    pub input: String,

    /// Number of concurrent workers
    ///
    /// Defaults to the configured value, or one per CPU.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of concurrent workers"
    )]
    pub workers: Option<usize>,

    /// File extension picked up when scanning a directory
    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        help = "File extension to scan for (default: mrz)"
    )]
    pub extension: Option<String>,

    /// Write per-file results as JSON Lines
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write per-file results to a JSON Lines file"
    )]
    pub output: Option<PathBuf>,

    /// Inputs are raw serial reader transmissions with guard characters
    #[arg(long = "framed", help = "Strip serial reader guard characters before parsing")]
    pub framed: bool,

    /// Output format for the summary
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the formats command
#[derive(Debug, Clone, Parser)]
pub struct FormatsArgs {
    /// Output format for the layout listing
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the layout listing"
    )]
    pub output_format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate global arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(MrzError::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

impl ParseArgs {
    /// Validate the parse command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            if !file.is_file() {
                return Err(MrzError::file_not_found(file));
            }
        }
        Ok(())
    }
}

impl BatchArgs {
    /// Validate the batch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(MrzError::configuration(
                    "Number of workers must be greater than 0",
                ));
            }
            if workers > MAX_WORKERS {
                return Err(MrzError::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_WORKERS
                )));
            }
        }

        if let Some(output) = &self.output {
            if output.is_dir() {
                return Err(MrzError::configuration(format!(
                    "Output path is a directory: {}",
                    output.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_subcommand() {
        let args = Args::try_parse_from([
            "mrz-reader",
            "parse",
            "--text",
            "P<UTO",
            "--format",
            "json",
            "--resolve-dates",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Parse(parse)) => {
                assert_eq!(parse.text.as_deref(), Some("P<UTO"));
                assert_eq!(parse.output_format, OutputFormat::Json);
                assert!(parse.resolve_dates);
                assert!(!parse.framed);
                assert!(parse.file.is_none());
            }
            other => panic!("Expected parse command, got {:?}", other),
        }
    }

    #[test]
    fn test_file_and_text_conflict() {
        let result = Args::try_parse_from(["mrz-reader", "parse", "scan.mrz", "--text", "X"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_subcommand() {
        let args = Args::try_parse_from([
            "mrz-reader",
            "batch",
            "scans/*.mrz",
            "-j",
            "8",
            "--extension",
            "txt",
            "--output",
            "out.jsonl",
            "--framed",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Batch(batch)) => {
                assert_eq!(batch.input, "scans/*.mrz");
                assert_eq!(batch.workers, Some(8));
                assert_eq!(batch.extension.as_deref(), Some("txt"));
                assert_eq!(batch.output, Some(PathBuf::from("out.jsonl")));
                assert!(batch.framed);
                assert!(batch.validate().is_ok());
            }
            other => panic!("Expected batch command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["mrz-reader", "formats", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.get_log_level(), "debug");

        let args = Args::try_parse_from(["mrz-reader", "-q", "formats"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());

        let result = Args::try_parse_from(["mrz-reader", "-q", "-v", "formats"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_levels() {
        let mut args = Args::try_parse_from(["mrz-reader"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.get_log_level(), "warn");
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");
        args.verbose = 5;
        assert_eq!(args.get_log_level(), "trace");
    }

    #[test]
    fn test_batch_validation() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = BatchArgs {
            input: "scans".to_string(),
            workers: Some(0),
            extension: None,
            output: None,
            framed: false,
            output_format: OutputFormat::Human,
        };
        assert!(args.validate().is_err());

        args.workers = Some(MAX_WORKERS + 1);
        assert!(args.validate().is_err());

        args.workers = None;
        args.output = Some(temp_dir.path().to_path_buf());
        assert!(args.validate().is_err());

        args.output = Some(temp_dir.path().join("results.jsonl"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_parse_validation_and_config_validation() {
        let temp_dir = TempDir::new().unwrap();
        let args = ParseArgs {
            file: Some(temp_dir.path().join("missing.mrz")),
            text: None,
            framed: false,
            output_format: OutputFormat::Human,
            resolve_dates: false,
        };
        assert!(matches!(
            args.validate(),
            Err(MrzError::FileNotFound { .. })
        ));

        let args = Args::try_parse_from([
            "mrz-reader",
            "--config",
            temp_dir.path().join("nope.json").to_str().unwrap(),
            "formats",
        ])
        .unwrap();
        assert!(args.validate().is_err());
    }
}
