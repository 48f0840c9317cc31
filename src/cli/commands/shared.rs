//! Shared components for CLI commands
//!
//! This module contains logging setup, configuration loading, input reading
//! and the human-readable rendering used across the command implementations.

use crate::cli::args::{Args, BatchArgs};
use crate::config::MrzConfig;
use crate::error::{MrzError, Result};
use crate::models::{Detail, DocumentModel};
use crate::reader::strip_frame;
use colored::*;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// How a command finished, mapped to the process exit code by `main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Everything parsed and validated
    Valid,
    /// Input was processed but at least one document is invalid
    Invalid,
}

impl CommandOutcome {
    pub fn from_valid(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CommandOutcome::Valid => 0,
            CommandOutcome::Invalid => 2,
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // RUST_LOG wins over the verbosity flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mrz_reader={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| MrzError::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &Args, batch: Option<&BatchArgs>) -> Result<MrzConfig> {
    info!("Loading configuration");

    let mut config = MrzConfig::load_layered(args.config_file.as_deref())?;
    if let Some(batch) = batch {
        apply_batch_overrides(&mut config, batch);
    }

    config.validate()?;
    Ok(config)
}

/// Apply batch CLI argument overrides to configuration
pub fn apply_batch_overrides(config: &mut MrzConfig, args: &BatchArgs) {
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(extension) = &args.extension {
        config.input_extension = extension.trim_start_matches('.').to_string();
    }
}

/// Read an MRZ block from `--text`, a file, or stdin, stripping reader
/// framing when requested
pub fn read_input(
    text: Option<&str>,
    file: Option<&Path>,
    framed: bool,
    config: &MrzConfig,
) -> Result<String> {
    let raw = match (text, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| MrzError::io(format!("Failed to read {}", path.display()), e))?,
        (None, None) => {
            debug!("Reading MRZ block from stdin");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| MrzError::io("Failed to read stdin", e))?;
            buffer
        }
    };

    Ok(if framed {
        strip_frame(&raw, config.frame)
    } else {
        raw
    })
}

/// Colored verdict word
pub fn verdict(valid: bool) -> ColoredString {
    if valid {
        "VALID".bright_green().bold()
    } else {
        "INVALID".bright_red().bold()
    }
}

/// One line of the human field table
pub fn render_detail(detail: &Detail) -> String {
    let marker = if detail.valid {
        "✓".bright_green()
    } else {
        "✗".bright_red()
    };

    let mut line = format!(
        "  {} {:<20} {:<32}",
        marker,
        detail.name.as_str().bright_cyan(),
        detail.value.bright_white()
    );

    if let Some(check) = detail.check {
        let expected = check
            .expected
            .map(|digit| digit.to_string())
            .unwrap_or_else(|| "?".to_string());
        line.push_str(&format!(" check {} (expected {})", check.embedded, expected));
    }
    if let Some(error) = &detail.error {
        line.push_str(&format!("  {}", error.to_string().bright_red()));
    }
    line
}

/// Multi-line human report for one document
pub fn render_document(document: &DocumentModel) -> String {
    let mut lines = vec![format!(
        "{} {}  {}",
        "Format:".bright_cyan(),
        document.format.to_string().bright_white().bold(),
        verdict(document.valid)
    )];

    if let Some(issue) = document.issue {
        lines.push(format!("  {}", issue.to_string().bright_yellow()));
    }
    lines.extend(document.details.iter().map(render_detail));
    lines.join("\n")
}

/// Serialize a value as pretty JSON
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| MrzError::serialization("Failed to encode output", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::parse;
    use tempfile::TempDir;

    const TD3: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\nL898902C36UTO7408122F1204159ZE184226B<<<<<10";

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(CommandOutcome::from_valid(true).exit_code(), 0);
        assert_eq!(CommandOutcome::from_valid(false).exit_code(), 2);
    }

    #[test]
    fn test_read_input_sources() {
        let config = MrzConfig::default();
        assert_eq!(read_input(Some(TD3), None, false, &config).unwrap(), TD3);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.mrz");
        std::fs::write(&path, format!("##{TD3}##")).unwrap();
        assert_eq!(read_input(None, Some(&path), true, &config).unwrap(), TD3);

        let missing = temp_dir.path().join("missing.mrz");
        assert!(matches!(
            read_input(None, Some(&missing), false, &config),
            Err(MrzError::Io { .. })
        ));
    }

    #[test]
    fn test_batch_overrides() {
        let mut config = MrzConfig::default().with_workers(3);
        let args = BatchArgs {
            input: "scans".to_string(),
            workers: Some(9),
            extension: Some(".txt".to_string()),
            output: None,
            framed: false,
            output_format: OutputFormat::Human,
        };
        apply_batch_overrides(&mut config, &args);
        assert_eq!(config.workers, 9);
        assert_eq!(config.input_extension, "txt");
    }

    #[test]
    fn test_render_document() {
        colored::control::set_override(false);

        let report = render_document(&parse(TD3));
        assert!(report.starts_with("Format: TD3  VALID"));
        assert!(report.contains("documentNumber"));
        assert!(report.contains("check 6 (expected 6)"));

        let report = render_document(&parse(""));
        assert!(report.contains("INVALID"));
        assert!(report.contains("no usable lines"));
    }
}
