//! Command implementations for the MRZ reader CLI
//!
//! Each command is implemented in its own module:
//! - `parse`: Parse one MRZ block from a file, `--text` or stdin
//! - `batch`: Validate many files concurrently with a summary report
//! - `formats`: List the supported layouts and their field tables

pub mod batch;
pub mod formats;
pub mod parse;
pub mod shared;

pub use shared::CommandOutcome;

use crate::cli::args::{Args, Commands};
use crate::error::{MrzError, Result};
use tracing::debug;

/// Main command runner for the MRZ reader
///
/// Sets up logging and configuration, then dispatches to the subcommand.
pub async fn run(args: Args) -> Result<CommandOutcome> {
    shared::setup_logging(&args)?;
    args.validate()?;

    let Some(command) = &args.command else {
        return Err(MrzError::configuration("No command given"));
    };
    debug!("Running command: {:?}", command);

    match command {
        Commands::Parse(parse_args) => {
            let config = shared::load_configuration(&args, None)?;
            parse::run_parse(parse_args, &config)
        }
        Commands::Batch(batch_args) => {
            let config = shared::load_configuration(&args, Some(batch_args))?;
            batch::run_batch(batch_args, &config, args.show_progress()).await
        }
        Commands::Formats(formats_args) => formats::run_formats(formats_args),
    }
}
