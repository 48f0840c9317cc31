use clap::Parser;
use mrz_reader::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the command with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result.map_err(anyhow::Error::from),
            signal = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                let interrupted = mrz_reader::MrzError::processing_interrupted("Interrupted by user");
                match signal {
                    Ok(()) => Err(anyhow::Error::from(interrupted)),
                    Err(e) => Err(anyhow::Error::from(e).context("Failed to listen for CTRL+C")),
                }
            }
        }
    });

    match result {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("MRZ Reader - ICAO 9303 Machine Readable Zone Parser");
    println!("===================================================");
    println!();
    println!("Parse and validate the Machine Readable Zone of passports (TD3),");
    println!("identity cards (TD1, TD2) and visas (MRV-A, MRV-B).");
    println!();
    println!("USAGE:");
    println!("    mrz-reader <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse one MRZ block from a file, --text or stdin");
    println!("    batch       Validate a directory or glob of MRZ files concurrently");
    println!("    formats     List the supported layouts and their fields");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity");
    println!("    -q, --quiet      Suppress output except errors");
    println!("    -c, --config     Path to configuration file (JSON)");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXIT CODES:");
    println!("    0    every document valid");
    println!("    1    I/O or configuration error");
    println!("    2    at least one document invalid");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a scan saved to a file:");
    println!("    mrz-reader parse passport.mrz");
    println!();
    println!("    # Parse from stdin and emit JSON with resolved dates:");
    println!("    cat passport.mrz | mrz-reader parse --format json --resolve-dates");
    println!();
    println!("    # Parse a raw serial reader transmission:");
    println!("    mrz-reader parse capture.bin --framed");
    println!();
    println!("    # Validate every .mrz file under a directory with 8 workers:");
    println!("    mrz-reader batch ./scans --workers 8 --output results.jsonl");
    println!();
    println!("For detailed help on any command, use:");
    println!("    mrz-reader <COMMAND> --help");
}
