//! # etlc CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use etlc_cli::fingerprint::{run_fingerprint, FingerprintArgs};
use etlc_cli::schema::{run_schema, SchemaArgs};
use etlc_cli::validate::{run_validate, ValidateArgs};

/// ETL contract toolchain.
///
/// Validates the job requests, job results and manifests exchanged between
/// the ETL orchestrator and its workers.
#[derive(Parser, Debug)]
#[command(name = "etlc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate contract documents.
    Validate(ValidateArgs),

    /// Print SHA-256 content fingerprints of files.
    Fingerprint(FingerprintArgs),

    /// Print the JSON Schema of a contract.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so that stdout stays machine-readable.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!("etlc v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Fingerprint(args) => run_fingerprint(&args),
        Commands::Schema(args) => run_schema(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(etlc_cli::EXIT_OPERATIONAL)
        }
    }
}
