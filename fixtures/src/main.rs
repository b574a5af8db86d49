//! Generate golden amino encodings of Tendermint records.
//!
//! Writes one JSON fixture file per record category to the output directory. With `--check`,
//! nothing is written and the command fails if any existing file differs from what would be
//! generated.

use amino_fixtures::{check, config, generate, Config};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "amino-fixtures")]
#[command(about = "Generate golden amino encodings of Tendermint records")]
struct Args {
    /// Directory to write fixture files to
    #[arg(long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Chain identifier votes are canonicalized for
    #[arg(long, default_value = config::DEFAULT_CHAIN_ID)]
    chain_id: String,

    /// Offset from UTC (in seconds) of the zone the local time fixture is built in
    #[arg(long, default_value_t = config::DEFAULT_ZONE_OFFSET, allow_negative_numbers = true)]
    zone_offset: i32,

    /// Check that existing fixture files are up-to-date instead of writing them
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Create logger
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = Config {
        output: args.output,
        chain_id: args.chain_id,
        zone_offset: args.zone_offset,
    };
    if args.check {
        if let Err(e) = check(&config) {
            error!(error = %e, "fixtures are not up-to-date");
            return ExitCode::FAILURE;
        }
        info!(output = %config.output.display(), "fixtures up-to-date");
    } else {
        if let Err(e) = generate(&config) {
            error!(error = %e, "failed to generate fixtures");
            return ExitCode::FAILURE;
        }
        info!(output = %config.output.display(), "generated fixtures");
    }
    ExitCode::SUCCESS
}
