use anyhow::Result;
use clap::{Parser, Subcommand};
use harlog_cli::commands;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harlog")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Accumulate and inspect HAR logs captured from an intercepting proxy",
    long_about = "Harlog replays flow dumps recorded by an intercepting proxy through a \
                  capture session, producing a HAR log with per-phase timings and \
                  referrer-based page groupings."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a captured flow dump and write the resulting HAR log
    Export {
        /// Path to the JSON flow dump
        #[arg(value_name = "FLOWS")]
        flows: PathBuf,

        /// Output HAR file
        #[arg(short, long, default_value = "capture.har")]
        output: PathBuf,

        /// Pretty-print the decoded log after export
        #[arg(long)]
        pretty: bool,
    },

    /// Display statistics for a HAR file
    Stats {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Export {
            flows,
            output,
            pretty,
        } => commands::export::execute(&flows, &output, pretty),
        Commands::Stats { file } => commands::stats::execute(&file),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("harlog=debug,harlog_core=debug,harlog_addon=debug")
    } else {
        EnvFilter::new("harlog=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
