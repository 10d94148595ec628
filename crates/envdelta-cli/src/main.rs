//! envdelta CLI
//!
//! Command-line interface for comparing and merging environment snapshots

use clap::{Parser, Subcommand, ValueEnum};
use envdelta_core::logging_facility::{self, Profile};

mod commands;
mod input;
mod prompt;

#[derive(Debug, Parser)]
#[command(name = "envdelta")]
#[command(about = "envdelta - Environment snapshot diff and merge", long_about = None)]
struct Cli {
    /// Log output on stderr (RUST_LOG overrides the filter)
    #[arg(long, global = true, value_enum, default_value_t = LogMode::Off)]
    log: LogMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogMode {
    Off,
    Dev,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two snapshots and export the diff
    Diff(commands::diff::DiffArgs),
    /// Summarize the changes of one version transition
    Summary(commands::summary::SummaryArgs),
    /// List keys whose values differ between local and remote
    Conflicts(commands::merge::ConflictsArgs),
    /// Merge a remote snapshot into a local one
    Merge(commands::merge::MergeArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.log {
        LogMode::Off => {}
        LogMode::Dev => logging_facility::init(Profile::Development),
        LogMode::Json => logging_facility::init(Profile::Production),
    }

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Summary(args) => commands::summary::execute(args),
        Commands::Conflicts(args) => commands::merge::execute_conflicts(args),
        Commands::Merge(args) => commands::merge::execute(args).await,
    };

    if let Err(e) = result {
        if commands::is_cancellation(e.as_ref()) {
            println!("Merge cancelled.");
            return;
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
