//! Diff command

use crate::commands::CommandResult;
use crate::input::{load_snapshot, write_output};
use clap::Args;
use envdelta_core::{compare, export, log_op_end, log_op_start, ExportFormat};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Older snapshot (.json or dotenv)
    pub old: PathBuf,

    /// Newer snapshot (.json or dotenv)
    pub new: PathBuf,

    /// Export format: text, json or csv
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Write the export to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: DiffArgs) -> CommandResult {
    let start = Instant::now();
    log_op_start!("cli_diff");

    let format: ExportFormat = args.format.parse()?;
    let old = load_snapshot(&args.old)?;
    let new = load_snapshot(&args.new)?;

    let diff = compare(&old, &new);
    let rendered = export(&diff, format)?;
    write_output(args.output.as_deref(), &rendered)?;

    if let Some(path) = &args.output {
        println!(
            "Wrote {} diff ({} changes) to {}",
            format,
            diff.change_count(),
            path.display()
        );
    }

    log_op_end!(
        "cli_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        change_count = diff.change_count()
    );
    Ok(())
}
