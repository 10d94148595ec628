//! Change summary command

use crate::commands::CommandResult;
use crate::input::load_snapshot;
use clap::Args;
use envdelta_core::{percent_changed, summarize};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Snapshot of the new version
    pub new: PathBuf,

    /// Snapshot of the previous version; omitted for the first version
    #[arg(long)]
    pub old: Option<PathBuf>,

    /// Print the stored-metadata JSON instead of the human summary
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SummaryArgs) -> CommandResult {
    let new = load_snapshot(&args.new)?;
    let old = args.old.as_deref().map(load_snapshot).transpose()?;

    let summary = summarize(old.as_ref(), &new);

    if args.json {
        println!("{}", summary.to_json()?);
        return Ok(());
    }

    println!("{}", summary);
    if let Some(old) = &old {
        println!("{:.1}% of variables changed", percent_changed(old, &new));
    }
    Ok(())
}
