//! Conflict listing and merge commands

use crate::commands::CommandResult;
use crate::input::{load_json, load_snapshot, render_snapshot, write_output};
use crate::prompt::TerminalPrompt;
use clap::{Args, ValueEnum};
use envdelta_core::{
    detect_conflicts, log_op_end, log_op_start, merge, merge_environments, resolve, Resolution,
    ResolutionPolicy, Snapshot,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct ConflictsArgs {
    /// Local snapshot
    pub local: PathBuf,

    /// Remote snapshot
    pub remote: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Ask for every conflict on the terminal
    Interactive,
    /// Keep the local value for every conflict
    Local,
    /// Take the remote value for every conflict
    Remote,
    /// Overlay remote on local without conflict detection
    Overwrite,
}

impl Strategy {
    fn as_str(&self) -> &'static str {
        match self {
            Strategy::Interactive => "interactive",
            Strategy::Local => "local",
            Strategy::Remote => "remote",
            Strategy::Overwrite => "overwrite",
        }
    }
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Local snapshot
    pub local: PathBuf,

    /// Remote snapshot
    pub remote: PathBuf,

    #[arg(long, value_enum, default_value_t = Strategy::Interactive)]
    pub strategy: Strategy,

    /// JSON map of key to keepLocal|takeRemote covering every conflict
    #[arg(long, conflicts_with = "strategy")]
    pub resolutions: Option<PathBuf>,

    /// Write the merged snapshot here (JSON for *.json, dotenv otherwise)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn execute_conflicts(args: ConflictsArgs) -> CommandResult {
    let local = load_snapshot(&args.local)?;
    let remote = load_snapshot(&args.remote)?;

    let conflicts = detect_conflicts(&local, &remote);
    if conflicts.is_empty() {
        println!("No conflicts");
        return Ok(());
    }

    println!("{} conflicting variable(s):", conflicts.len());
    for key in conflicts.keys() {
        println!("  {}", key);
    }
    Ok(())
}

pub async fn execute(args: MergeArgs) -> CommandResult {
    let start = Instant::now();
    log_op_start!("cli_merge", strategy = args.strategy.as_str());

    let local = load_snapshot(&args.local)?;
    let remote = load_snapshot(&args.remote)?;

    let (merged, conflict_count) = match (&args.resolutions, args.strategy) {
        (None, Strategy::Overwrite) => (merge_environments(&local, &remote), 0),
        (Some(path), _) => {
            let explicit: Resolution = load_json(path)?;
            resolve_and_merge(&local, &remote, ResolutionPolicy::Explicit(explicit)).await?
        }
        (None, Strategy::Local) => {
            resolve_and_merge(&local, &remote, ResolutionPolicy::AlwaysLocal).await?
        }
        (None, Strategy::Remote) => {
            resolve_and_merge(&local, &remote, ResolutionPolicy::AlwaysRemote).await?
        }
        (None, Strategy::Interactive) => {
            let prompt = TerminalPrompt;
            resolve_and_merge(&local, &remote, ResolutionPolicy::Interactive(&prompt)).await?
        }
    };

    let rendered = render_snapshot(&merged, args.output.as_deref())?;
    write_output(args.output.as_deref(), &rendered)?;

    if let Some(path) = &args.output {
        println!(
            "Merged {} variables ({} conflicts resolved) into {}",
            merged.len(),
            conflict_count,
            path.display()
        );
    }

    log_op_end!(
        "cli_merge",
        duration_ms = start.elapsed().as_millis() as u64,
        merged_len = merged.len()
    );
    Ok(())
}

async fn resolve_and_merge(
    local: &Snapshot,
    remote: &Snapshot,
    policy: ResolutionPolicy<'_>,
) -> Result<(Snapshot, usize), Box<dyn std::error::Error>> {
    let conflicts = detect_conflicts(local, remote);
    let resolution = resolve(&conflicts, policy).await?;
    let merged = merge(local, remote, &resolution)?;
    Ok((merged, conflicts.len()))
}
