//! Demo of the version-tracking and merge workflow
//!
//! This example walks through:
//! - Comparing two versions and exporting the diff
//! - Building the change summary stored with a version
//! - Detecting conflicts between local and remote copies
//! - Resolving them with a scripted prompt and merging

use envdelta_core::conflict::ScriptedPrompt;
use envdelta_core::{
    compare, detect_conflicts, export, merge, percent_changed, resolve, summarize, Choice,
    ExportFormat, ResolutionPolicy, Snapshot,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== envdelta workflow demo ===\n");

    let v1 = Snapshot::from_pairs([
        ("DATABASE_URL", "postgres://localhost/app"),
        ("LOG_LEVEL", "info"),
        ("FEATURE_X", "off"),
    ])?;
    let v2 = Snapshot::from_pairs([
        ("DATABASE_URL", "postgres://db.internal/app"),
        ("LOG_LEVEL", "info"),
        ("CACHE_TTL", "300"),
    ])?;

    // SECTION 1: Diff and export
    println!("SECTION 1: Diff v1 -> v2\n");
    let diff = compare(&v1, &v2);
    print!("{}", export(&diff, ExportFormat::Csv)?);
    println!();

    // SECTION 2: Change summary as stored with v2
    println!("SECTION 2: Change summary\n");
    let summary = summarize(Some(&v1), &v2);
    println!("  {}", summary);
    println!("  stored as {}", summary.to_json()?);
    println!("  {:.1}% of variables changed\n", percent_changed(&v1, &v2));

    // SECTION 3: Conflicts between a local edit and the remote version
    println!("SECTION 3: Conflicts\n");
    let local = Snapshot::from_pairs([
        ("DATABASE_URL", "postgres://localhost/app"),
        ("LOG_LEVEL", "debug"),
        ("FEATURE_X", "on"),
    ])?;
    let conflicts = detect_conflicts(&local, &v2);
    for key in conflicts.keys() {
        println!("  conflict: {}", key);
    }
    println!();

    // SECTION 4: Resolve and merge
    println!("SECTION 4: Resolve and merge\n");
    let prompt = ScriptedPrompt::new([Some(Choice::TakeRemote), Some(Choice::KeepLocal)]);
    let resolution = resolve(&conflicts, ResolutionPolicy::Interactive(&prompt)).await?;
    for (key, choice) in resolution.iter() {
        println!("  {} -> {}", key, choice);
    }

    let merged = merge(&local, &v2, &resolution)?;
    println!("\n  merged keys: {}", merged.keys().collect::<Vec<_>>().join(", "));

    Ok(())
}
