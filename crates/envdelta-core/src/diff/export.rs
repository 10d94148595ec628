//! Diff export renderers (text report, JSON, CSV).

use crate::diff::model::{DiffItem, DiffResult};
use crate::errors::{EnvDeltaError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::str::FromStr;

/// Output format of [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed structured diff
    Json,
    /// One row per changed key
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// File extension for an exported file of this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = EnvDeltaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(EnvDeltaError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `diff` in `format`, stamping text reports with the current time.
///
/// # Errors
///
/// - `Serialization` if JSON encoding failed
pub fn export(diff: &DiffResult, format: ExportFormat) -> Result<String> {
    export_at(diff, format, Utc::now())
}

/// Render `diff` in `format` with an explicit generation timestamp.
///
/// # Errors
///
/// - `Serialization` if JSON encoding failed
pub fn export_at(
    diff: &DiffResult,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(render_text(diff, generated_at)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(diff)?),
        ExportFormat::Csv => Ok(render_csv(diff)),
    }
}

fn render_text(diff: &DiffResult, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("=== DIFF REPORT ===\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));

    out.push_str("SUMMARY:\n");
    out.push_str(&format!("  Added: {}\n", diff.added.len()));
    out.push_str(&format!("  Modified: {}\n", diff.modified.len()));
    out.push_str(&format!("  Deleted: {}\n", diff.deleted.len()));
    out.push_str(&format!("  Unchanged: {}\n", diff.unchanged.len()));

    if !diff.added.is_empty() {
        out.push_str("\nADDED:\n");
        for item in &diff.added {
            out.push_str(&format!(
                "  + {} = {}\n",
                item.key(),
                item.new_value().unwrap_or_default()
            ));
        }
    }

    if !diff.modified.is_empty() {
        out.push_str("\nMODIFIED:\n");
        for item in &diff.modified {
            out.push_str(&format!("  ~ {}\n", item.key()));
            out.push_str(&format!("    - {}\n", item.old_value().unwrap_or_default()));
            out.push_str(&format!("    + {}\n", item.new_value().unwrap_or_default()));
        }
    }

    if !diff.deleted.is_empty() {
        out.push_str("\nDELETED:\n");
        for item in &diff.deleted {
            out.push_str(&format!(
                "  - {} = {}\n",
                item.key(),
                item.old_value().unwrap_or_default()
            ));
        }
    }

    out
}

fn render_csv(diff: &DiffResult) -> String {
    let mut out = String::from("Key,Type,Old Value,New Value\n");
    for item in diff.changes() {
        out.push_str(&csv_row(item));
    }
    out
}

fn csv_row(item: &DiffItem) -> String {
    format!(
        "{},{},{},{}\n",
        csv_key(item.key()),
        item.kind(),
        csv_quote(item.old_value().unwrap_or_default()),
        csv_quote(item.new_value().unwrap_or_default()),
    )
}

/// Value columns are always quoted.
fn csv_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Keys are quoted only when they would otherwise break the row.
fn csv_key(key: &str) -> String {
    if key.contains([',', '"', '\n', '\r']) {
        csv_quote(key)
    } else {
        key.to_string()
    }
}
