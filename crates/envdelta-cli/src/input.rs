//! Snapshot file loading and output writing
//!
//! `*.json` files hold a flat JSON object; anything else is read as a dotenv
//! file. Dotenv values are taken literally: `$VAR` and `${VAR}` are never
//! expanded, so a snapshot does not depend on the environment it is read in.

use envdelta_core::{ExError, ExErrorKind, Snapshot};
use std::path::Path;

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn io_error(op: &str, path: &Path, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op)
        .with_message(format!("{}: {}", path.display(), err))
}

/// Load a snapshot from a JSON or dotenv file
pub fn load_snapshot(path: &Path) -> Result<Snapshot, Box<dyn std::error::Error>> {
    if is_json(path) {
        let text =
            std::fs::read_to_string(path).map_err(|e| io_error("load_snapshot", path, e))?;
        let snapshot: Snapshot = serde_json::from_str(&text)
            .map_err(envdelta_core::EnvDeltaError::from)?;
        return Ok(snapshot);
    }

    let text = std::fs::read_to_string(path).map_err(|e| io_error("load_snapshot", path, e))?;
    let literal = escape_substitutions(&text);

    let mut pairs = Vec::new();
    for item in dotenvy::from_read_iter(literal.as_bytes()) {
        pairs.push(item.map_err(|e| io_error("load_snapshot", path, e))?);
    }
    Ok(Snapshot::from_pairs(pairs)?)
}

/// Escape every `$` that dotenvy would substitute.
///
/// Tracks the quoting state dotenvy parses with: single quotes are literal,
/// double quotes and bare values honour backslash escapes, and `#` after
/// whitespace outside quotes starts a comment. Only `$` outside single quotes
/// and not already escaped is rewritten to `\$`.
fn escape_substitutions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let (mut strong, mut weak, mut escaped, mut comment) = (false, false, false, false);
    let mut prev = '\n';

    for c in text.chars() {
        if comment {
            comment = c != '\n';
            out.push(c);
        } else if escaped {
            escaped = false;
            out.push(c);
        } else if strong {
            strong = c != '\'';
            out.push(c);
        } else {
            match c {
                '$' => out.push_str("\\$"),
                '\\' => {
                    escaped = true;
                    out.push(c);
                }
                '"' => {
                    weak = !weak;
                    out.push(c);
                }
                '\'' if !weak => {
                    strong = true;
                    out.push(c);
                }
                '#' if !weak && prev.is_whitespace() => {
                    comment = true;
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
        prev = c;
    }
    out
}

/// Load a JSON file into any deserializable type (resolution maps)
pub fn load_json<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<T, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error("load_json", path, e))?;
    Ok(serde_json::from_str(&text).map_err(envdelta_core::EnvDeltaError::from)?)
}

/// Render a snapshot for writing to `path`: JSON for `*.json`, dotenv otherwise
pub fn render_snapshot(
    snapshot: &Snapshot,
    path: Option<&Path>,
) -> Result<String, Box<dyn std::error::Error>> {
    if path.is_some_and(is_json) {
        let mut out = serde_json::to_string_pretty(snapshot)
            .map_err(envdelta_core::EnvDeltaError::from)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(to_dotenv(snapshot))
}

/// Dotenv rendering with every value double-quoted
pub fn to_dotenv(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for (key, value) in snapshot.iter() {
        out.push_str(key);
        out.push_str("=\"");
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '$' => out.push_str("\\$"),
                '\n' => out.push_str("\\n"),
                c => out.push(c),
            }
        }
        out.push_str("\"\n");
    }
    out
}

/// Write to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| io_error("write_output", path, e))?;
        }
        None => print!("{}", content),
    }
    Ok(())
}
