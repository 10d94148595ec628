//! envdelta core - environment snapshot diff, change tracking and merge engine
//!
//! This crate provides:
//! - The immutable [`Snapshot`] model (variable name to value)
//! - Deterministic snapshot comparison classified as added/modified/deleted/unchanged
//! - Change summaries persisted as version metadata
//! - Text, JSON and CSV diff exports
//! - Conflict detection, policy-driven resolution and conflict-aware merging
//! - The error and logging facilities shared with adapters
//!
//! Values are handled as already-decrypted strings. Storage, authentication
//! and encryption belong to the caller.

pub mod conflict;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod snapshot;

// Re-export commonly used types
pub use conflict::{
    detect_conflicts, merge, merge_environments, resolve, Choice, Conflict, ConflictPrompt,
    ConflictSet, Resolution, ResolutionPolicy,
};
pub use diff::{
    compare, export, format_summary, percent_changed, summarize, ChangeSummary, DiffItem,
    DiffResult, ExportFormat,
};
pub use errors::{EnvDeltaError, ExError, ExErrorKind, Result};
pub use snapshot::Snapshot;
