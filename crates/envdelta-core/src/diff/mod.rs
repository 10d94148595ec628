//! Snapshot diff engine.
//!
//! Compares two environment snapshots and produces a classified,
//! deterministic diff, a compact change summary for version metadata, and
//! text/JSON/CSV exports.
//!
//! ## Entry point
//!
//! ```
//! use envdelta_core::diff::{compare, export, summarize, ExportFormat};
//! use envdelta_core::Snapshot;
//!
//! let old = Snapshot::from_pairs([("PORT", "80")]).unwrap();
//! let new = Snapshot::from_pairs([("PORT", "8080"), ("DEBUG", "1")]).unwrap();
//!
//! let diff = compare(&old, &new);
//! let summary = summarize(Some(&old), &new);
//! assert_eq!(summary.to_string(), "1 added, 1 modified");
//! let csv = export(&diff, ExportFormat::Csv).unwrap();
//! assert!(csv.starts_with("Key,Type,Old Value,New Value\n"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: every sequence is ordered by key; identical inputs give
//!   identical output.
//! - **Partition**: added, modified, deleted and unchanged keys are disjoint
//!   and together cover both snapshots' keys.

pub mod engine;
pub mod export;
pub mod model;
pub mod summary;

pub use engine::compare;
pub use export::{export, export_at, ExportFormat};
pub use model::{ChangeKind, DiffItem, DiffResult};
pub use summary::{format_summary, percent_changed, summarize, ChangeSummary};
