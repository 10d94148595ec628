//! Conflict detection, resolution and merging.
//!
//! The workflow is strictly sequential and stateless:
//!
//! ```text
//! detect_conflicts(local, remote) -> ConflictSet
//! resolve(&ConflictSet, policy)   -> Resolution     (async: may prompt)
//! merge(local, remote, &Resolution) -> Snapshot
//! ```
//!
//! `merge_environments` is a separate remote-wins overlay that skips
//! detection altogether.

pub mod detect;
pub mod merge;
pub mod model;
pub mod policy;
pub mod resolve;

pub use detect::detect_conflicts;
pub use merge::{merge, merge_environments};
pub use model::{Choice, Conflict, ConflictSet, Resolution};
pub use policy::{ConflictPrompt, ResolutionPolicy, ScriptedPrompt};
pub use resolve::resolve;
