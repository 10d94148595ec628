//! Merging a local and a remote snapshot.
//!
//! Two distinct operations live here:
//!
//! - [`merge`] is conflict-aware: it refuses to pick a side for any conflict
//!   the caller has not resolved.
//! - [`merge_environments`] is the plain remote-wins overlay for callers that
//!   decided up front that remote values always win.

use crate::conflict::detect::detect_conflicts;
use crate::conflict::model::{Choice, Resolution};
use crate::errors::{EnvDeltaError, Result};
use crate::snapshot::Snapshot;
use crate::{log_key_decision, log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Merge `remote` into `local` applying `resolution` to the conflicts.
///
/// Remote-only keys are always picked up, local-only keys are kept, keys with
/// equal values are untouched. Each conflicting key takes the side its
/// resolution names. Resolution entries for keys that are not in conflict are
/// ignored.
///
/// # Errors
///
/// - `UnresolvedConflict` if a conflicting key has no choice in `resolution`
///   or is `Deferred`; every such key is named and no snapshot is produced
pub fn merge(local: &Snapshot, remote: &Snapshot, resolution: &Resolution) -> Result<Snapshot> {
    let start = Instant::now();
    log_op_start!(
        "merge",
        local_len = local.len(),
        remote_len = remote.len()
    );

    let conflicts = detect_conflicts(local, remote);
    let unresolved: Vec<String> = conflicts
        .keys()
        .filter(|key| matches!(resolution.get(key), None | Some(Choice::Deferred)))
        .map(str::to_string)
        .collect();
    if !unresolved.is_empty() {
        let err = EnvDeltaError::UnresolvedConflict { keys: unresolved };
        log_op_error!(
            "merge",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        return Err(err);
    }

    let mut merged = local.as_map().clone();
    for (key, remote_value) in remote.iter() {
        if !merged.contains_key(key) {
            merged.insert(key.to_string(), remote_value.to_string());
        }
    }
    for conflict in &conflicts {
        // unresolved and deferred keys were rejected above
        let choice = resolution.get(&conflict.key).unwrap_or(Choice::KeepLocal);
        if choice == Choice::TakeRemote {
            merged.insert(conflict.key.clone(), conflict.remote_value.clone());
        }
        log_key_decision!("merge", conflict.key, choice);
    }

    log_op_end!(
        "merge",
        duration_ms = start.elapsed().as_millis() as u64,
        conflict_count = conflicts.len(),
        merged_len = merged.len()
    );
    Ok(Snapshot::from_validated(merged))
}

/// Overlay `remote` on `local`: remote's value wins on every shared key.
///
/// No conflict detection takes place. Use [`merge`] when conflicts need an
/// explicit decision.
pub fn merge_environments(local: &Snapshot, remote: &Snapshot) -> Snapshot {
    let mut merged = local.as_map().clone();
    merged.extend(
        remote
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    );
    Snapshot::from_validated(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pairs: &[(&str, &str)]) -> Snapshot {
        Snapshot::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn local() -> Snapshot {
        snap(&[("A", "1"), ("B", "2"), ("C", "3")])
    }

    fn remote() -> Snapshot {
        snap(&[("A", "1"), ("B", "9"), ("D", "4")])
    }

    #[test]
    fn test_merge_take_remote() {
        let resolution: Resolution = [("B", Choice::TakeRemote)].into_iter().collect();
        let merged = merge(&local(), &remote(), &resolution).unwrap();
        assert_eq!(
            merged,
            snap(&[("A", "1"), ("B", "9"), ("C", "3"), ("D", "4")])
        );
    }

    #[test]
    fn test_merge_keep_local() {
        let resolution: Resolution = [("B", Choice::KeepLocal)].into_iter().collect();
        let merged = merge(&local(), &remote(), &resolution).unwrap();
        assert_eq!(merged.get("B"), Some("2"));
        assert_eq!(merged.get("D"), Some("4"));
    }

    #[test]
    fn test_merge_missing_choice_fails() {
        let err = merge(&local(), &remote(), &Resolution::new()).unwrap_err();
        assert_eq!(
            err,
            EnvDeltaError::UnresolvedConflict {
                keys: vec!["B".to_string()]
            }
        );
    }

    #[test]
    fn test_merge_deferred_fails() {
        let resolution: Resolution = [("B", Choice::Deferred)].into_iter().collect();
        let err = merge(&local(), &remote(), &resolution).unwrap_err();
        assert!(matches!(err, EnvDeltaError::UnresolvedConflict { .. }));
    }

    #[test]
    fn test_merge_ignores_choices_for_non_conflicts() {
        let resolution: Resolution = [
            ("B", Choice::KeepLocal),
            ("C", Choice::TakeRemote),
            ("D", Choice::KeepLocal),
        ]
        .into_iter()
        .collect();
        let merged = merge(&local(), &remote(), &resolution).unwrap();
        assert_eq!(merged.get("C"), Some("3"));
        assert_eq!(merged.get("D"), Some("4"));
    }

    #[test]
    fn test_merge_environments_remote_wins() {
        let merged = merge_environments(&local(), &remote());
        assert_eq!(
            merged,
            snap(&[("A", "1"), ("B", "9"), ("C", "3"), ("D", "4")])
        );
    }
}
