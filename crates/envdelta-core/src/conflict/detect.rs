//! Conflict detection.

use crate::conflict::model::{Conflict, ConflictSet};
use crate::snapshot::Snapshot;

/// Find the keys present in both snapshots with unequal values.
///
/// Keys on only one side are never conflicts; a merge takes them as they
/// are. The result is sorted ascending by key and detection has no side
/// effects, so repeated calls give the same set.
pub fn detect_conflicts(local: &Snapshot, remote: &Snapshot) -> ConflictSet {
    let conflicts = local
        .iter()
        .filter_map(|(key, local_value)| match remote.get(key) {
            Some(remote_value) if remote_value != local_value => Some(Conflict {
                key: key.to_string(),
                local_value: local_value.to_string(),
                remote_value: remote_value.to_string(),
            }),
            _ => None,
        })
        .collect();

    // local.iter() is already in ascending key order
    ConflictSet::from_sorted(conflicts)
}
