//! Snapshot comparison engine.
//!
//! The core entry point is [`compare`], which classifies every key of two
//! snapshots and produces a [`DiffResult`].

use crate::diff::model::{DiffItem, DiffResult};
use crate::snapshot::Snapshot;
use std::collections::BTreeSet;

/// Compute the classified diff from base snapshot `a` to target snapshot `b`.
///
/// Pure and deterministic: the key union is walked in ascending order, so each
/// of the four sequences comes out sorted without a separate sort pass.
/// Value equality is exact string equality; `""` is a value like any other.
pub fn compare(a: &Snapshot, b: &Snapshot) -> DiffResult {
    let all_keys: BTreeSet<&str> = a.keys().chain(b.keys()).collect();
    let mut diff = DiffResult::default();

    for key in all_keys {
        match (a.get(key), b.get(key)) {
            (None, Some(new_value)) => diff.added.push(DiffItem::Added {
                key: key.to_string(),
                new_value: new_value.to_string(),
            }),
            (Some(old_value), None) => diff.deleted.push(DiffItem::Deleted {
                key: key.to_string(),
                old_value: old_value.to_string(),
            }),
            (Some(old_value), Some(new_value)) if old_value != new_value => {
                diff.modified.push(DiffItem::Modified {
                    key: key.to_string(),
                    old_value: old_value.to_string(),
                    new_value: new_value.to_string(),
                })
            }
            (Some(old_value), Some(new_value)) => diff.unchanged.push(DiffItem::Unchanged {
                key: key.to_string(),
                old_value: old_value.to_string(),
                new_value: new_value.to_string(),
            }),
            // every key of the union is in at least one side
            (None, None) => {}
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pairs: &[(&str, &str)]) -> Snapshot {
        Snapshot::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn keys(items: &[DiffItem]) -> Vec<&str> {
        items.iter().map(DiffItem::key).collect()
    }

    #[test]
    fn test_both_empty() {
        let diff = compare(&Snapshot::empty(), &Snapshot::empty());
        assert_eq!(diff, DiffResult::default());
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_identical_snapshots_are_all_unchanged() {
        let a = snap(&[("A", "1"), ("B", "2")]);
        let diff = compare(&a, &a);
        assert!(diff.added.is_empty());
        assert!(diff.modified.is_empty());
        assert!(diff.deleted.is_empty());
        assert_eq!(keys(&diff.unchanged), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_value_is_not_absence() {
        let a = snap(&[("EMPTY", "")]);
        let diff = compare(&a, &Snapshot::empty());
        assert_eq!(
            diff.deleted,
            vec![DiffItem::Deleted {
                key: "EMPTY".into(),
                old_value: String::new()
            }]
        );
        assert!(diff.unchanged.is_empty());
    }

    #[test]
    fn test_classifies_each_kind() {
        let local = snap(&[("A", "1"), ("B", "2"), ("C", "3")]);
        let remote = snap(&[("A", "1"), ("B", "9"), ("D", "4")]);
        let diff = compare(&local, &remote);
        assert_eq!(keys(&diff.added), vec!["D"]);
        assert_eq!(keys(&diff.modified), vec!["B"]);
        assert_eq!(keys(&diff.deleted), vec!["C"]);
        assert_eq!(keys(&diff.unchanged), vec!["A"]);
        assert_eq!(diff.change_count(), 3);
        assert_eq!(diff.total_keys(), 4);
    }

    #[test]
    fn test_sequences_sorted_ordinally() {
        let a = Snapshot::empty();
        let b = snap(&[("b", "1"), ("B", "1"), ("a", "1"), ("A_2", "1"), ("A", "1")]);
        let diff = compare(&a, &b);
        assert_eq!(keys(&diff.added), vec!["A", "A_2", "B", "a", "b"]);
    }
}
