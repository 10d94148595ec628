//! Property-based tests for the comparator, summary builder and merge.

use envdelta_core::{
    compare, detect_conflicts, merge, summarize, Choice, DiffItem, EnvDeltaError, Resolution,
    Snapshot,
};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Small key space so that generated snapshots overlap often.
fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::btree_map("[A-F]{1,2}", "[a-c]{0,2}", 0..12)
        .prop_map(|m: BTreeMap<String, String>| Snapshot::new(m).unwrap())
}

fn key_set(items: &[DiffItem]) -> BTreeSet<String> {
    items.iter().map(|i| i.key().to_string()).collect()
}

fn key_vec(items: &[DiffItem]) -> Vec<String> {
    items.iter().map(|i| i.key().to_string()).collect()
}

fn is_sorted(keys: &[String]) -> bool {
    keys.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn prop_diff_partitions_key_union(a in arb_snapshot(), b in arb_snapshot()) {
        let diff = compare(&a, &b);
        let groups = [&diff.added, &diff.modified, &diff.deleted, &diff.unchanged];

        let total: usize = groups.iter().map(|g| g.len()).sum();
        let mut union_from_diff = BTreeSet::new();
        for g in groups {
            union_from_diff.extend(key_set(g));
            prop_assert!(is_sorted(&key_vec(g)));
        }
        // no key appears twice across sequences
        prop_assert_eq!(total, union_from_diff.len());

        let union: BTreeSet<String> = a.keys().chain(b.keys()).map(str::to_string).collect();
        prop_assert_eq!(union_from_diff, union);
    }

    #[test]
    fn prop_added_deleted_symmetry(a in arb_snapshot(), b in arb_snapshot()) {
        let ab = compare(&a, &b);
        let ba = compare(&b, &a);
        prop_assert_eq!(key_set(&ab.added), key_set(&ba.deleted));
        prop_assert_eq!(key_set(&ab.deleted), key_set(&ba.added));
        prop_assert_eq!(key_set(&ab.modified), key_set(&ba.modified));
    }

    #[test]
    fn prop_self_compare_is_unchanged(a in arb_snapshot()) {
        let diff = compare(&a, &a);
        prop_assert!(!diff.has_changes());
        let all: Vec<String> = a.keys().map(str::to_string).collect();
        prop_assert_eq!(key_vec(&diff.unchanged), all);
    }

    #[test]
    fn prop_summary_matches_compare(a in arb_snapshot(), b in arb_snapshot()) {
        let diff = compare(&a, &b);
        let summary = summarize(Some(&a), &b);
        prop_assert_eq!(summary.added, key_vec(&diff.added));
        prop_assert_eq!(summary.modified, key_vec(&diff.modified));
        prop_assert_eq!(summary.deleted, key_vec(&diff.deleted));
    }

    #[test]
    fn prop_conflicts_are_modified_keys(local in arb_snapshot(), remote in arb_snapshot()) {
        let conflicts: Vec<String> =
            detect_conflicts(&local, &remote).keys().map(str::to_string).collect();
        prop_assert_eq!(conflicts, key_vec(&compare(&local, &remote).modified));
    }

    #[test]
    fn prop_merge_completeness(
        local in arb_snapshot(),
        remote in arb_snapshot(),
        picks in prop::collection::vec(any::<bool>(), 12),
    ) {
        let conflicts = detect_conflicts(&local, &remote);
        let resolution: Resolution = conflicts
            .keys()
            .zip(picks.iter().cycle())
            .map(|(k, remote_wins)| {
                (k, if *remote_wins { Choice::TakeRemote } else { Choice::KeepLocal })
            })
            .collect();

        let merged = merge(&local, &remote, &resolution).unwrap();

        let union: BTreeSet<&str> = local.keys().chain(remote.keys()).collect();
        prop_assert_eq!(merged.keys().collect::<BTreeSet<_>>(), union);

        for conflict in &conflicts {
            let expected = match resolution.get(&conflict.key) {
                Some(Choice::TakeRemote) => conflict.remote_value.as_str(),
                _ => conflict.local_value.as_str(),
            };
            prop_assert_eq!(merged.get(&conflict.key), Some(expected));
        }
    }

    #[test]
    fn prop_merge_fails_on_any_gap(local in arb_snapshot(), remote in arb_snapshot()) {
        let conflicts = detect_conflicts(&local, &remote);
        prop_assume!(!conflicts.is_empty());

        // resolve everything except the first conflict
        let resolution: Resolution = conflicts
            .keys()
            .skip(1)
            .map(|k| (k, Choice::TakeRemote))
            .collect();
        let first = conflicts.keys().next().unwrap().to_string();

        match merge(&local, &remote, &resolution) {
            Err(EnvDeltaError::UnresolvedConflict { keys }) => prop_assert_eq!(keys, vec![first]),
            other => prop_assert!(false, "expected UnresolvedConflict, got {:?}", other),
        }
    }
}
