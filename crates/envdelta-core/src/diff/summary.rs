//! Change summaries stored as version metadata.
//!
//! A [`ChangeSummary`] is computed once per version transition and persisted
//! next to the new snapshot as `{"added":[..],"modified":[..],"deleted":[..]}`.
//! [`ChangeSummary::from_json`] validates that shape on read.

use crate::diff::engine::compare;
use crate::diff::model::{DiffItem, DiffResult};
use crate::errors::{EnvDeltaError, Result};
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keys added, modified and deleted by one version transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeSummary {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl ChangeSummary {
    /// Drop the values of a diff, keeping the changed keys.
    pub fn from_diff(diff: &DiffResult) -> Self {
        fn keys_of(items: &[DiffItem]) -> Vec<String> {
            items.iter().map(|i| i.key().to_string()).collect()
        }
        Self {
            added: keys_of(&diff.added),
            modified: keys_of(&diff.modified),
            deleted: keys_of(&diff.deleted),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Number of changed keys across all three lists
    pub fn total(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// - `Serialization` if JSON encoding failed
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a stored summary.
    ///
    /// # Errors
    ///
    /// - `InvalidChangeSummary` if not an object with exactly the three string
    ///   arrays, an empty key, a list out of order or with duplicates, or a key
    ///   listed under more than one change kind
    pub fn from_json(json: &str) -> Result<Self> {
        let summary: ChangeSummary =
            serde_json::from_str(json).map_err(|e| EnvDeltaError::InvalidChangeSummary {
                reason: e.to_string(),
            })?;
        summary.validate()?;
        Ok(summary)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for (label, keys) in [
            ("added", &self.added),
            ("modified", &self.modified),
            ("deleted", &self.deleted),
        ] {
            if keys.windows(2).any(|w| w[0] >= w[1]) {
                return Err(EnvDeltaError::InvalidChangeSummary {
                    reason: format!("`{}` must be sorted and free of duplicates", label),
                });
            }
            for key in keys {
                if key.is_empty() {
                    return Err(EnvDeltaError::InvalidChangeSummary {
                        reason: format!("`{}` contains an empty key", label),
                    });
                }
                if !seen.insert(key.as_str()) {
                    return Err(EnvDeltaError::InvalidChangeSummary {
                        reason: format!("key `{}` appears under more than one change kind", key),
                    });
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_summary(self))
    }
}

/// Summarize the transition from `old` to `new`.
///
/// With no previous version every key of `new` counts as added.
pub fn summarize(old: Option<&Snapshot>, new: &Snapshot) -> ChangeSummary {
    match old {
        Some(old) => ChangeSummary::from_diff(&compare(old, new)),
        None => ChangeSummary {
            added: new.keys().map(str::to_string).collect(),
            modified: Vec::new(),
            deleted: Vec::new(),
        },
    }
}

/// Render e.g. `"2 added, 1 modified"`, or `"No changes"`.
pub fn format_summary(summary: &ChangeSummary) -> String {
    let parts: Vec<String> = [
        (summary.added.len(), "added"),
        (summary.modified.len(), "modified"),
        (summary.deleted.len(), "deleted"),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, label)| format!("{} {}", count, label))
    .collect();

    if parts.is_empty() {
        "No changes".to_string()
    } else {
        parts.join(", ")
    }
}

/// Percentage of the key union that was added, modified or deleted.
///
/// Returns `0.0` when both snapshots are empty.
pub fn percent_changed(old: &Snapshot, new: &Snapshot) -> f64 {
    let diff = compare(old, new);
    let total = diff.total_keys();
    if total == 0 {
        return 0.0;
    }
    100.0 * diff.change_count() as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pairs: &[(&str, &str)]) -> Snapshot {
        Snapshot::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_first_version_is_all_added() {
        let new = snap(&[("B", "2"), ("A", "1")]);
        let summary = summarize(None, &new);
        assert_eq!(summary.added, vec!["A", "B"]);
        assert!(summary.modified.is_empty());
        assert!(summary.deleted.is_empty());
    }

    #[test]
    fn test_format_summary_joins_non_zero_counts() {
        let summary = ChangeSummary {
            added: vec!["A".into(), "B".into()],
            modified: vec!["C".into()],
            deleted: vec![],
        };
        assert_eq!(format_summary(&summary), "2 added, 1 modified");
        assert_eq!(summary.to_string(), "2 added, 1 modified");
    }

    #[test]
    fn test_format_summary_no_changes() {
        assert_eq!(format_summary(&ChangeSummary::default()), "No changes");
    }

    #[test]
    fn test_format_summary_deleted_only() {
        let summary = ChangeSummary {
            deleted: vec!["X".into()],
            ..Default::default()
        };
        assert_eq!(format_summary(&summary), "1 deleted");
    }

    #[test]
    fn test_percent_changed() {
        let old = snap(&[("A", "1"), ("B", "2"), ("C", "3")]);
        let new = snap(&[("A", "1"), ("B", "9"), ("D", "4")]);
        // 3 changed out of a union of 4
        assert!((percent_changed(&old, &new) - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_changed_empty_union_is_zero() {
        assert_eq!(percent_changed(&Snapshot::empty(), &Snapshot::empty()), 0.0);
    }

    #[test]
    fn test_json_contract() {
        let summary = ChangeSummary {
            added: vec!["D".into()],
            modified: vec!["B".into()],
            deleted: vec!["C".into()],
        };
        let json = summary.to_json().unwrap();
        assert_eq!(json, r#"{"added":["D"],"modified":["B"],"deleted":["C"]}"#);
        assert_eq!(ChangeSummary::from_json(&json).unwrap(), summary);
    }

    #[test]
    fn test_from_json_rejects_loose_shapes() {
        for bad in [
            r#"{"added":["A"],"modified":[]}"#,
            r#"{"added":[],"modified":[],"deleted":[],"extra":[]}"#,
            r#"{"added":[1],"modified":[],"deleted":[]}"#,
            r#"{"added":["A"],"modified":["A"],"deleted":[]}"#,
            r#"{"added":["B","A"],"modified":[],"deleted":[]}"#,
            r#"{"added":[""],"modified":[],"deleted":[]}"#,
            r#"["A"]"#,
        ] {
            let err = ChangeSummary::from_json(bad).unwrap_err();
            assert!(
                matches!(err, EnvDeltaError::InvalidChangeSummary { .. }),
                "expected InvalidChangeSummary for {}",
                bad
            );
        }
    }
}
