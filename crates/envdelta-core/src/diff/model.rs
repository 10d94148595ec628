//! Diff output types.
//!
//! Every sequence in a [`DiffResult`] is sorted ascending by key, so the
//! serialized form is deterministic for identical inputs.

use serde::{Deserialize, Serialize};

/// Kind of change recorded for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Absent in the base snapshot, present in the target
    Added,
    /// Present in both with different values
    Modified,
    /// Present in the base snapshot, absent in the target
    Deleted,
    /// Present in both with equal values
    Unchanged,
}

impl ChangeKind {
    /// Lowercase label used in the JSON `type` field and in CSV rows
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified key of a diff.
///
/// Serializes with a `type` tag and camelCase value fields, e.g.
/// `{"type":"modified","key":"PORT","oldValue":"80","newValue":"8080"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiffItem {
    Added {
        key: String,
        #[serde(rename = "newValue")]
        new_value: String,
    },
    Modified {
        key: String,
        #[serde(rename = "oldValue")]
        old_value: String,
        #[serde(rename = "newValue")]
        new_value: String,
    },
    Deleted {
        key: String,
        #[serde(rename = "oldValue")]
        old_value: String,
    },
    Unchanged {
        key: String,
        #[serde(rename = "oldValue")]
        old_value: String,
        #[serde(rename = "newValue")]
        new_value: String,
    },
}

impl DiffItem {
    pub fn key(&self) -> &str {
        match self {
            DiffItem::Added { key, .. }
            | DiffItem::Modified { key, .. }
            | DiffItem::Deleted { key, .. }
            | DiffItem::Unchanged { key, .. } => key,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            DiffItem::Added { .. } => ChangeKind::Added,
            DiffItem::Modified { .. } => ChangeKind::Modified,
            DiffItem::Deleted { .. } => ChangeKind::Deleted,
            DiffItem::Unchanged { .. } => ChangeKind::Unchanged,
        }
    }

    /// Value in the base snapshot (`None` for added keys)
    pub fn old_value(&self) -> Option<&str> {
        match self {
            DiffItem::Added { .. } => None,
            DiffItem::Modified { old_value, .. }
            | DiffItem::Deleted { old_value, .. }
            | DiffItem::Unchanged { old_value, .. } => Some(old_value),
        }
    }

    /// Value in the target snapshot (`None` for deleted keys)
    pub fn new_value(&self) -> Option<&str> {
        match self {
            DiffItem::Deleted { .. } => None,
            DiffItem::Added { new_value, .. }
            | DiffItem::Modified { new_value, .. }
            | DiffItem::Unchanged { new_value, .. } => Some(new_value),
        }
    }
}

/// The classified difference between a base snapshot A and a target B.
///
/// The four sequences partition `keys(A) ∪ keys(B)`: every key appears in
/// exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Keys only in B
    pub added: Vec<DiffItem>,
    /// Keys in both with different values
    pub modified: Vec<DiffItem>,
    /// Keys only in A
    pub deleted: Vec<DiffItem>,
    /// Keys in both with equal values
    pub unchanged: Vec<DiffItem>,
}

impl DiffResult {
    /// True if anything was added, modified or deleted
    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }

    /// Number of added + modified + deleted keys
    pub fn change_count(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }

    /// Size of the key union the diff was computed over
    pub fn total_keys(&self) -> usize {
        self.change_count() + self.unchanged.len()
    }

    /// Added, then modified, then deleted items (category order, not re-sorted).
    pub fn changes(&self) -> impl Iterator<Item = &DiffItem> + '_ {
        self.added
            .iter()
            .chain(self.modified.iter())
            .chain(self.deleted.iter())
    }
}
