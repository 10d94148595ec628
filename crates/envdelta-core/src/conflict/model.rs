//! Conflict workflow types.

use envdelta_core_types::Sensitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A key present on both sides of a merge with differing values.
#[derive(Clone, PartialEq, Eq)]
pub struct Conflict {
    pub key: String,
    pub local_value: String,
    pub remote_value: String,
}

impl std::fmt::Debug for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conflict")
            .field("key", &self.key)
            .field("local_value", &Sensitive::new(&self.local_value))
            .field("remote_value", &Sensitive::new(&self.remote_value))
            .finish()
    }
}

/// Conflicts between a local and a remote snapshot, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictSet {
    conflicts: Vec<Conflict>,
}

impl ConflictSet {
    /// Callers must supply conflicts in ascending key order.
    pub(crate) fn from_sorted(conflicts: Vec<Conflict>) -> Self {
        debug_assert!(conflicts.windows(2).all(|w| w[0].key < w[1].key));
        Self { conflicts }
    }

    /// Conflicting keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.conflicts.iter().map(|c| c.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conflict> + '_ {
        self.conflicts.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Conflict> {
        self.conflicts
            .binary_search_by(|c| c.key.as_str().cmp(key))
            .ok()
            .map(|idx| &self.conflicts[idx])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConflictSet {
    type Item = &'a Conflict;
    type IntoIter = std::slice::Iter<'a, Conflict>;

    fn into_iter(self) -> Self::IntoIter {
        self.conflicts.iter()
    }
}

/// Decision recorded for one conflicting key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Choice {
    /// Keep the local value
    KeepLocal,
    /// Take the remote value
    TakeRemote,
    /// Left for manual follow-up; a merge refuses to pick a side for it
    Deferred,
}

impl Choice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::KeepLocal => "keepLocal",
            Choice::TakeRemote => "takeRemote",
            Choice::Deferred => "deferred",
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-key decisions for a conflict set.
///
/// Serializes as a flat JSON object, e.g. `{"API_URL":"takeRemote"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resolution {
    choices: BTreeMap<String, Choice>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same choice for every conflict in `conflicts`.
    pub fn uniform(conflicts: &ConflictSet, choice: Choice) -> Self {
        conflicts
            .keys()
            .map(|key| (key.to_string(), choice))
            .collect()
    }

    /// Record a choice, returning the previous one for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, choice: Choice) -> Option<Choice> {
        self.choices.insert(key.into(), choice)
    }

    pub fn get(&self, key: &str) -> Option<Choice> {
        self.choices.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.choices.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Choice)> + '_ {
        self.choices.iter().map(|(k, c)| (k.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Choice)> for Resolution {
    fn from_iter<I: IntoIterator<Item = (K, Choice)>>(iter: I) -> Self {
        Self {
            choices: iter.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }
}
