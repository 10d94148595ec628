//! Environment snapshot model.
//!
//! A [`Snapshot`] is an immutable mapping from variable name to value.
//! Keys are kept in a `BTreeMap`, so every iteration (and every ordering
//! derived from one) is ascending ordinal key order regardless of the order
//! the variables were supplied in.

use crate::errors::{EnvDeltaError, Result};
use envdelta_core_types::Sensitive;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A complete set of environment variables at one point in time.
///
/// Serializes as a flat JSON object (`{"KEY": "value"}`). Deserialization
/// applies the same checks as [`Snapshot::from_pairs`]: no empty key and no
/// key given twice.
#[derive(Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "BTreeMap<String, String>")]
pub struct Snapshot {
    vars: BTreeMap<String, String>,
}

impl Snapshot {
    /// Build a snapshot from an existing map.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot` if a variable name is the empty string
    pub fn new(vars: BTreeMap<String, String>) -> Result<Self> {
        if vars.contains_key("") {
            return Err(EnvDeltaError::InvalidSnapshot {
                reason: "variable name must not be empty".to_string(),
            });
        }
        Ok(Self { vars })
    }

    /// Build a snapshot from key/value pairs.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot` if a name is empty, or the same name appears twice
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars = BTreeMap::new();
        for (k, v) in pairs {
            let key = k.into();
            if vars.contains_key(&key) {
                return Err(EnvDeltaError::InvalidSnapshot {
                    reason: format!("duplicate variable name: {}", key),
                });
            }
            vars.insert(key, v.into());
        }
        Self::new(vars)
    }

    /// The empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Variable names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.vars.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.vars
    }

    /// Crate-internal constructor for maps whose keys were all taken from
    /// already-validated snapshots.
    pub(crate) fn from_validated(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = Snapshot;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of variable names to string values")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Snapshot, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                // BTreeMap::deserialize would keep the last of two equal keys
                let mut vars = BTreeMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if vars.contains_key(&key) {
                        return Err(de::Error::custom(format!(
                            "duplicate variable name: {}",
                            key
                        )));
                    }
                    let value: String = map.next_value()?;
                    vars.insert(key, value);
                }
                Snapshot::new(vars).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

impl From<Snapshot> for BTreeMap<String, String> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.vars
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.vars.iter().map(|(k, v)| (k, Sensitive::new(v))))
            .finish()
    }
}
