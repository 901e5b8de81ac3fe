//! This module defines [`ProofNodeStore`], the key-value store backing one trie proof.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TrieDBError;

/// Trie nodes making up one proof, keyed by node hash.
///
/// Entries live in two parallel lists and lookups scan them linearly: a proof holds one node per
/// trie level, so it never grows past a few dozen entries. Keys are unique; [`Self::put`] on an
/// existing key overwrites its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawProofNodeStore")]
pub struct ProofNodeStore {
    #[serde(with = "lightclient_utils::serde::base64::vec")]
    #[schemars(with = "Vec<String>")]
    keys: Vec<Vec<u8>>,
    #[serde(with = "lightclient_utils::serde::base64::vec")]
    #[schemars(with = "Vec<String>")]
    values: Vec<Vec<u8>>,
}

/// The wire form of [`ProofNodeStore`], checked on the way in.
#[derive(Deserialize)]
struct RawProofNodeStore {
    #[serde(with = "lightclient_utils::serde::base64::vec")]
    keys: Vec<Vec<u8>>,
    #[serde(with = "lightclient_utils::serde::base64::vec")]
    values: Vec<Vec<u8>>,
}

impl TryFrom<RawProofNodeStore> for ProofNodeStore {
    type Error = TrieDBError;

    fn try_from(raw: RawProofNodeStore) -> Result<Self, Self::Error> {
        if raw.keys.len() != raw.values.len() {
            return Err(TrieDBError::MalformedNodeStore(format!(
                "{} keys but {} values",
                raw.keys.len(),
                raw.values.len()
            )));
        }

        let duplicate = {
            let mut seen = BTreeSet::new();
            raw.keys
                .iter()
                .find(|key| !seen.insert(key.as_slice()))
                .cloned()
        };
        if let Some(duplicate) = duplicate {
            return Err(TrieDBError::MalformedNodeStore(format!(
                "duplicate key {}",
                lightclient_utils::hex::to_hex(duplicate)
            )));
        }

        Ok(Self {
            keys: raw.keys,
            values: raw.values,
        })
    }
}

impl ProofNodeStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    fn position(&self, key: &[u8]) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Inserts `value` under `key`, replacing any previous value.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        match self.position(key) {
            Some(i) => value.clone_into(&mut self.values[i]),
            None => {
                self.keys.push(key.to_vec());
                self.values.push(value.to_vec());
            }
        }
    }

    /// Returns the value stored under `key`.
    /// # Errors
    /// Returns [`TrieDBError::KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &[u8]) -> Result<&[u8], TrieDBError> {
        self.position(key)
            .map(|i| self.values[i].as_slice())
            .ok_or_else(|| TrieDBError::KeyNotFound(key.to_vec()))
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn has(&self, key: &[u8]) -> bool {
        self.position(key).is_some()
    }

    /// Removes `key` and its value.
    /// # Errors
    /// Returns [`TrieDBError::KeyNotFound`] if the key is absent.
    pub fn delete(&mut self, key: &[u8]) -> Result<(), TrieDBError> {
        let i = self
            .position(key)
            .ok_or_else(|| TrieDBError::KeyNotFound(key.to_vec()))?;
        self.keys.remove(i);
        self.values.remove(i);
        Ok(())
    }

    /// Number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.keys
            .iter()
            .zip(&self.values)
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}
