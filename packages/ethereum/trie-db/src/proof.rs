//! This module provides [`TrieProof`] and the proof walk used to verify it.

use alloy_primitives::{keccak256, B256};
use alloy_rlp::Decodable;
use alloy_trie::{nodes::TrieNode, Nibbles};
use lightclient_utils::ensure;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::TrieDBError, node_store::ProofNodeStore, types::index_key};

/// An inclusion proof for one index of a transaction or receipt trie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TrieProof(ProofNodeStore);

impl TrieProof {
    /// Wraps a set of proof nodes.
    #[must_use]
    pub const fn new(nodes: ProofNodeStore) -> Self {
        Self(nodes)
    }

    /// The nodes making up the proof.
    #[must_use]
    pub const fn nodes(&self) -> &ProofNodeStore {
        &self.0
    }

    /// Verifies the item at `index` against `root` and returns its encoding.
    ///
    /// NOTE: You must not trust the `root` unless you've verified it.
    /// # Errors
    /// Returns an error if `index` is negative or the proof does not lead from `root` to a value.
    pub fn verify(&self, root: B256, index: i64) -> Result<Vec<u8>, TrieDBError> {
        let index = u64::try_from(index).map_err(|_| TrieDBError::NegativeIndex(index))?;
        verify_proof(root, &index_key(index), &self.0)
    }
}

impl From<ProofNodeStore> for TrieProof {
    fn from(nodes: ProofNodeStore) -> Self {
        Self(nodes)
    }
}

/// Walks from `root` towards `key` using only the nodes in `nodes` and returns the value found.
///
/// Every node fetched by hash is checked to hash to that value before it is decoded. Children
/// shorter than 32 bytes are embedded in their parent and decoded in place.
/// # Errors
/// Returns an error if a node is missing or malformed, or the key has no value.
pub fn verify_proof(root: B256, key: &[u8], nodes: &ProofNodeStore) -> Result<Vec<u8>, TrieDBError> {
    let missing = || TrieDBError::ValueMissing { key: key.to_vec() };
    let mut remaining = Nibbles::unpack(key);
    let mut node = fetch_node(nodes, root)?;

    loop {
        let child = match node {
            TrieNode::EmptyRoot => return Err(missing()),
            TrieNode::Leaf(leaf) => {
                ensure!(leaf.key == remaining, missing());
                return Ok(leaf.value);
            }
            TrieNode::Extension(extension) => {
                ensure!(remaining.starts_with(&extension.key), missing());
                remaining = remaining.slice(extension.key.len()..);
                extension.child
            }
            TrieNode::Branch(branch) => {
                let nibble = remaining.get(0).ok_or_else(missing)?;
                ensure!(branch.state_mask.is_bit_set(nibble), missing());
                // the stack only holds the children whose bit is set
                let position = (branch.state_mask.get() & ((1u16 << nibble) - 1)).count_ones();
                remaining = remaining.slice(1..);
                branch
                    .stack
                    .into_iter()
                    .nth(position as usize)
                    .ok_or_else(missing)?
            }
        };

        node = match child.as_hash() {
            Some(hash) => fetch_node(nodes, hash)?,
            None => TrieNode::decode(&mut &child[..])?,
        };
    }
}

fn fetch_node(nodes: &ProofNodeStore, hash: B256) -> Result<TrieNode, TrieDBError> {
    let raw = nodes
        .get(hash.as_slice())
        .map_err(|_| TrieDBError::MissingNode { hash })?;
    let actual = keccak256(raw);
    ensure!(
        actual == hash,
        TrieDBError::NodeHashMismatch {
            expected: hash,
            actual,
        }
    );

    Ok(TrieNode::decode(&mut &raw[..])?)
}
