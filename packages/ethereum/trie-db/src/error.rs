//! This module defines [`TrieDBError`].

use alloy_primitives::B256;
use lightclient_utils::hex::to_hex;

/// Error types for trie construction, proof generation and proof verification
#[derive(Debug, PartialEq, Eq, thiserror::Error, Clone)]
#[allow(clippy::module_name_repetitions)]
pub enum TrieDBError {
    /// The proof node store holds no entry for the key
    #[error("key not found: {k}", k = to_hex(.0))]
    KeyNotFound(Vec<u8>),

    /// The proof node store keys and values are inconsistent
    #[error("malformed proof node store: {0}")]
    MalformedNodeStore(String),

    /// Indices into the list are never negative
    #[error("negative index: {0}")]
    NegativeIndex(i64),

    /// The index is past the end of the list
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The requested index
        index: u64,
        /// The list length
        len: usize,
    },

    /// A node referenced by hash is not part of the proof
    #[error("proof node (hash {hash}) missing")]
    MissingNode {
        /// The hash of the missing node
        hash: B256,
    },

    /// A proof node does not hash to the key it is stored under
    #[error("proof node hash mismatch, expected: {expected}, actual: {actual}")]
    NodeHashMismatch {
        /// The hash the parent committed to
        expected: B256,
        /// The hash of the supplied node
        actual: B256,
    },

    /// A proof node is not a valid RLP encoded branch, extension or leaf
    #[error("rlp decoding failed: {0}")]
    RlpDecode(#[from] alloy_rlp::Error),

    /// The walk ended without reaching a value for the key
    #[error("proof is invalid due to missing value for key: {k}", k = to_hex(key))]
    ValueMissing {
        /// The trie key being proven
        key: Vec<u8>,
    },
}
