//! This module defines [`BitcoinMerkleError`].

/// Error types for building Bitcoin Merkle trees and paths
#[derive(Debug, PartialEq, Eq, thiserror::Error, Clone)]
#[allow(clippy::module_name_repetitions)]
pub enum BitcoinMerkleError {
    /// A tree cannot be built from an empty transaction list
    #[error("cannot build merkle tree without transactions")]
    NoTransactions,

    /// The flattened tree holds no nodes
    #[error("merkle tree is empty")]
    EmptyTree,

    /// The flattened tree length plus one is not a power of two
    #[error("merkle tree is not full: {len} nodes")]
    IncompleteTree {
        /// Number of nodes in the flattened tree
        len: usize,
    },

    /// The requested leaf is outside the populated leaves
    #[error("transaction index {index} is invalid, block has {leaf_count} transactions")]
    InvalidTxIndex {
        /// The requested index
        index: usize,
        /// Number of populated leaves
        leaf_count: usize,
    },

    /// A node on the path to the root was never computed
    #[error("merkle tree is missing the node at position {0}")]
    MissingNode(usize),
}
