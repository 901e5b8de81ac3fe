#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

mod error;
pub mod node_store;
pub mod proof;
pub mod trie;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::TrieDBError;
pub use node_store::ProofNodeStore;
pub use proof::TrieProof;
pub use trie::{build_trie, Trie};
pub use types::DerivableList;
