#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

mod error;
pub mod tree;
pub mod verify;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::BitcoinMerkleError;
pub use tree::MerkleTree;
pub use verify::{hash256, prove, verify_hash256_merkle};

/// A 32 byte double-SHA256 digest in internal (little-endian) byte order.
pub type Hash256 = [u8; 32];
