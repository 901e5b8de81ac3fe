//! Records kept by a light client for every stored header and every tracked chain.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::header::HeaderData;

/// A block header accepted into the store. Identified by `hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BlockHeader {
    /// Block height
    pub height: i64,
    /// Block hash, in the byte order the chain hashes the header to
    #[serde(with = "lightclient_utils::serde::base64")]
    #[schemars(with = "String")]
    pub hash: Vec<u8>,
    /// Hash of the parent block
    #[serde(with = "lightclient_utils::serde::base64")]
    #[schemars(with = "String")]
    pub parent_hash: Vec<u8>,
    /// The chain the block belongs to
    pub chain_id: i64,
    /// The raw header
    pub header: HeaderData,
}

/// The range of headers retained for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChainState {
    /// The chain ID
    pub chain_id: i64,
    /// Height of the highest stored header
    pub latest_height: i64,
    /// Height of the lowest stored header, 0 if unknown
    pub earliest_height: i64,
    /// Hash of the highest stored header
    #[serde(with = "lightclient_utils::serde::base64")]
    #[schemars(with = "String")]
    pub latest_block_hash: Vec<u8>,
}

impl ChainState {
    /// The state of a chain whose first header is at `height`.
    #[must_use]
    pub const fn new(chain_id: i64, height: i64, block_hash: Vec<u8>) -> Self {
        Self {
            chain_id,
            latest_height: height,
            earliest_height: height,
            latest_block_hash: block_hash,
        }
    }

    /// Accounts for a newly stored header.
    ///
    /// The latest header only moves forward; the earliest height is set once.
    pub fn record(&mut self, height: i64, block_hash: &[u8]) {
        if height > self.latest_height {
            self.latest_height = height;
            block_hash.clone_into(&mut self.latest_block_hash);
        }
        if self.earliest_height == 0 {
            self.earliest_height = height;
        }
    }
}
