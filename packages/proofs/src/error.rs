//! This module defines [`ProofError`].

use ethereum_trie_db::TrieDBError;
use lightclient_utils::hex::to_hex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[allow(missing_docs, clippy::module_name_repetitions)]
pub enum ProofError {
    #[error("cannot verify {proof} proof against {header} header")]
    HeaderKindMismatch {
        proof: &'static str,
        header: &'static str,
    },

    #[error("{header} header does not belong to chain {chain_id}")]
    ChainKindMismatch { header: &'static str, chain_id: i64 },

    #[error("invalid bitcoin header length: expected {expected}, got {actual}")]
    InvalidBitcoinHeaderLength { expected: usize, actual: usize },

    #[error("failed to decode bitcoin header: {0}")]
    BitcoinHeaderDecode(String),

    #[error("failed to decode bitcoin transaction: {0}")]
    BitcoinTransactionDecode(String),

    #[error("failed to decode ethereum header: {0}")]
    EthereumHeaderDecode(#[source] alloy_rlp::Error),

    #[error("invalid ethereum proof: {0}")]
    InvalidEthereumProof(#[source] TrieDBError),

    #[error("invalid bitcoin proof for tx {txid} at index {index}", txid = to_hex(.txid))]
    InvalidBitcoinProof { txid: [u8; 32], index: u64 },

    #[error("tx index must not be negative: {0}")]
    NegativeTxIndex(i64),

    #[error("tx index {tx_index} does not match proof index {proof_index}")]
    TxIndexMismatch { tx_index: i64, proof_index: u64 },

    #[error("block hash mismatch: expected {expected}, header hashes to {actual}", expected = to_hex(.expected), actual = to_hex(.actual))]
    BlockHashMismatch { expected: Vec<u8>, actual: Vec<u8> },

    #[error("block height mismatch: expected {expected}, header is at {actual}")]
    BlockHeightMismatch { expected: i64, actual: u64 },

    #[error("header timestamp {timestamp} is too far in the future (block time {now})")]
    TimestampTooFarInFuture { timestamp: u64, now: u64 },
}

impl ProofError {
    /// Whether the proof decoded fine but failed its cryptographic check.
    #[must_use]
    pub const fn is_invalid_proof(&self) -> bool {
        matches!(
            self,
            Self::InvalidEthereumProof(_)
                | Self::InvalidBitcoinProof { .. }
                | Self::TxIndexMismatch { .. }
        )
    }
}
