//! This module defines [`ChainError`].

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[allow(missing_docs, clippy::module_name_repetitions)]
pub enum ChainError {
    #[error("chain {0} not found")]
    ChainNotFound(i64),

    #[error("chain {0} is neither an EVM nor a Bitcoin chain")]
    UnsupportedChainKind(i64),

    #[error("invalid block hash {hash:?} for chain {chain_id}: {reason}")]
    InvalidBlockHash {
        chain_id: i64,
        hash: String,
        reason: String,
    },
}
