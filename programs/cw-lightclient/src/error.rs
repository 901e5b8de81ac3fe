//! Defines the [`ContractError`] type.

use cosmwasm_std::StdError;
use lightclient_chains::ChainError;
use lightclient_proofs::ProofError;
use lightclient_utils::hex::to_hex;
use thiserror::Error;

use crate::authority::PolicyType;

/// Error types that can be returned by contract operations
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum ContractError {
    /// Standard `CosmWasm` error
    #[error("{0}")]
    Std(#[from] StdError),

    /// Serde JSON error
    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The sender is not in the required policy group
    #[error("{sender} is not authorized for {policy:?}")]
    Unauthorized {
        /// The message sender
        sender: String,
        /// The policy group that was required
        policy: PolicyType,
    },

    /// A governance message without chain IDs
    #[error("chain id list cannot be empty")]
    EmptyChainIdList,

    /// A governance message with too many chain IDs
    #[error("chain id list too long: {len} > {max}")]
    ChainIdListTooLong {
        /// The list length
        len: usize,
        /// The allowed maximum
        max: usize,
    },

    /// The chain does not accept block headers
    #[error("chain {0} does not support block headers")]
    ChainNotSupported(i64),

    /// No chain has ever been configured for verification
    #[error("block header verification is disabled for all chains")]
    BlockHeaderVerificationDisabledForAllChains,

    /// The chain is absent from the verification list or disabled in it
    #[error("block header verification is disabled for chain {0}")]
    BlockHeaderVerificationDisabled(i64),

    /// The block hash string does not parse for the chain
    #[error("invalid block hash: {0}")]
    InvalidBlockHash(#[source] ChainError),

    /// No header is stored under the hash
    #[error("block header {} not found", to_hex(.0))]
    BlockHeaderNotFound(Vec<u8>),

    /// No state is stored for the chain
    #[error("chain state for chain {0} not found")]
    ChainStateNotFound(i64),

    /// The inclusion proof did not verify
    #[error("proof verification failed: {0}")]
    ProofVerificationFailed(#[source] ProofError),

    /// The proven transaction bytes do not decode
    #[error("failed to decode proven transaction: {0}")]
    TxDecodeFailed(String),

    /// The claimed transaction hash does not parse
    #[error("invalid tx hash {tx_hash:?}: {reason}")]
    InvalidTxHash {
        /// The claimed hash
        tx_hash: String,
        /// Why it does not parse
        reason: String,
    },

    /// The proven transaction hashes to something other than the claimed hash
    #[error("tx hash mismatch: claimed {claimed}, proven tx hashes to {actual}")]
    TxHashMismatch {
        /// The claimed hash
        claimed: String,
        /// The hash of the proven transaction
        actual: String,
    },

    /// Proofs can only be checked for EVM and Bitcoin chains
    #[error("chain {0} is neither an EVM nor a Bitcoin chain")]
    UnsupportedChain(i64),

    /// The header is already stored
    #[error("block {} already exists", to_hex(.0))]
    BlockAlreadyExists(Vec<u8>),

    /// The parent hash cannot be read from the header
    #[error("no parent hash: {0}")]
    NoParentHash(#[source] ProofError),

    /// The parent of a header is not stored
    #[error("parent block {} not found", to_hex(.0))]
    ParentBlockNotFound(Vec<u8>),

    /// The header does not extend the latest stored header
    #[error("invalid block height: expected {expected}, got {actual}")]
    InvalidBlockHeight {
        /// The next height after the latest stored header
        expected: i64,
        /// The submitted height
        actual: i64,
    },

    /// The header is malformed or inconsistent with its metadata
    #[error("invalid block header: {0}")]
    InvalidBlockHeader(#[source] ProofError),
}

impl ContractError {
    /// Whether the error is caused by a malformed request rather than by stored state or
    /// an internal failure.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyChainIdList
                | Self::ChainIdListTooLong { .. }
                | Self::ChainNotSupported(_)
                | Self::InvalidBlockHash(_)
                | Self::InvalidTxHash { .. }
                | Self::TxHashMismatch { .. }
                | Self::UnsupportedChain(_)
                | Self::ProofVerificationFailed(ProofError::NegativeTxIndex(_))
        )
    }
}
