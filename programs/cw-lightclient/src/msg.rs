//! The messages that are passed between the contract and the host chain
#![allow(clippy::module_name_repetitions)]

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;
use lightclient_chains::Chain;
use lightclient_proofs::{BlockHeader, ChainState, HeaderData, Proof};

use crate::types::{BlockHeaderVerification, HeaderSupportedChain};

/// The message to instantiate the contract. Every field is optional genesis state.
#[cw_serde]
#[derive(Default)]
pub struct InstantiateMsg {
    /// Headers to store without validation
    #[serde(default)]
    pub block_headers: Vec<BlockHeader>,
    /// Chain states matching `block_headers`
    #[serde(default)]
    pub chain_states: Vec<ChainState>,
    /// Initial verification flags
    #[serde(default)]
    pub block_header_verification: Option<BlockHeaderVerification>,
    /// Chains to add to, or replace in, the built-in registry
    #[serde(default)]
    pub additional_chains: Vec<Chain>,
}

/// The governance messages
#[cw_serde]
pub enum ExecuteMsg {
    /// Enable header verification for the chains. Requires the operational policy
    EnableHeaderVerification {
        /// The chains to enable
        chain_id_list: Vec<i64>,
    },
    /// Disable header verification for the chains. Requires the emergency policy
    DisableHeaderVerification {
        /// The chains to disable
        chain_id_list: Vec<i64>,
    },
}

/// The messages called by the host chain
#[cw_serde]
pub enum SudoMsg {
    /// Store a header the host's observers agreed on
    AddBlockHeader(AddBlockHeaderMsg),
    /// Prune a stored header
    RemoveBlockHeader(RemoveBlockHeaderMsg),
}

/// Add block header message
#[cw_serde]
pub struct AddBlockHeaderMsg {
    /// The chain of the block
    pub chain_id: i64,
    /// The block hash, in the byte order the header hashes to
    pub block_hash: Binary,
    /// The block height
    pub height: i64,
    /// The header
    pub header: HeaderData,
}

/// Remove block header message
#[cw_serde]
pub struct RemoveBlockHeaderMsg {
    /// The hash of the header to prune
    pub block_hash: Binary,
}

/// The query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Whether a transaction is included in a stored block
    #[returns[ProveResponse]]
    Prove(ProveMsg),

    /// Verify an inclusion proof and return the proven transaction
    #[returns[VerifyProofResponse]]
    VerifyProof(VerifyProofMsg),

    /// Every chain ever configured for verification
    #[returns[HeaderSupportedChainsResponse]]
    HeaderSupportedChains {},

    /// The chains with verification enabled
    #[returns[HeaderEnabledChainsResponse]]
    HeaderEnabledChains {},

    /// A stored header
    #[returns[BlockHeader]]
    BlockHeader {
        /// The block hash
        block_hash: Binary,
    },

    /// Stored headers in ascending hash order
    #[returns[BlockHeaderAllResponse]]
    BlockHeaderAll {
        /// Start after this hash
        start_after: Option<Binary>,
        /// At most this many headers
        limit: Option<u32>,
    },

    /// The state of one chain
    #[returns[ChainState]]
    ChainState {
        /// The chain ID
        chain_id: i64,
    },

    /// Every chain state
    #[returns[ChainStateAllResponse]]
    ChainStateAll {},

    /// The chain registry including additional chains
    #[returns[ChainsResponse]]
    Chains {},
}

/// The message to migrate the contract
#[cw_serde]
pub struct MigrateMsg {}

/// Prove query message
#[cw_serde]
pub struct ProveMsg {
    /// The chain of the block
    pub chain_id: i64,
    /// The block hash in the chain's own string form
    pub block_hash: String,
    /// The claimed transaction hash in the chain's own string form
    pub tx_hash: String,
    /// The position of the transaction in the block
    pub tx_index: i64,
    /// The inclusion proof
    pub proof: Proof,
}

/// Verify proof query message
#[cw_serde]
pub struct VerifyProofMsg {
    /// The chain of the block
    pub chain_id: i64,
    /// The block hash in the chain's own string form
    pub block_hash: String,
    /// The position of the transaction in the block
    pub tx_index: i64,
    /// The inclusion proof
    pub proof: Proof,
}

/// Response to [`QueryMsg::Prove`]
#[cw_serde]
pub struct ProveResponse {
    /// Whether the transaction is proven
    pub valid: bool,
}

/// Response to [`QueryMsg::VerifyProof`]
#[cw_serde]
pub struct VerifyProofResponse {
    /// The proven transaction
    pub tx_bytes: Binary,
}

/// Response to [`QueryMsg::HeaderSupportedChains`]
#[cw_serde]
pub struct HeaderSupportedChainsResponse {
    /// Every configured chain
    pub header_supported_chains: Vec<HeaderSupportedChain>,
}

/// Response to [`QueryMsg::HeaderEnabledChains`]
#[cw_serde]
pub struct HeaderEnabledChainsResponse {
    /// The enabled chains
    pub header_enabled_chains: Vec<HeaderSupportedChain>,
}

/// Response to [`QueryMsg::BlockHeaderAll`]
#[cw_serde]
pub struct BlockHeaderAllResponse {
    /// One page of headers
    pub block_headers: Vec<BlockHeader>,
}

/// Response to [`QueryMsg::ChainStateAll`]
#[cw_serde]
pub struct ChainStateAllResponse {
    /// Every chain state
    pub chain_states: Vec<ChainState>,
}

/// Response to [`QueryMsg::Chains`]
#[cw_serde]
pub struct ChainsResponse {
    /// Every known chain
    pub chains: Vec<Chain>,
}
