//! This module defines [`HeaderData`], the raw header bytes proofs are verified against.

use alloy_consensus::Header as EthHeader;
use bitcoin::{block::Header as BtcHeader, consensus, hashes::Hash};
use lightclient_chains::{is_bitcoin_chain, is_evm_chain, Chain};
use lightclient_utils::ensure;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ProofError;

/// Length of a serialized Bitcoin block header.
pub const BITCOIN_HEADER_LEN: usize = 80;

/// How far in the future of the host block time a header timestamp may lie, in seconds.
pub const MAX_TIME_DRIFT: u64 = 2 * 60 * 60;

/// A block header of one of the supported chain families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HeaderData {
    /// RLP encoded Ethereum header
    EthereumHeader(
        #[serde(with = "lightclient_utils::serde::base64")]
        #[schemars(with = "String")]
        Vec<u8>,
    ),
    /// Consensus encoded 80 byte Bitcoin header
    BitcoinHeader(
        #[serde(with = "lightclient_utils::serde::base64")]
        #[schemars(with = "String")]
        Vec<u8>,
    ),
}

impl HeaderData {
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::EthereumHeader(_) => "ethereum",
            Self::BitcoinHeader(_) => "bitcoin",
        }
    }

    /// Decodes an Ethereum header. The whole buffer must be consumed.
    pub(crate) fn decode_ethereum(bytes: &[u8]) -> Result<EthHeader, ProofError> {
        alloy_rlp::decode_exact(bytes).map_err(ProofError::EthereumHeaderDecode)
    }

    /// Decodes a Bitcoin header of exactly [`BITCOIN_HEADER_LEN`] bytes.
    pub(crate) fn decode_bitcoin(bytes: &[u8]) -> Result<BtcHeader, ProofError> {
        ensure!(
            bytes.len() == BITCOIN_HEADER_LEN,
            ProofError::InvalidBitcoinHeaderLength {
                expected: BITCOIN_HEADER_LEN,
                actual: bytes.len(),
            }
        );
        consensus::deserialize(bytes).map_err(|e| ProofError::BitcoinHeaderDecode(e.to_string()))
    }

    /// The hash of the parent block, in the byte order headers are stored under.
    /// # Errors
    /// Returns an error if the header does not decode.
    pub fn parent_hash(&self) -> Result<Vec<u8>, ProofError> {
        match self {
            Self::EthereumHeader(bytes) => Ok(Self::decode_ethereum(bytes)?.parent_hash.to_vec()),
            Self::BitcoinHeader(bytes) => Ok(Self::decode_bitcoin(bytes)?
                .prev_blockhash
                .to_byte_array()
                .to_vec()),
        }
    }

    /// The header timestamp in unix seconds.
    /// # Errors
    /// Returns an error if the header does not decode.
    pub fn timestamp(&self) -> Result<u64, ProofError> {
        match self {
            Self::EthereumHeader(bytes) => Ok(Self::decode_ethereum(bytes)?.timestamp),
            Self::BitcoinHeader(bytes) => Ok(u64::from(Self::decode_bitcoin(bytes)?.time)),
        }
    }

    /// Checks that the header belongs to `chain_id`, hashes to `block_hash` and, where the header
    /// carries one, sits at `height`.
    /// # Errors
    /// Returns an error if the header does not decode or any of the checks fail.
    pub fn validate(
        &self,
        block_hash: &[u8],
        chain_id: i64,
        height: i64,
        additional_chains: &[Chain],
    ) -> Result<(), ProofError> {
        match self {
            Self::EthereumHeader(bytes) => {
                ensure!(
                    is_evm_chain(chain_id, additional_chains),
                    ProofError::ChainKindMismatch {
                        header: self.kind(),
                        chain_id,
                    }
                );
                let header = Self::decode_ethereum(bytes)?;
                let hash = header.hash_slow();
                ensure!(
                    hash.as_slice() == block_hash,
                    ProofError::BlockHashMismatch {
                        expected: block_hash.to_vec(),
                        actual: hash.to_vec(),
                    }
                );
                ensure!(
                    i64::try_from(header.number).is_ok_and(|number| number == height),
                    ProofError::BlockHeightMismatch {
                        expected: height,
                        actual: header.number,
                    }
                );
            }
            Self::BitcoinHeader(bytes) => {
                ensure!(
                    is_bitcoin_chain(chain_id, additional_chains),
                    ProofError::ChainKindMismatch {
                        header: self.kind(),
                        chain_id,
                    }
                );
                let hash = Self::decode_bitcoin(bytes)?.block_hash().to_byte_array();
                ensure!(
                    hash.as_slice() == block_hash,
                    ProofError::BlockHashMismatch {
                        expected: block_hash.to_vec(),
                        actual: hash.to_vec(),
                    }
                );
            }
        }

        Ok(())
    }

    /// Checks that the header timestamp is at most [`MAX_TIME_DRIFT`] ahead of `now`.
    /// # Errors
    /// Returns an error if the header does not decode or lies too far in the future.
    pub fn validate_timestamp(&self, now: u64) -> Result<(), ProofError> {
        let timestamp = self.timestamp()?;
        ensure!(
            timestamp <= now.saturating_add(MAX_TIME_DRIFT),
            ProofError::TimestampTooFarInFuture { timestamp, now }
        );
        Ok(())
    }
}
