//! This module defines [`Proof`], an inclusion proof for one transaction of a block.

use bitcoin::{consensus, hashes::Hash, Transaction};
use ethereum_trie_db::TrieProof;
use lightclient_utils::ensure;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::ProofError, header::HeaderData};

/// An inclusion proof for a transaction of one of the supported chain families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Proof {
    /// Trie nodes from an Ethereum transactions root to the transaction
    EthereumProof(TrieProof),
    /// Merkle path from a Bitcoin transaction to the block Merkle root
    BitcoinProof(BitcoinProof),
}

/// A Bitcoin SPV proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BitcoinProof {
    /// The consensus encoded transaction
    #[serde(with = "lightclient_utils::serde::base64")]
    #[schemars(with = "String")]
    pub tx_bytes: Vec<u8>,
    /// Sibling hashes from the leaf up to the root, concatenated
    #[serde(with = "lightclient_utils::serde::base64")]
    #[schemars(with = "String")]
    pub path: Vec<u8>,
    /// Position of the transaction in the block
    pub index: u64,
}

impl Proof {
    const fn kind(&self) -> &'static str {
        match self {
            Self::EthereumProof(_) => "ethereum",
            Self::BitcoinProof(_) => "bitcoin",
        }
    }

    /// Verifies that the transaction at `tx_index` is included in the block of `header` and
    /// returns its encoding.
    ///
    /// Ethereum proofs are checked against the header's transactions root. Bitcoin proofs are
    /// checked against its Merkle root and return the proven `tx_bytes` unchanged.
    /// # Errors
    /// Returns [`ProofError::NegativeTxIndex`] for a negative `tx_index`,
    /// [`ProofError::HeaderKindMismatch`] if proof and header belong to different chain families,
    /// a decode error for malformed input, and an error for which
    /// [`ProofError::is_invalid_proof`] holds if the cryptographic check fails.
    pub fn verify(&self, header: &HeaderData, tx_index: i64) -> Result<Vec<u8>, ProofError> {
        ensure!(tx_index >= 0, ProofError::NegativeTxIndex(tx_index));

        match (self, header) {
            (Self::EthereumProof(proof), HeaderData::EthereumHeader(bytes)) => {
                let header = HeaderData::decode_ethereum(bytes)?;
                let tx = proof
                    .verify(header.transactions_root, tx_index)
                    .map_err(ProofError::InvalidEthereumProof)?;
                tracing::debug!(
                    block = header.number,
                    tx_index,
                    "verified ethereum transaction proof"
                );
                Ok(tx)
            }
            (Self::BitcoinProof(proof), HeaderData::BitcoinHeader(bytes)) => {
                proof.verify(bytes, tx_index)
            }
            (proof, header) => Err(ProofError::HeaderKindMismatch {
                proof: proof.kind(),
                header: header.kind(),
            }),
        }
    }
}

impl BitcoinProof {
    /// Creates a proof for `tx_bytes` at `index` along `path`.
    #[must_use]
    pub const fn new(tx_bytes: Vec<u8>, path: Vec<u8>, index: u64) -> Self {
        Self {
            tx_bytes,
            path,
            index,
        }
    }

    fn verify(&self, header: &[u8], tx_index: i64) -> Result<Vec<u8>, ProofError> {
        let header = HeaderData::decode_bitcoin(header)?;
        let tx: Transaction = consensus::deserialize(&self.tx_bytes)
            .map_err(|e| ProofError::BitcoinTransactionDecode(e.to_string()))?;

        ensure!(
            u64::try_from(tx_index).is_ok_and(|i| i == self.index),
            ProofError::TxIndexMismatch {
                tx_index,
                proof_index: self.index,
            }
        );

        let txid = tx.compute_txid().to_byte_array();
        ensure!(
            bitcoin_merkle::prove(
                &txid,
                &header.merkle_root.to_byte_array(),
                &self.path,
                self.index
            ),
            ProofError::InvalidBitcoinProof {
                txid,
                index: self.index,
            }
        );

        tracing::debug!(tx_index, "verified bitcoin transaction proof");
        Ok(self.tx_bytes.clone())
    }
}
