//! Per-chain verification gating, inclusion proof checks and header bookkeeping.

use core::str::FromStr;

use alloy_consensus::TxEnvelope;
use alloy_eips::eip2718::Decodable2718;
use alloy_primitives::B256;
use bitcoin::{consensus, Transaction, Txid};
use cosmwasm_std::Storage;
use lightclient_chains::{is_bitcoin_chain, is_evm_chain, string_to_hash, Chain};
use lightclient_proofs::{BlockHeader, ChainState, HeaderData, Proof};
use lightclient_utils::ensure;

use crate::{
    state::{
        get_additional_chains, get_block_header, get_block_header_verification, get_chain_state,
        set_block_header, set_chain_state,
    },
    ContractError,
};

/// Fails unless headers and proofs of `chain_id` are accepted.
/// # Errors
/// Returns [`ContractError::BlockHeaderVerificationDisabledForAllChains`] if no chain was ever
/// configured and [`ContractError::BlockHeaderVerificationDisabled`] if `chain_id` is absent or
/// disabled.
pub fn check_block_header_verification_enabled(
    storage: &dyn Storage,
    chain_id: i64,
) -> Result<(), ContractError> {
    let verification = get_block_header_verification(storage)?
        .ok_or(ContractError::BlockHeaderVerificationDisabledForAllChains)?;
    ensure!(
        verification.is_chain_enabled(chain_id),
        ContractError::BlockHeaderVerificationDisabled(chain_id)
    );
    Ok(())
}

/// Verifies `proof` against the stored header `block_hash` of `chain_id` and returns the proven
/// transaction bytes.
///
/// The verification gate is checked before anything else.
/// # Errors
/// Returns an error if verification is disabled, the hash does not parse, the header is not
/// stored for the chain, or the proof does not verify.
pub fn verify_proof(
    storage: &dyn Storage,
    proof: &Proof,
    chain_id: i64,
    block_hash: &str,
    tx_index: i64,
) -> Result<Vec<u8>, ContractError> {
    check_block_header_verification_enabled(storage, chain_id)?;
    let additional_chains = get_additional_chains(storage)?;
    verify_against_stored_header(storage, proof, chain_id, block_hash, tx_index, &additional_chains)
}

fn verify_against_stored_header(
    storage: &dyn Storage,
    proof: &Proof,
    chain_id: i64,
    block_hash: &str,
    tx_index: i64,
    additional_chains: &[Chain],
) -> Result<Vec<u8>, ContractError> {
    let hash = string_to_hash(chain_id, block_hash, additional_chains)
        .map_err(ContractError::InvalidBlockHash)?;
    let header = get_block_header(storage, &hash)?
        .filter(|header| header.chain_id == chain_id)
        .ok_or(ContractError::BlockHeaderNotFound(hash))?;

    proof
        .verify(&header.header, tx_index)
        .map_err(ContractError::ProofVerificationFailed)
}

/// Whether `proof` proves that the transaction `tx_hash` sits at `tx_index` of block
/// `block_hash`.
///
/// A proof that decodes but fails its cryptographic check yields `Ok(false)`. Once the proof
/// holds, the proven bytes must decode to a transaction hashing to `tx_hash`.
/// # Errors
/// Returns an error if verification is disabled, the request is malformed, the header is not
/// stored, the proof is malformed, or the proven transaction is not `tx_hash`.
pub fn prove(
    storage: &dyn Storage,
    chain_id: i64,
    block_hash: &str,
    tx_hash: &str,
    tx_index: i64,
    proof: &Proof,
) -> Result<bool, ContractError> {
    check_block_header_verification_enabled(storage, chain_id)?;
    let additional_chains = get_additional_chains(storage)?;

    let tx_bytes = match verify_against_stored_header(
        storage,
        proof,
        chain_id,
        block_hash,
        tx_index,
        &additional_chains,
    ) {
        Ok(tx_bytes) => tx_bytes,
        Err(ContractError::ProofVerificationFailed(err)) if err.is_invalid_proof() => {
            tracing::debug!(chain_id, block_hash, tx_index, %err, "transaction not proven");
            return Ok(false);
        }
        Err(err) => return Err(err),
    };

    if is_evm_chain(chain_id, &additional_chains) {
        check_evm_tx_hash(&tx_bytes, tx_hash)?;
    } else if is_bitcoin_chain(chain_id, &additional_chains) {
        check_bitcoin_tx_hash(&tx_bytes, tx_hash)?;
    } else {
        return Err(ContractError::UnsupportedChain(chain_id));
    }

    tracing::debug!(chain_id, block_hash, tx_hash, tx_index, "transaction proven");
    Ok(true)
}

fn invalid_tx_hash(tx_hash: &str, reason: impl ToString) -> ContractError {
    ContractError::InvalidTxHash {
        tx_hash: tx_hash.to_string(),
        reason: reason.to_string(),
    }
}

fn check_evm_tx_hash(tx_bytes: &[u8], tx_hash: &str) -> Result<(), ContractError> {
    let claimed = B256::from_str(tx_hash).map_err(|e| invalid_tx_hash(tx_hash, e))?;
    let tx = TxEnvelope::decode_2718(&mut &tx_bytes[..])
        .map_err(|e| ContractError::TxDecodeFailed(e.to_string()))?;

    let actual = *tx.tx_hash();
    ensure!(
        actual == claimed,
        ContractError::TxHashMismatch {
            claimed: tx_hash.to_string(),
            actual: actual.to_string(),
        }
    );
    Ok(())
}

fn check_bitcoin_tx_hash(tx_bytes: &[u8], tx_hash: &str) -> Result<(), ContractError> {
    let claimed = Txid::from_str(tx_hash).map_err(|e| invalid_tx_hash(tx_hash, e))?;
    let tx: Transaction = consensus::deserialize(tx_bytes)
        .map_err(|e| ContractError::TxDecodeFailed(e.to_string()))?;

    let actual = tx.compute_txid();
    ensure!(
        actual == claimed,
        ContractError::TxHashMismatch {
            claimed: tx_hash.to_string(),
            actual: actual.to_string(),
        }
    );
    Ok(())
}

/// Checks that `header` can be stored as block `block_hash` at `height` of `chain_id` and returns
/// its parent hash.
///
/// Once a chain has a known earliest height below `height`, the parent must be stored and the
/// header must extend the latest one. The header timestamp may not lie more than the allowed drift
/// past `now`.
/// # Errors
/// Returns an error if verification is disabled for the chain or any of the checks fail.
pub fn check_new_block_header(
    storage: &dyn Storage,
    now: u64,
    chain_id: i64,
    block_hash: &[u8],
    height: i64,
    header: &HeaderData,
) -> Result<Vec<u8>, ContractError> {
    check_block_header_verification_enabled(storage, chain_id)?;

    ensure!(
        get_block_header(storage, block_hash)?.is_none(),
        ContractError::BlockAlreadyExists(block_hash.to_vec())
    );

    let parent_hash = header.parent_hash().map_err(ContractError::NoParentHash)?;

    if let Some(state) = get_chain_state(storage, chain_id)? {
        if state.earliest_height > 0 && state.earliest_height < height {
            ensure!(
                get_block_header(storage, &parent_hash)?.is_some(),
                ContractError::ParentBlockNotFound(parent_hash)
            );
            let expected = state.latest_height.saturating_add(1);
            ensure!(
                height == expected,
                ContractError::InvalidBlockHeight {
                    expected,
                    actual: height,
                }
            );
        }
    }

    header
        .validate_timestamp(now)
        .map_err(ContractError::InvalidBlockHeader)?;

    Ok(parent_hash)
}

/// Stores a header already accepted by [`check_new_block_header`] and updates the chain state.
/// # Errors
/// Returns an error if the records cannot be read or written.
pub fn add_block_header(
    storage: &mut dyn Storage,
    chain_id: i64,
    height: i64,
    block_hash: &[u8],
    header: HeaderData,
    parent_hash: Vec<u8>,
) -> Result<(), ContractError> {
    let state = match get_chain_state(storage, chain_id)? {
        Some(mut state) => {
            state.record(height, block_hash);
            state
        }
        None => ChainState::new(chain_id, height, block_hash.to_vec()),
    };
    set_chain_state(storage, &state)?;

    set_block_header(
        storage,
        &BlockHeader {
            height,
            hash: block_hash.to_vec(),
            parent_hash,
            chain_id,
            header,
        },
    )
}
