//! State management for the light client.
//!
//! Every record is stored as JSON under a fixed prefix followed by its identifier.

use cosmwasm_std::{Order, Storage};
use lightclient_chains::Chain;
use lightclient_proofs::{BlockHeader, ChainState};
use serde::{de::DeserializeOwned, Serialize};

use crate::{types::BlockHeaderVerification, ContractError};

/// The prefix of block headers, keyed by raw block hash
pub const BLOCK_HEADER_KEY: &str = "BlockHeader-value-";
/// The prefix of chain states, keyed by the decimal chain ID
pub const CHAIN_STATE_KEY: &str = "ChainState-value-";
/// The prefix of the single verification flags record
pub const BLOCK_HEADER_VERIFICATION_KEY: &str = "BlockHeaderVerification-value-";
/// The key of the chains added to the built-in registry at instantiation
pub const ADDITIONAL_CHAINS_KEY: &str = "AdditionalChains";

fn prefixed(prefix: &str, id: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + id.len());
    key.extend_from_slice(prefix.as_bytes());
    key.extend_from_slice(id);
    key
}

/// The first key after every key starting with `prefix`.
fn prefix_end(prefix: &str) -> Vec<u8> {
    let mut end = prefix.as_bytes().to_vec();
    // all prefixes end in an ASCII character, so this cannot overflow
    if let Some(last) = end.last_mut() {
        *last += 1;
    }
    end
}

/// The key a block header is stored under
#[must_use]
pub fn block_header_key(hash: &[u8]) -> Vec<u8> {
    prefixed(BLOCK_HEADER_KEY, hash)
}

/// The key a chain state is stored under
#[must_use]
pub fn chain_state_key(chain_id: i64) -> Vec<u8> {
    prefixed(CHAIN_STATE_KEY, chain_id.to_string().as_bytes())
}

/// The key of the verification flags record
#[must_use]
pub fn block_header_verification_key() -> Vec<u8> {
    prefixed(BLOCK_HEADER_VERIFICATION_KEY, &[0])
}

fn load<T: DeserializeOwned>(storage: &dyn Storage, key: &[u8]) -> Result<Option<T>, ContractError> {
    storage
        .get(key)
        .map(|bz| serde_json::from_slice(&bz))
        .transpose()
        .map_err(Into::into)
}

fn save<T: Serialize>(storage: &mut dyn Storage, key: &[u8], value: &T) -> Result<(), ContractError> {
    storage.set(key, &serde_json::to_vec(value)?);
    Ok(())
}

fn range<T: DeserializeOwned>(
    storage: &dyn Storage,
    prefix: &str,
    start: Option<Vec<u8>>,
    limit: usize,
) -> Result<Vec<T>, ContractError> {
    let start = start.unwrap_or_else(|| prefix.as_bytes().to_vec());
    let end = prefix_end(prefix);

    storage
        .range(Some(start.as_slice()), Some(end.as_slice()), Order::Ascending)
        .take(limit)
        .map(|(_, bz)| serde_json::from_slice(&bz).map_err(Into::into))
        .collect()
}

/// Stores `header` under its hash, replacing any previous header with that hash.
/// # Errors
/// Returns an error if the header cannot be serialized.
pub fn set_block_header(storage: &mut dyn Storage, header: &BlockHeader) -> Result<(), ContractError> {
    save(storage, &block_header_key(&header.hash), header)
}

/// The header stored under `hash`, if any.
/// # Errors
/// Returns an error if the stored header cannot be deserialized.
pub fn get_block_header(
    storage: &dyn Storage,
    hash: &[u8],
) -> Result<Option<BlockHeader>, ContractError> {
    load(storage, &block_header_key(hash))
}

/// Removes the header stored under `hash`.
pub fn remove_block_header(storage: &mut dyn Storage, hash: &[u8]) {
    storage.remove(&block_header_key(hash));
}

/// Up to `limit` headers in ascending hash order, starting after `start_after`.
/// # Errors
/// Returns an error if a stored header cannot be deserialized.
pub fn get_block_headers(
    storage: &dyn Storage,
    start_after: Option<&[u8]>,
    limit: usize,
) -> Result<Vec<BlockHeader>, ContractError> {
    // appending a zero byte gives the first key after `start_after`
    let start = start_after.map(|hash| {
        let mut key = block_header_key(hash);
        key.push(0);
        key
    });
    range(storage, BLOCK_HEADER_KEY, start, limit)
}

/// Stores `state` under its chain ID.
/// # Errors
/// Returns an error if the state cannot be serialized.
pub fn set_chain_state(storage: &mut dyn Storage, state: &ChainState) -> Result<(), ContractError> {
    save(storage, &chain_state_key(state.chain_id), state)
}

/// The state of `chain_id`, if any.
/// # Errors
/// Returns an error if the stored state cannot be deserialized.
pub fn get_chain_state(
    storage: &dyn Storage,
    chain_id: i64,
) -> Result<Option<ChainState>, ContractError> {
    load(storage, &chain_state_key(chain_id))
}

/// Every chain state.
/// # Errors
/// Returns an error if a stored state cannot be deserialized.
pub fn get_chain_states(storage: &dyn Storage) -> Result<Vec<ChainState>, ContractError> {
    range(storage, CHAIN_STATE_KEY, None, usize::MAX)
}

/// Replaces the verification flags record.
/// # Errors
/// Returns an error if the record cannot be serialized.
pub fn set_block_header_verification(
    storage: &mut dyn Storage,
    verification: &BlockHeaderVerification,
) -> Result<(), ContractError> {
    save(storage, &block_header_verification_key(), verification)
}

/// The verification flags record, if one was ever stored.
/// # Errors
/// Returns an error if the stored record cannot be deserialized.
pub fn get_block_header_verification(
    storage: &dyn Storage,
) -> Result<Option<BlockHeaderVerification>, ContractError> {
    load(storage, &block_header_verification_key())
}

/// Stores the chains added to the built-in registry.
/// # Errors
/// Returns an error if the chains cannot be serialized.
pub fn set_additional_chains(storage: &mut dyn Storage, chains: &[Chain]) -> Result<(), ContractError> {
    save(storage, ADDITIONAL_CHAINS_KEY.as_bytes(), &chains)
}

/// The chains added to the built-in registry, empty if none were.
/// # Errors
/// Returns an error if the stored chains cannot be deserialized.
pub fn get_additional_chains(storage: &dyn Storage) -> Result<Vec<Chain>, ContractError> {
    Ok(load(storage, ADDITIONAL_CHAINS_KEY.as_bytes())?.unwrap_or_default())
}
