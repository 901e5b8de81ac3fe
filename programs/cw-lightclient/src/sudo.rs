//! This module contains the handlers of the host chain's sudo messages.

use cosmwasm_std::{Response, Storage};
use lightclient_utils::hex::to_hex;

use crate::{
    msg::{AddBlockHeaderMsg, RemoveBlockHeaderMsg},
    state::{self, get_additional_chains, get_block_header, get_chain_state, set_chain_state},
    verification::{self, check_block_header_verification_enabled, check_new_block_header},
    ContractError,
};

/// Validates and stores a block header.
///
/// `now` is the host block time in unix seconds.
/// # Errors
/// Returns an error if verification is disabled for the chain, the header is malformed or does not
/// match its hash and height, or it does not fit the stored headers.
pub fn add_block_header(
    storage: &mut dyn Storage,
    now: u64,
    msg: AddBlockHeaderMsg,
) -> Result<Response, ContractError> {
    let AddBlockHeaderMsg {
        chain_id,
        block_hash,
        height,
        header,
    } = msg;

    check_block_header_verification_enabled(storage, chain_id)?;
    header
        .validate(
            &block_hash,
            chain_id,
            height,
            &get_additional_chains(storage)?,
        )
        .map_err(ContractError::InvalidBlockHeader)?;

    let parent_hash = check_new_block_header(storage, now, chain_id, &block_hash, height, &header)?;
    verification::add_block_header(storage, chain_id, height, &block_hash, header, parent_hash)?;

    tracing::info!(chain_id, height, block_hash = %to_hex(&block_hash), "block header added");
    Ok(Response::new()
        .add_attribute("action", "add_block_header")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("height", height.to_string())
        .add_attribute("block_hash", to_hex(&block_hash)))
}

/// Prunes a stored block header.
///
/// Pruning the earliest header of a chain moves its earliest height up by one.
/// # Errors
/// Returns an error if no header is stored under the hash.
pub fn remove_block_header(
    storage: &mut dyn Storage,
    msg: &RemoveBlockHeaderMsg,
) -> Result<Response, ContractError> {
    let header = get_block_header(storage, &msg.block_hash)?
        .ok_or_else(|| ContractError::BlockHeaderNotFound(msg.block_hash.to_vec()))?;

    remove_block_header_record(storage, &header.hash, header.chain_id, header.height)?;

    tracing::info!(
        chain_id = header.chain_id,
        height = header.height,
        block_hash = %to_hex(&header.hash),
        "block header removed"
    );
    Ok(Response::new()
        .add_attribute("action", "remove_block_header")
        .add_attribute("chain_id", header.chain_id.to_string())
        .add_attribute("height", header.height.to_string())
        .add_attribute("block_hash", to_hex(&header.hash)))
}

fn remove_block_header_record(
    storage: &mut dyn Storage,
    hash: &[u8],
    chain_id: i64,
    height: i64,
) -> Result<(), ContractError> {
    state::remove_block_header(storage, hash);

    if let Some(mut state) = get_chain_state(storage, chain_id)? {
        if state.earliest_height == height {
            state.earliest_height = if height < state.latest_height {
                height + 1
            } else {
                0
            };
            set_chain_state(storage, &state)?;
        }
    }
    Ok(())
}
