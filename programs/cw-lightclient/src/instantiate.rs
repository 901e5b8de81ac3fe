//! This module stores the genesis state the contract is instantiated with.

use cosmwasm_std::Storage;

use crate::{
    msg::InstantiateMsg,
    state::{
        set_additional_chains, set_block_header, set_block_header_verification, set_chain_state,
    },
    ContractError,
};

/// Stores the genesis state of `msg`.
///
/// Headers and chain states are trusted as given; nothing is validated against the chain registry.
/// # Errors
/// Returns an error if a value cannot be serialized.
pub fn genesis(storage: &mut dyn Storage, msg: &InstantiateMsg) -> Result<(), ContractError> {
    if !msg.additional_chains.is_empty() {
        set_additional_chains(storage, &msg.additional_chains)?;
    }
    for header in &msg.block_headers {
        set_block_header(storage, header)?;
    }
    for state in &msg.chain_states {
        set_chain_state(storage, state)?;
    }
    if let Some(verification) = &msg.block_header_verification {
        set_block_header_verification(storage, verification)?;
    }

    tracing::info!(
        block_headers = msg.block_headers.len(),
        chain_states = msg.chain_states.len(),
        additional_chains = msg.additional_chains.len(),
        "genesis state stored"
    );
    Ok(())
}
