//! This module contains the query message handlers

use cosmwasm_std::{to_json_binary, Binary, Storage};
use lightclient_chains::chain_list;

use crate::{
    msg::{
        BlockHeaderAllResponse, ChainStateAllResponse, ChainsResponse,
        HeaderEnabledChainsResponse, HeaderSupportedChainsResponse, ProveMsg, ProveResponse,
        VerifyProofMsg, VerifyProofResponse,
    },
    state::{
        get_additional_chains, get_block_header, get_block_header_verification, get_block_headers,
        get_chain_state, get_chain_states,
    },
    verification, ContractError,
};

/// The page size of [`block_header_all`] when none is given
pub const DEFAULT_LIMIT: u32 = 50;
/// The largest page size of [`block_header_all`]
pub const MAX_LIMIT: u32 = 100;

/// Whether a transaction is included in a stored block.
/// # Errors
/// Returns an error if verification is disabled or the request or stored header is malformed.
/// A proof that simply does not hold is answered with `valid: false`.
pub fn prove(storage: &dyn Storage, msg: &ProveMsg) -> Result<Binary, ContractError> {
    let valid = verification::prove(
        storage,
        msg.chain_id,
        &msg.block_hash,
        &msg.tx_hash,
        msg.tx_index,
        &msg.proof,
    )?;

    Ok(to_json_binary(&ProveResponse { valid })?)
}

/// Verifies an inclusion proof and returns the proven transaction.
/// # Errors
/// Returns an error if verification is disabled, anything is malformed, or the proof does not hold.
pub fn verify_proof(storage: &dyn Storage, msg: &VerifyProofMsg) -> Result<Binary, ContractError> {
    let tx_bytes = verification::verify_proof(
        storage,
        &msg.proof,
        msg.chain_id,
        &msg.block_hash,
        msg.tx_index,
    )?;

    Ok(to_json_binary(&VerifyProofResponse {
        tx_bytes: tx_bytes.into(),
    })?)
}

/// Every chain ever configured for verification; empty if none was.
/// # Errors
/// Returns an error if the stored flags cannot be read.
pub fn header_supported_chains(storage: &dyn Storage) -> Result<Binary, ContractError> {
    let verification = get_block_header_verification(storage)?.unwrap_or_default();

    Ok(to_json_binary(&HeaderSupportedChainsResponse {
        header_supported_chains: verification.header_supported_chains,
    })?)
}

/// The chains with verification enabled; empty if none was configured.
/// # Errors
/// Returns an error if the stored flags cannot be read.
pub fn header_enabled_chains(storage: &dyn Storage) -> Result<Binary, ContractError> {
    let verification = get_block_header_verification(storage)?.unwrap_or_default();

    Ok(to_json_binary(&HeaderEnabledChainsResponse {
        header_enabled_chains: verification.enabled_chains(),
    })?)
}

/// The header stored under `block_hash`.
/// # Errors
/// Returns an error if no header is stored under the hash.
pub fn block_header(storage: &dyn Storage, block_hash: &[u8]) -> Result<Binary, ContractError> {
    let header = get_block_header(storage, block_hash)?
        .ok_or_else(|| ContractError::BlockHeaderNotFound(block_hash.to_vec()))?;

    Ok(to_json_binary(&header)?)
}

/// One page of stored headers.
/// # Errors
/// Returns an error if the stored headers cannot be read.
pub fn block_header_all(
    storage: &dyn Storage,
    start_after: Option<&[u8]>,
    limit: Option<u32>,
) -> Result<Binary, ContractError> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let block_headers = get_block_headers(storage, start_after, limit)?;

    Ok(to_json_binary(&BlockHeaderAllResponse { block_headers })?)
}

/// The state of `chain_id`.
/// # Errors
/// Returns an error if no state is stored for the chain.
pub fn chain_state(storage: &dyn Storage, chain_id: i64) -> Result<Binary, ContractError> {
    let state =
        get_chain_state(storage, chain_id)?.ok_or(ContractError::ChainStateNotFound(chain_id))?;

    Ok(to_json_binary(&state)?)
}

/// Every chain state.
/// # Errors
/// Returns an error if the stored states cannot be read.
pub fn chain_state_all(storage: &dyn Storage) -> Result<Binary, ContractError> {
    Ok(to_json_binary(&ChainStateAllResponse {
        chain_states: get_chain_states(storage)?,
    })?)
}

/// The chain registry including the additional chains.
/// # Errors
/// Returns an error if the additional chains cannot be read.
pub fn chains(storage: &dyn Storage) -> Result<Binary, ContractError> {
    Ok(to_json_binary(&ChainsResponse {
        chains: chain_list(&get_additional_chains(storage)?),
    })?)
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{from_json, testing::MockStorage};
    use lightclient_chains::config::DEFAULT_CHAINS;
    use lightclient_proofs::{BlockHeader, ChainState, HeaderData};

    use super::*;
    use crate::{
        state::{set_block_header, set_block_header_verification, set_chain_state},
        types::BlockHeaderVerification,
    };

    fn header(hash: u8) -> BlockHeader {
        BlockHeader {
            height: i64::from(hash),
            hash: vec![hash; 32],
            parent_hash: vec![0; 32],
            chain_id: 1,
            header: HeaderData::EthereumHeader(vec![0xc0]),
        }
    }

    #[test]
    fn test_flags_without_record_are_empty() {
        let storage = MockStorage::new();

        let supported: HeaderSupportedChainsResponse =
            from_json(header_supported_chains(&storage).unwrap()).unwrap();
        assert!(supported.header_supported_chains.is_empty());

        let enabled: HeaderEnabledChainsResponse =
            from_json(header_enabled_chains(&storage).unwrap()).unwrap();
        assert!(enabled.header_enabled_chains.is_empty());
    }

    #[test]
    fn test_flags() {
        let mut storage = MockStorage::new();
        let mut verification = BlockHeaderVerification::default();
        verification.enable_chains(&[1, 56]);
        verification.disable_chains(&[56]);
        set_block_header_verification(&mut storage, &verification).unwrap();

        let supported: HeaderSupportedChainsResponse =
            from_json(header_supported_chains(&storage).unwrap()).unwrap();
        assert_eq!(2, supported.header_supported_chains.len());

        let enabled: HeaderEnabledChainsResponse =
            from_json(header_enabled_chains(&storage).unwrap()).unwrap();
        assert_eq!(verification.enabled_chains(), enabled.header_enabled_chains);
    }

    #[test]
    fn test_block_header_pagination() {
        let mut storage = MockStorage::new();
        for hash in 1..=120 {
            set_block_header(&mut storage, &header(hash)).unwrap();
        }

        let page: BlockHeaderAllResponse =
            from_json(block_header_all(&storage, None, None).unwrap()).unwrap();
        assert_eq!(50, page.block_headers.len());
        assert_eq!(header(1), page.block_headers[0]);

        let page: BlockHeaderAllResponse =
            from_json(block_header_all(&storage, None, Some(1_000)).unwrap()).unwrap();
        assert_eq!(100, page.block_headers.len());

        let page: BlockHeaderAllResponse =
            from_json(block_header_all(&storage, Some(&[100; 32]), Some(30)).unwrap()).unwrap();
        assert_eq!(20, page.block_headers.len());
        assert_eq!(header(101), page.block_headers[0]);

        let single: BlockHeader = from_json(block_header(&storage, &[7; 32]).unwrap()).unwrap();
        assert_eq!(header(7), single);
        assert!(matches!(
            block_header(&storage, &[200; 32]),
            Err(ContractError::BlockHeaderNotFound(_))
        ));
    }

    #[test]
    fn test_chain_states() {
        let mut storage = MockStorage::new();
        set_chain_state(&mut storage, &ChainState::new(1, 5, vec![5])).unwrap();

        let state: ChainState = from_json(chain_state(&storage, 1).unwrap()).unwrap();
        assert_eq!(ChainState::new(1, 5, vec![5]), state);
        assert!(matches!(
            chain_state(&storage, 2),
            Err(ContractError::ChainStateNotFound(2))
        ));

        let all: ChainStateAllResponse = from_json(chain_state_all(&storage).unwrap()).unwrap();
        assert_eq!(vec![state], all.chain_states);
    }

    #[test]
    fn test_chains() {
        let storage = MockStorage::new();
        let res: ChainsResponse = from_json(chains(&storage).unwrap()).unwrap();
        assert_eq!(DEFAULT_CHAINS.len(), res.chains.len());
    }
}
