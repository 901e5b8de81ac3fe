//! This module contains the `CosmWasm` entrypoints for the light client contract

use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response};

use crate::{
    authority::{AuthorityKeeper, LightClientQuery},
    execute, instantiate,
    msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SudoMsg},
    query, sudo, ContractError,
};

/// The version of the contracts state.
/// It is used to determine if the state needs to be migrated in the migrate entry point.
const STATE_VERSION: &str = env!("CARGO_PKG_VERSION");
const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");

/// The instantiate entry point for the CosmWasm contract.
/// # Errors
/// Will return an error if the genesis state cannot be stored.
#[entry_point]
#[allow(clippy::needless_pass_by_value)]
pub fn instantiate(
    deps: DepsMut<LightClientQuery>,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, STATE_VERSION)?;

    instantiate::genesis(deps.storage, &msg)?;

    Ok(Response::default())
}

/// The execute entry point for the CosmWasm contract.
/// It routes the governance messages to their handlers.
/// # Errors
/// Will return an error if the handler returns an error.
#[entry_point]
#[allow(clippy::needless_pass_by_value)]
pub fn execute(
    deps: DepsMut<LightClientQuery>,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let authority = AuthorityKeeper {
        querier: deps.querier,
    };

    match msg {
        ExecuteMsg::EnableHeaderVerification { chain_id_list } => {
            execute::enable_header_verification(
                deps.storage,
                &authority,
                &info.sender,
                &chain_id_list,
            )
        }
        ExecuteMsg::DisableHeaderVerification { chain_id_list } => {
            execute::disable_header_verification(
                deps.storage,
                &authority,
                &info.sender,
                &chain_id_list,
            )
        }
    }
}

/// The sudo entry point for the CosmWasm contract.
/// It routes the message to the appropriate handler.
/// # Errors
/// Will return an error if the handler returns an error.
#[entry_point]
#[allow(clippy::needless_pass_by_value)]
pub fn sudo(
    deps: DepsMut<LightClientQuery>,
    env: Env,
    msg: SudoMsg,
) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::AddBlockHeader(add_block_header_msg) => sudo::add_block_header(
            deps.storage,
            env.block.time.seconds(),
            add_block_header_msg,
        ),
        SudoMsg::RemoveBlockHeader(remove_block_header_msg) => {
            sudo::remove_block_header(deps.storage, &remove_block_header_msg)
        }
    }
}

/// The query entry point for the CosmWasm contract.
/// It routes the message to the appropriate handler.
/// # Errors
/// Will return an error if the handler returns an error.
#[entry_point]
#[allow(clippy::needless_pass_by_value)]
pub fn query(
    deps: Deps<LightClientQuery>,
    _env: Env,
    msg: QueryMsg,
) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Prove(prove_msg) => query::prove(deps.storage, &prove_msg),
        QueryMsg::VerifyProof(verify_proof_msg) => {
            query::verify_proof(deps.storage, &verify_proof_msg)
        }
        QueryMsg::HeaderSupportedChains {} => query::header_supported_chains(deps.storage),
        QueryMsg::HeaderEnabledChains {} => query::header_enabled_chains(deps.storage),
        QueryMsg::BlockHeader { block_hash } => query::block_header(deps.storage, &block_hash),
        QueryMsg::BlockHeaderAll { start_after, limit } => {
            query::block_header_all(deps.storage, start_after.as_deref(), limit)
        }
        QueryMsg::ChainState { chain_id } => query::chain_state(deps.storage, chain_id),
        QueryMsg::ChainStateAll {} => query::chain_state_all(deps.storage),
        QueryMsg::Chains {} => query::chains(deps.storage),
    }
}

/// The migrate entry point for the CosmWasm contract.
/// # Errors
/// Will return an errror if the state version is not newer than the current one.
#[entry_point]
#[allow(clippy::needless_pass_by_value)]
pub fn migrate(
    deps: DepsMut<LightClientQuery>,
    _env: Env,
    _msg: MigrateMsg,
) -> Result<Response, ContractError> {
    cw2::ensure_from_older_version(deps.storage, CONTRACT_NAME, STATE_VERSION)?;

    Ok(Response::default())
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{
        from_json,
        testing::{message_info, mock_env},
    };

    use super::*;
    use crate::{
        msg::{HeaderEnabledChainsResponse, HeaderSupportedChainsResponse},
        test::helpers::{mk_deps, GUARDIAN, OPERATOR},
        types::BlockHeaderVerification,
    };

    #[test]
    fn test_instantiate_and_migrate() {
        let mut deps = mk_deps();
        let creator = deps.api.addr_make("creator");

        let mut verification = BlockHeaderVerification::default();
        verification.enable_chains(&[8332]);
        let msg = InstantiateMsg {
            block_header_verification: Some(verification.clone()),
            ..Default::default()
        };
        let res = instantiate(deps.as_mut(), mock_env(), message_info(&creator, &[]), msg).unwrap();
        assert_eq!(0, res.messages.len());

        let version = cw2::get_contract_version(&deps.storage).unwrap();
        assert_eq!(CONTRACT_NAME, version.contract);
        assert_eq!(STATE_VERSION, version.version);

        let enabled: HeaderEnabledChainsResponse = from_json(
            query(deps.as_ref(), mock_env(), QueryMsg::HeaderEnabledChains {}).unwrap(),
        )
        .unwrap();
        assert_eq!(verification.enabled_chains(), enabled.header_enabled_chains);

        // same version
        migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap();
    }

    #[test]
    fn test_migrate_from_newer_version_fails() {
        let mut deps = mk_deps();
        cw2::set_contract_version(&mut deps.storage, CONTRACT_NAME, "999.0.0").unwrap();

        assert!(migrate(deps.as_mut(), mock_env(), MigrateMsg {}).is_err());
    }

    #[test]
    fn test_governance_through_host_authority() {
        let mut deps = mk_deps();
        let operator = deps.api.addr_make(OPERATOR);
        let guardian = deps.api.addr_make(GUARDIAN);
        let stranger = deps.api.addr_make("stranger");

        let enable = ExecuteMsg::EnableHeaderVerification {
            chain_id_list: vec![1, 8332],
        };
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&guardian, &[]),
            enable.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized { .. }));

        let res = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&operator, &[]),
            enable,
        )
        .unwrap();
        assert_eq!("1,8332", res.attributes[1].value);

        let disable = ExecuteMsg::DisableHeaderVerification {
            chain_id_list: vec![1],
        };
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&stranger, &[]),
            disable.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized { .. }));

        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&guardian, &[]),
            disable,
        )
        .unwrap();

        let supported: HeaderSupportedChainsResponse = from_json(
            query(deps.as_ref(), mock_env(), QueryMsg::HeaderSupportedChains {}).unwrap(),
        )
        .unwrap();
        assert_eq!(2, supported.header_supported_chains.len());

        let enabled: HeaderEnabledChainsResponse = from_json(
            query(deps.as_ref(), mock_env(), QueryMsg::HeaderEnabledChains {}).unwrap(),
        )
        .unwrap();
        assert_eq!(1, enabled.header_enabled_chains.len());
        assert_eq!(8332, enabled.header_enabled_chains[0].chain_id);
    }
}
