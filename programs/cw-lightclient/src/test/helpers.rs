use std::marker::PhantomData;

use cosmwasm_std::{
    testing::{
        mock_dependencies, MockApi, MockQuerier, MockQuerierCustomHandlerResult, MockStorage,
    },
    to_json_binary, ContractResult, OwnedDeps, SystemResult,
};

use crate::authority::{LightClientQuery, PolicyType};

/// The only member of the operational group
pub const OPERATOR: &str = "operator";
/// The only member of the emergency group
pub const GUARDIAN: &str = "guardian";
/// The only member of the admin group
pub const ADMIN: &str = "admin";

pub fn custom_query_handler(query: &LightClientQuery) -> MockQuerierCustomHandlerResult {
    match query {
        LightClientQuery::IsAuthorized {
            address,
            policy_type,
        } => {
            let member = match policy_type {
                PolicyType::GroupOperational => OPERATOR,
                PolicyType::GroupEmergency => GUARDIAN,
                PolicyType::GroupAdmin => ADMIN,
            };
            let authorized = MockApi::default().addr_make(member).as_str() == address;

            SystemResult::Ok(ContractResult::Ok(to_json_binary(&authorized).unwrap()))
        }
    }
}

pub fn mk_deps(
) -> OwnedDeps<MockStorage, MockApi, MockQuerier<LightClientQuery>, LightClientQuery> {
    let deps = mock_dependencies();

    OwnedDeps {
        storage: deps.storage,
        api: deps.api,
        querier: MockQuerier::<LightClientQuery>::new(&[]).with_custom_handler(custom_query_handler),
        custom_query_type: PhantomData,
    }
}
