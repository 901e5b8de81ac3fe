//! This module contains the custom `CosmWasm` query used to check governance policies.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, CustomQuery, QuerierWrapper, QueryRequest, StdResult};

use crate::ContractError;

/// The custom query answered by the host chain.
#[cw_serde]
#[allow(clippy::module_name_repetitions)]
pub enum LightClientQuery {
    /// Whether `address` is a member of the `policy_type` group
    IsAuthorized {
        /// The address to check
        address: String,
        /// The policy group
        policy_type: PolicyType,
    },
}

impl CustomQuery for LightClientQuery {}

/// The policy groups of the host's authority module.
#[cw_serde]
#[derive(Copy)]
pub enum PolicyType {
    /// May pause things. Required to disable verification
    GroupEmergency,
    /// May operate the protocol. Required to enable verification
    GroupOperational,
    /// Protocol administrators
    GroupAdmin,
}

/// A yes/no oracle for policy membership.
pub trait Authority {
    /// Whether `address` belongs to the `policy` group.
    /// # Errors
    /// Returns an error if the oracle cannot be reached.
    fn is_authorized(&self, address: &Addr, policy: PolicyType) -> StdResult<bool>;
}

/// The [`Authority`] reached through [`LightClientQuery`].
pub struct AuthorityKeeper<'a> {
    /// The `CosmWasm` querier
    pub querier: QuerierWrapper<'a, LightClientQuery>,
}

impl Authority for AuthorityKeeper<'_> {
    fn is_authorized(&self, address: &Addr, policy: PolicyType) -> StdResult<bool> {
        let request = QueryRequest::Custom(LightClientQuery::IsAuthorized {
            address: address.to_string(),
            policy_type: policy,
        });

        self.querier.query(&request)
    }
}

/// Fails unless `sender` belongs to the `policy` group.
/// # Errors
/// Returns [`ContractError::Unauthorized`] if it does not, or the query error.
pub fn check_authorization(
    authority: &impl Authority,
    sender: &Addr,
    policy: PolicyType,
) -> Result<(), ContractError> {
    if authority.is_authorized(sender, policy)? {
        return Ok(());
    }

    tracing::warn!(%sender, ?policy, "unauthorized governance message");
    Err(ContractError::Unauthorized {
        sender: sender.to_string(),
        policy,
    })
}
