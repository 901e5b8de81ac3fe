//! This module contains the governance message handlers.

use cosmwasm_std::{Addr, Response, Storage};
use lightclient_chains::{is_header_supported_chain, Chain};
use lightclient_utils::ensure;

use crate::{
    authority::{check_authorization, Authority, PolicyType},
    state::{get_additional_chains, get_block_header_verification, set_block_header_verification},
    ContractError,
};

/// The maximum number of chain IDs in one governance message
pub const MAX_CHAIN_ID_LIST_LENGTH: usize = 200;

/// Rejects empty or oversized lists and chains that do not support headers.
/// # Errors
/// Returns a request validation error for the first problem found.
pub fn validate_chain_id_list(
    chain_id_list: &[i64],
    additional_chains: &[Chain],
) -> Result<(), ContractError> {
    ensure!(!chain_id_list.is_empty(), ContractError::EmptyChainIdList);
    ensure!(
        chain_id_list.len() <= MAX_CHAIN_ID_LIST_LENGTH,
        ContractError::ChainIdListTooLong {
            len: chain_id_list.len(),
            max: MAX_CHAIN_ID_LIST_LENGTH,
        }
    );
    if let Some(&chain_id) = chain_id_list
        .iter()
        .find(|&&id| !is_header_supported_chain(id, additional_chains))
    {
        return Err(ContractError::ChainNotSupported(chain_id));
    }
    Ok(())
}

/// Enables header verification for `chain_id_list`.
/// # Errors
/// Returns an error if the list is invalid or `sender` is not in the operational group.
pub fn enable_header_verification(
    storage: &mut dyn Storage,
    authority: &impl Authority,
    sender: &Addr,
    chain_id_list: &[i64],
) -> Result<Response, ContractError> {
    update_header_verification(
        storage,
        authority,
        sender,
        chain_id_list,
        PolicyType::GroupOperational,
        true,
    )?;

    Ok(Response::new()
        .add_attribute("action", "enable_header_verification")
        .add_attribute("chain_id_list", join(chain_id_list)))
}

/// Disables header verification for `chain_id_list`.
/// # Errors
/// Returns an error if the list is invalid or `sender` is not in the emergency group.
pub fn disable_header_verification(
    storage: &mut dyn Storage,
    authority: &impl Authority,
    sender: &Addr,
    chain_id_list: &[i64],
) -> Result<Response, ContractError> {
    update_header_verification(
        storage,
        authority,
        sender,
        chain_id_list,
        PolicyType::GroupEmergency,
        false,
    )?;

    Ok(Response::new()
        .add_attribute("action", "disable_header_verification")
        .add_attribute("chain_id_list", join(chain_id_list)))
}

fn update_header_verification(
    storage: &mut dyn Storage,
    authority: &impl Authority,
    sender: &Addr,
    chain_id_list: &[i64],
    policy: PolicyType,
    enabled: bool,
) -> Result<(), ContractError> {
    validate_chain_id_list(chain_id_list, &get_additional_chains(storage)?)?;
    check_authorization(authority, sender, policy)?;

    let mut verification = get_block_header_verification(storage)?.unwrap_or_default();
    if enabled {
        verification.enable_chains(chain_id_list);
    } else {
        verification.disable_chains(chain_id_list);
    }
    set_block_header_verification(storage, &verification)?;

    tracing::info!(
        %sender,
        enabled,
        chain_ids = %join(chain_id_list),
        "header verification updated"
    );
    Ok(())
}

fn join(chain_id_list: &[i64]) -> String {
    chain_id_list
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{testing::MockStorage, Addr, StdResult};
    use lightclient_chains::{
        config::{BITCOIN_MAINNET, ETHEREUM_MAINNET, POLYGON_MAINNET},
        Chain, ChainKind,
    };
    use rstest::rstest;

    use super::*;
    use crate::{
        state::set_additional_chains,
        types::{BlockHeaderVerification, HeaderSupportedChain},
    };

    const ETH: i64 = ETHEREUM_MAINNET.chain_id;
    const BTC: i64 = BITCOIN_MAINNET.chain_id;

    /// Authorizes `operator` for the operational group and `guardian` for the emergency group.
    struct Groups;

    impl Authority for Groups {
        fn is_authorized(&self, address: &Addr, policy: PolicyType) -> StdResult<bool> {
            Ok(matches!(
                (address.as_str(), policy),
                ("operator", PolicyType::GroupOperational) | ("guardian", PolicyType::GroupEmergency)
            ))
        }
    }

    fn flags(storage: &MockStorage) -> Vec<HeaderSupportedChain> {
        get_block_header_verification(storage)
            .unwrap()
            .unwrap_or_default()
            .header_supported_chains
    }

    #[test]
    fn test_enable_and_disable() {
        let mut storage = MockStorage::new();
        let operator = Addr::unchecked("operator");
        let guardian = Addr::unchecked("guardian");

        let res =
            enable_header_verification(&mut storage, &Groups, &operator, &[ETH, BTC]).unwrap();
        assert_eq!("1,8332", res.attributes[1].value);
        assert_eq!(
            vec![
                HeaderSupportedChain {
                    chain_id: ETH,
                    enabled: true
                },
                HeaderSupportedChain {
                    chain_id: BTC,
                    enabled: true
                },
            ],
            flags(&storage)
        );

        disable_header_verification(&mut storage, &Groups, &guardian, &[BTC]).unwrap();
        let verification = get_block_header_verification(&storage).unwrap().unwrap();
        assert!(verification.is_chain_enabled(ETH));
        assert!(!verification.is_chain_enabled(BTC));
    }

    #[test]
    fn test_idempotent() {
        let mut storage = MockStorage::new();
        let operator = Addr::unchecked("operator");
        let guardian = Addr::unchecked("guardian");

        enable_header_verification(&mut storage, &Groups, &operator, &[ETH]).unwrap();
        let once = flags(&storage);
        enable_header_verification(&mut storage, &Groups, &operator, &[ETH]).unwrap();
        assert_eq!(once, flags(&storage));

        disable_header_verification(&mut storage, &Groups, &guardian, &[BTC]).unwrap();
        let once = flags(&storage);
        disable_header_verification(&mut storage, &Groups, &guardian, &[BTC]).unwrap();
        assert_eq!(once, flags(&storage));
    }

    #[rstest]
    #[case("guardian", true)]
    #[case("operator", false)]
    #[case("nobody", false)]
    fn test_unauthorized_has_no_effect(#[case] sender: &str, #[case] enable: bool) {
        let mut storage = MockStorage::new();
        let sender = Addr::unchecked(sender);

        let res = if enable {
            enable_header_verification(&mut storage, &Groups, &sender, &[ETH])
        } else {
            disable_header_verification(&mut storage, &Groups, &sender, &[ETH])
        };

        assert!(matches!(res, Err(ContractError::Unauthorized { .. })));
        assert_eq!(None, get_block_header_verification(&storage).unwrap());
    }

    #[test]
    fn test_list_validation_precedes_authorization() {
        let mut storage = MockStorage::new();
        let nobody = Addr::unchecked("nobody");

        let err = enable_header_verification(&mut storage, &Groups, &nobody, &[]).unwrap_err();
        assert!(matches!(err, ContractError::EmptyChainIdList));
        assert!(err.is_request_error());

        let too_long = vec![ETH; MAX_CHAIN_ID_LIST_LENGTH + 1];
        let err =
            disable_header_verification(&mut storage, &Groups, &nobody, &too_long).unwrap_err();
        assert!(matches!(
            err,
            ContractError::ChainIdListTooLong { len: 201, max: 200 }
        ));

        let list = [ETH, POLYGON_MAINNET.chain_id];
        let err = enable_header_verification(&mut storage, &Groups, &nobody, &list).unwrap_err();
        assert!(matches!(err, ContractError::ChainNotSupported(137)));
    }

    #[test]
    fn test_max_length_list_is_accepted() {
        let mut storage = MockStorage::new();
        let operator = Addr::unchecked("operator");
        let list = vec![ETH; MAX_CHAIN_ID_LIST_LENGTH];

        enable_header_verification(&mut storage, &Groups, &operator, &list).unwrap();
        assert_eq!(1, flags(&storage).len());
    }

    #[test]
    fn test_additional_chains_can_be_enabled() {
        let mut storage = MockStorage::new();
        let operator = Addr::unchecked("operator");
        set_additional_chains(
            &mut storage,
            &[Chain {
                chain_id: 424_242,
                name: "devnet".to_string(),
                kind: ChainKind::Evm,
                header_supported: true,
            }],
        )
        .unwrap();

        enable_header_verification(&mut storage, &Groups, &operator, &[424_242]).unwrap();
        assert!(get_block_header_verification(&storage)
            .unwrap()
            .is_some_and(|v: BlockHeaderVerification| v.is_chain_enabled(424_242)));
    }
}
