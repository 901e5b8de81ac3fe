//! Chain descriptions and lookups over the built-in registry plus caller-supplied chains.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CHAINS;

/// The family a chain belongs to, which decides its header and proof formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChainKind {
    /// Ethereum and other chains using its header, transaction and trie formats
    Evm,
    /// Bitcoin and its test networks
    Bitcoin,
    /// Anything else; never header supported
    Other,
}

/// An external chain the light client knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Chain {
    /// The chain ID
    pub chain_id: i64,
    /// Human readable name
    pub name: String,
    /// The chain family
    pub kind: ChainKind,
    /// Whether block headers of this chain can be stored and proved against
    pub header_supported: bool,
}

impl Chain {
    /// Whether the chain is an EVM chain.
    #[must_use]
    pub fn is_evm(&self) -> bool {
        self.kind == ChainKind::Evm
    }

    /// Whether the chain is a Bitcoin chain.
    #[must_use]
    pub fn is_bitcoin(&self) -> bool {
        self.kind == ChainKind::Bitcoin
    }
}

/// Every known chain: the built-in presets followed by `additional_chains`.
///
/// An additional chain with the ID of a preset replaces the preset.
#[must_use]
pub fn chain_list(additional_chains: &[Chain]) -> Vec<Chain> {
    DEFAULT_CHAINS
        .iter()
        .filter(|preset| {
            !additional_chains
                .iter()
                .any(|c| c.chain_id == preset.chain_id)
        })
        .map(Chain::from)
        .chain(additional_chains.iter().cloned())
        .collect()
}

/// Looks up a chain by ID. Additional chains take precedence over the presets.
#[must_use]
pub fn get_chain(chain_id: i64, additional_chains: &[Chain]) -> Option<Chain> {
    additional_chains
        .iter()
        .find(|c| c.chain_id == chain_id)
        .cloned()
        .or_else(|| {
            DEFAULT_CHAINS
                .iter()
                .find(|preset| preset.chain_id == chain_id)
                .map(Chain::from)
        })
}

/// Whether `chain_id` is a known EVM chain.
#[must_use]
pub fn is_evm_chain(chain_id: i64, additional_chains: &[Chain]) -> bool {
    get_chain(chain_id, additional_chains).is_some_and(|c| c.is_evm())
}

/// Whether `chain_id` is a known Bitcoin chain.
#[must_use]
pub fn is_bitcoin_chain(chain_id: i64, additional_chains: &[Chain]) -> bool {
    get_chain(chain_id, additional_chains).is_some_and(|c| c.is_bitcoin())
}

/// Whether block headers of `chain_id` are accepted.
#[must_use]
pub fn is_header_supported_chain(chain_id: i64, additional_chains: &[Chain]) -> bool {
    get_chain(chain_id, additional_chains).is_some_and(|c| c.header_supported)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::config::{BITCOIN_MAINNET, ETHEREUM_MAINNET, POLYGON_MAINNET};

    fn custom(chain_id: i64, kind: ChainKind, header_supported: bool) -> Chain {
        Chain {
            chain_id,
            name: format!("custom_{chain_id}"),
            kind,
            header_supported,
        }
    }

    #[rstest]
    #[case(ETHEREUM_MAINNET.chain_id, true, false, true)]
    #[case(BITCOIN_MAINNET.chain_id, false, true, true)]
    #[case(POLYGON_MAINNET.chain_id, true, false, false)]
    #[case(7000, false, false, false)]
    #[case(424_242, false, false, false)]
    fn test_preset_lookups(
        #[case] chain_id: i64,
        #[case] evm: bool,
        #[case] bitcoin: bool,
        #[case] header_supported: bool,
    ) {
        assert_eq!(evm, is_evm_chain(chain_id, &[]));
        assert_eq!(bitcoin, is_bitcoin_chain(chain_id, &[]));
        assert_eq!(header_supported, is_header_supported_chain(chain_id, &[]));
    }

    #[test]
    fn test_additional_chain_is_found() {
        let extra = [custom(424_242, ChainKind::Evm, true)];

        assert!(get_chain(424_242, &[]).is_none());
        assert_eq!(Some(extra[0].clone()), get_chain(424_242, &extra));
        assert!(is_evm_chain(424_242, &extra));
        assert!(is_header_supported_chain(424_242, &extra));
    }

    #[test]
    fn test_additional_chain_overrides_preset() {
        let extra = [custom(POLYGON_MAINNET.chain_id, ChainKind::Evm, true)];

        assert!(is_header_supported_chain(POLYGON_MAINNET.chain_id, &extra));

        let all = chain_list(&extra);
        assert_eq!(DEFAULT_CHAINS.len(), all.len());
        assert_eq!(
            1,
            all.iter()
                .filter(|c| c.chain_id == POLYGON_MAINNET.chain_id)
                .count()
        );
    }

    #[test]
    fn test_chain_json() {
        let chain = Chain::from(&BITCOIN_MAINNET);
        let json = serde_json::to_string(&chain).unwrap();

        assert_eq!(
            r#"{"chain_id":8332,"name":"btc_mainnet","kind":"bitcoin","header_supported":true}"#,
            json
        );
        assert_eq!(chain, serde_json::from_str(&json).unwrap());
    }
}
