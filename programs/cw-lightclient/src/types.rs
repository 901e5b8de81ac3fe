//! The per-chain verification flags.

use cosmwasm_schema::cw_serde;

/// Whether headers and proofs of one chain are accepted.
#[cw_serde]
pub struct HeaderSupportedChain {
    /// The chain ID
    pub chain_id: i64,
    /// Whether verification is enabled
    pub enabled: bool,
}

/// The verification flags of every chain ever configured, unique by chain ID.
#[cw_serde]
#[derive(Default)]
pub struct BlockHeaderVerification {
    /// The flags, in the order chains were first configured
    pub header_supported_chains: Vec<HeaderSupportedChain>,
}

impl BlockHeaderVerification {
    /// Enables every chain in `chain_ids`, appending chains seen for the first time.
    pub fn enable_chains(&mut self, chain_ids: &[i64]) {
        self.set_enabled(chain_ids, true);
    }

    /// Disables every chain in `chain_ids`, appending chains seen for the first time.
    pub fn disable_chains(&mut self, chain_ids: &[i64]) {
        self.set_enabled(chain_ids, false);
    }

    fn set_enabled(&mut self, chain_ids: &[i64], enabled: bool) {
        for &chain_id in chain_ids {
            match self
                .header_supported_chains
                .iter_mut()
                .find(|c| c.chain_id == chain_id)
            {
                Some(chain) => chain.enabled = enabled,
                None => self
                    .header_supported_chains
                    .push(HeaderSupportedChain { chain_id, enabled }),
            }
        }
    }

    /// Whether verification is enabled for `chain_id`. Unknown chains are disabled.
    #[must_use]
    pub fn is_chain_enabled(&self, chain_id: i64) -> bool {
        self.header_supported_chains
            .iter()
            .any(|c| c.chain_id == chain_id && c.enabled)
    }

    /// The enabled chains only.
    #[must_use]
    pub fn enabled_chains(&self) -> Vec<HeaderSupportedChain> {
        self.header_supported_chains
            .iter()
            .filter(|c| c.enabled)
            .cloned()
            .collect()
    }
}
