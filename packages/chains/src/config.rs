//! The built-in chain presets.

use crate::chain::{Chain, ChainKind};

/// A chain known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainPreset {
    /// The chain ID
    pub chain_id: i64,
    /// Human readable name
    pub name: &'static str,
    /// The chain family
    pub kind: ChainKind,
    /// Whether block headers are accepted
    pub header_supported: bool,
}

impl From<&ChainPreset> for Chain {
    fn from(preset: &ChainPreset) -> Self {
        Self {
            chain_id: preset.chain_id,
            name: preset.name.to_string(),
            kind: preset.kind,
            header_supported: preset.header_supported,
        }
    }
}

macro_rules! presets {
    ($($(#[$meta:meta])* $ident:ident = ($id:literal, $name:literal, $kind:ident, $supported:literal);)*) => {
        $(
            $(#[$meta])*
            pub const $ident: ChainPreset = ChainPreset {
                chain_id: $id,
                name: $name,
                kind: ChainKind::$kind,
                header_supported: $supported,
            };
        )*

        /// Every built-in preset, in declaration order.
        pub const DEFAULT_CHAINS: &[ChainPreset] = &[$($ident),*];
    };
}

presets! {
    /// Ethereum mainnet
    ETHEREUM_MAINNET = (1, "eth_mainnet", Evm, true);
    /// Goerli testnet
    GOERLI_TESTNET = (5, "goerli_testnet", Evm, true);
    /// Sepolia testnet
    SEPOLIA_TESTNET = (11_155_111, "sepolia_testnet", Evm, true);
    /// Local Ethereum devnet
    GOERLI_LOCALNET = (1337, "goerli_localnet", Evm, true);
    /// BNB smart chain mainnet
    BSC_MAINNET = (56, "bsc_mainnet", Evm, true);
    /// BNB smart chain testnet
    BSC_TESTNET = (97, "bsc_testnet", Evm, true);
    /// Polygon mainnet
    POLYGON_MAINNET = (137, "polygon_mainnet", Evm, false);
    /// Polygon Amoy testnet
    AMOY_TESTNET = (80_002, "amoy_testnet", Evm, false);
    /// Base mainnet
    BASE_MAINNET = (8453, "base_mainnet", Evm, false);
    /// Base Sepolia testnet
    BASE_SEPOLIA = (84_532, "base_sepolia", Evm, false);
    /// Bitcoin mainnet
    BITCOIN_MAINNET = (8332, "btc_mainnet", Bitcoin, true);
    /// Bitcoin testnet3
    BITCOIN_TESTNET = (18332, "btc_testnet", Bitcoin, true);
    /// Bitcoin signet
    BITCOIN_SIGNET = (18333, "btc_signet_testnet", Bitcoin, true);
    /// Bitcoin testnet4
    BITCOIN_TESTNET4 = (18334, "btc_testnet4", Bitcoin, true);
    /// Bitcoin regtest
    BITCOIN_REGTEST = (18444, "btc_regtest", Bitcoin, true);
    /// The protocol chain itself
    ZETA_MAINNET = (7000, "zeta_mainnet", Other, false);
    /// Solana mainnet
    SOLANA_MAINNET = (900, "solana_mainnet", Other, false);
}
