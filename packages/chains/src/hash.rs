//! Conversion of block hash strings into the bytes headers are stored under.

use core::str::FromStr;

use bitcoin::{hashes::Hash, BlockHash};
use lightclient_utils::ensure;

use crate::{chain::get_chain, chain::Chain, chain::ChainKind, error::ChainError};

/// Parses the chain specific string form of a block hash.
///
/// EVM hashes are 32 bytes of hex with an optional `0x` prefix. Bitcoin hashes use the byte-reversed
/// display form and are returned in internal byte order, the order the header itself hashes to.
/// # Errors
/// Returns an error if the chain is unknown, is neither EVM nor Bitcoin, or `hash` does not parse.
pub fn string_to_hash(
    chain_id: i64,
    hash: &str,
    additional_chains: &[Chain],
) -> Result<Vec<u8>, ChainError> {
    let chain = get_chain(chain_id, additional_chains).ok_or(ChainError::ChainNotFound(chain_id))?;
    let invalid = |reason: String| ChainError::InvalidBlockHash {
        chain_id,
        hash: hash.to_string(),
        reason,
    };

    match chain.kind {
        ChainKind::Evm => {
            let bytes = hex::decode(hash.strip_prefix("0x").unwrap_or(hash))
                .map_err(|e| invalid(e.to_string()))?;
            ensure!(
                bytes.len() == 32,
                invalid(format!("expected 32 bytes, got {}", bytes.len()))
            );
            Ok(bytes)
        }
        ChainKind::Bitcoin => BlockHash::from_str(hash)
            .map(|h| h.to_byte_array().to_vec())
            .map_err(|e| invalid(e.to_string())),
        ChainKind::Other => Err(ChainError::UnsupportedChainKind(chain_id)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::string_to_hash;
    use crate::{
        config::{BITCOIN_MAINNET, ETHEREUM_MAINNET, ZETA_MAINNET},
        error::ChainError,
    };

    const GENESIS_DISPLAY: &str =
        "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";

    #[rstest]
    #[case("0x000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f")]
    #[case(GENESIS_DISPLAY)]
    fn test_evm_hash(#[case] hash: &str) {
        let bytes = string_to_hash(ETHEREUM_MAINNET.chain_id, hash, &[]).unwrap();
        assert_eq!(hex::decode(GENESIS_DISPLAY).unwrap(), bytes);
    }

    #[rstest]
    #[case("0x1234")]
    #[case("zz00000000000000000000000000000000000000000000000000000000000000")]
    #[case("")]
    fn test_invalid_evm_hash(#[case] hash: &str) {
        let err = string_to_hash(ETHEREUM_MAINNET.chain_id, hash, &[]).unwrap_err();
        assert!(matches!(err, ChainError::InvalidBlockHash { chain_id: 1, .. }));
    }

    #[test]
    fn test_bitcoin_hash_is_reversed() {
        let bytes = string_to_hash(BITCOIN_MAINNET.chain_id, GENESIS_DISPLAY, &[]).unwrap();

        let mut expected = hex::decode(GENESIS_DISPLAY).unwrap();
        expected.reverse();
        assert_eq!(expected, bytes);
        assert_eq!(0x6f, bytes[0]);
    }

    #[test]
    fn test_invalid_bitcoin_hash() {
        let err = string_to_hash(BITCOIN_MAINNET.chain_id, "0x1234", &[]).unwrap_err();
        assert!(matches!(err, ChainError::InvalidBlockHash { chain_id: 8332, .. }));
    }

    #[test]
    fn test_unsupported_chains() {
        assert_eq!(
            Err(ChainError::UnsupportedChainKind(ZETA_MAINNET.chain_id)),
            string_to_hash(ZETA_MAINNET.chain_id, GENESIS_DISPLAY, &[])
        );
        assert_eq!(
            Err(ChainError::ChainNotFound(424_242)),
            string_to_hash(424_242, GENESIS_DISPLAY, &[])
        );
    }
}
