#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

pub mod chain;
pub mod config;
mod error;
pub mod hash;

pub use chain::{
    chain_list, get_chain, is_bitcoin_chain, is_evm_chain, is_header_supported_chain, Chain,
    ChainKind,
};
pub use error::ChainError;
pub use hash::string_to_hash;
