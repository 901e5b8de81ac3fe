#![doc = include_str!("../README.md")]
#![deny(
    clippy::nursery,
    clippy::pedantic,
    warnings,
    missing_docs,
    unused_crate_dependencies
)]

pub mod authority;
pub mod contract;
mod error;
pub mod execute;
pub mod instantiate;
pub mod msg;
pub mod query;
pub mod state;
pub mod sudo;
pub mod types;
pub mod verification;

pub use error::ContractError;

#[cfg(test)]
mod test;
