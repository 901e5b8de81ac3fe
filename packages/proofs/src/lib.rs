#![doc = include_str!("../README.md")]
#![deny(clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

mod error;
pub mod header;
pub mod proof;
pub mod types;

pub use error::ProofError;
pub use header::{HeaderData, BITCOIN_HEADER_LEN, MAX_TIME_DRIFT};
pub use proof::{BitcoinProof, Proof};
pub use types::{BlockHeader, ChainState};
