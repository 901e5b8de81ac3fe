//! Helpers shared by tests of this crate and its dependents.

pub mod fixtures;
