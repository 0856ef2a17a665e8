//! Shared building blocks for the recall workspace: logging bootstrap,
//! runtime directory helpers and small wire types reused by several crates.

pub mod types;
pub mod utils;
pub mod env;
