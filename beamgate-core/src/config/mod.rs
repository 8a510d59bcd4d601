//! Configuration types
//!
//! Board-agnostic node configuration. The firmware fills these from
//! `node.toml`; defaults match the reference doorway installation.

pub mod types;

pub use types::*;
