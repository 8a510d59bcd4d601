//! Configuration loading and parsing
//!
//! The node configuration is compiled in from `node.toml` and parsed at
//! boot by an allocation-free TOML subset parser.

pub mod toml;

pub use toml::{parse_config, ParseError};
