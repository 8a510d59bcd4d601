//! Break-beam channels
//!
//! Turns a raw, possibly bouncing input level into a stable intact/broken
//! state.

pub mod debounce;

pub use debounce::{Beam, Channel};
