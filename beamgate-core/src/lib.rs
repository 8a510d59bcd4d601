//! Board-agnostic core logic for the passage counter firmware
//!
//! This crate contains everything that does not depend on a specific
//! board:
//!
//! - Beam debouncing and polarity calibration
//! - Directional crossing state machine
//! - The [`Monitor`](monitor::Monitor) context that owns both
//! - Configuration types and validation
//!
//! Nothing here allocates, blocks, or fails. Hardware is reached through
//! the `beamgate-hal` traits.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod beam;
pub mod config;
pub mod crossing;
pub mod monitor;
pub mod time;

pub use beam::{Beam, Channel};
pub use crossing::{CrossingDetector, Outcome, PassEvent, State};
pub use monitor::{CalibrationReport, Monitor, Step};
