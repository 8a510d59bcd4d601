//! Beamgate Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the passage-detection core
//! consumes. Chip-specific crates (currently RP2040) implement them, and
//! host tests implement them with plain structs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  beamgate-firmware                      │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌──────────────────┐   ┌──────────────────┐
//! │  beamgate-core   │──▶│  beamgate-hal    │
//! └──────────────────┘   │  (this crate)    │
//!                        └──────────────────┘
//!                                 ▲
//!                        ┌──────────────────┐
//!                        │ beamgate-hal-    │
//!                        │    rp2040        │
//!                        └──────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Raw break-beam level
//! - [`time::Monotonic`] - Wrapping millisecond clock
//! - [`uart::UartTx`] / [`uart::AsyncUartTx`] - Line-oriented record sink

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level};
pub use time::Monotonic;
pub use uart::{AsyncUartTx, UartConfig, UartTx};
