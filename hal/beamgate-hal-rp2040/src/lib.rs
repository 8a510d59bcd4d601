//! RP2040-specific HAL for the passage counter firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `beamgate-hal` traits, plus RP2040-specific plumbing:
//!
//! - Runtime pin allocation for config-driven beam inputs
//! - Break-beam inputs (implements `beamgate_hal::InputPin`)
//! - Millisecond clock on top of `embassy-time` (implements `beamgate_hal::Monotonic`)
//! - UART uplink adapter (implements `beamgate_hal::UartTx` and `AsyncUartTx`)

#![no_std]

pub mod clock;
pub mod gpio;
pub mod pins;
pub mod uart;

// Re-export shared traits from beamgate-hal for convenience
pub use beamgate_hal::{AsyncUartTx, InputPin, Monotonic, UartTx};
