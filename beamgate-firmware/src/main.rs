//! Beamgate - Doorway Passage Counter Firmware
//!
//! Two break-beam sensors across a doorway. Each crossing is reported as
//! one JSON line on UART0 with its direction (A2B or B2A) and a sequence
//! number.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use beamgate_core::config::{BeamConfig, NodeConfig};
use beamgate_hal_rp2040::gpio::BeamPin;
use beamgate_hal_rp2040::pins::PinBank;
use beamgate_hal_rp2040::uart::{rp_uart_config, UplinkTx};

use crate::config::parse_config;

/// Embedded node configuration (compiled into firmware)
/// Edit node.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../node.toml");

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cell for the UART buffer (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Configuration must live forever for task references
static NODE_CONFIG: StaticCell<NodeConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Beamgate firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let (mut bank, uplink) = PinBank::split(p);
    info!("Peripherals initialized");

    let mut config = load_config();

    // Reserved uplink pins pass config validation; the bank refuses them
    if !bank.is_available(config.beam_a.pin.pin) || !bank.is_available(config.beam_b.pin.pin) {
        error!(
            "Beam pins gpio{} / gpio{} unavailable, using defaults",
            config.beam_a.pin.pin, config.beam_b.pin.pin
        );
        config = NodeConfig::default();
    }

    let config: &'static NodeConfig = NODE_CONFIG.init(config);
    info!(
        "Node {} beams A=gpio{} B=gpio{} @ {} baud",
        config.node_id.as_str(),
        config.beam_a.pin.pin,
        config.beam_b.pin.pin,
        config.uplink.baudrate
    );

    // Setup UART for the record uplink (TX only, interrupt-driven)
    let uart_config = rp_uart_config(&config.uplink.uart_config());
    let tx_buf = TX_BUF.init([0u8; 256]);
    let tx = BufferedUartTx::new(uplink.uart, Irqs, uplink.tx_pin, tx_buf, uart_config);
    let tx = UplinkTx::new(tx);
    info!("UART initialized for record uplink");

    let pin_a = take_beam(&mut bank, &config.beam_a);
    let pin_b = take_beam(&mut bank, &config.beam_b);
    let (Some(pin_a), Some(pin_b)) = (pin_a, pin_b) else {
        core::panic!("Beam pins could not be configured");
    };

    spawner
        .spawn(tasks::uplink_task(config.node_id.as_str(), tx))
        .unwrap();
    spawner
        .spawn(tasks::monitor_task(config, pin_a, pin_b))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> NodeConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded");
            config
        }
        Err(e) => {
            error!("Config parse error: {:?}, using defaults", e);
            NodeConfig::default()
        }
    }
}

fn take_beam(bank: &mut PinBank, beam: &BeamConfig) -> Option<BeamPin> {
    match bank.take(beam.pin.pin) {
        Ok(pin) => Some(BeamPin::new(pin, &beam.pin)),
        Err(e) => {
            error!("Cannot take gpio{}: {:?}", beam.pin.pin, e);
            None
        }
    }
}
