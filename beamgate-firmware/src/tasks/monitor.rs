//! Passage monitor task
//!
//! Calibrates both beams once, then polls them every millisecond and
//! forwards status and pass records to the uplink task.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use beamgate_core::config::NodeConfig;
use beamgate_core::{Monitor, Outcome, Step};
use beamgate_hal_rp2040::clock::EmbassyClock;
use beamgate_hal_rp2040::gpio::BeamPin;

use crate::channels::{Outbound, RECORD_CHANNEL};

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 1;

/// Monitor task - owns the beams and the crossing detector
#[embassy_executor::task]
pub async fn monitor_task(config: &'static NodeConfig, pin_a: BeamPin, pin_b: BeamPin) {
    info!("Monitor task started");

    let clock = EmbassyClock;

    // Let the serial link and the receivers settle before sampling
    Timer::after(Duration::from_millis(config.timing.startup_delay_ms as u64)).await;
    Timer::after(Duration::from_millis(config.timing.settle_ms as u64)).await;

    let (mut monitor, report) = Monitor::calibrate_from(config, &pin_a, &pin_b, &clock);
    info!(
        "Calibrated: A intact={} B intact={}",
        report.a_intact_level, report.b_intact_level
    );

    if report.a_obstructed {
        warn!("Beam A obstructed at boot");
    }
    if report.b_obstructed {
        warn!("Beam B obstructed at boot");
    }

    for msg in report.startup_messages() {
        RECORD_CHANNEL.send(Outbound::Status(msg)).await;
    }

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        let step = monitor.poll(&pin_a, &pin_b, &clock);
        log_step(&monitor, &step);

        if let Some(event) = step.event() {
            RECORD_CHANNEL.send(Outbound::Pass(event)).await;
        }

        ticker.next().await;
    }
}

fn log_step(monitor: &Monitor, step: &Step) {
    if step.a_changed {
        let beam = monitor.beam_a();
        debug!("Beam A level={} broken={}", beam.stable_level(), beam.is_broken());
    }
    if step.b_changed {
        let beam = monitor.beam_b();
        debug!("Beam B level={} broken={}", beam.stable_level(), beam.is_broken());
    }

    match step.outcome {
        Outcome::None => {}
        Outcome::Armed(channel) => debug!("Armed by {}", channel),
        Outcome::Abandoned(channel) => debug!("Crossing from {} timed out", channel),
        Outcome::Pass(event) => info!(
            "Pass {} seq={} at {}ms",
            event.direction.token(),
            event.seq,
            event.ms
        ),
        Outcome::Rearmed => debug!("Re-armed"),
    }
}
