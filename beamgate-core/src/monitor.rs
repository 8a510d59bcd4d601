//! Passage monitor context
//!
//! Owns both beams and the crossing detector. The polling loop holds one
//! `Monitor` and calls [`Monitor::step`] (or [`Monitor::poll`]) once per
//! iteration; nothing else touches the state.

use beamgate_hal::{InputPin, Level, Monotonic};
use beamgate_protocol::StatusMessage;
use heapless::Vec;

use crate::beam::{Beam, Channel};
use crate::config::NodeConfig;
use crate::crossing::{CrossingDetector, Outcome, PassEvent, State};

/// Result of calibrating both beams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationReport {
    pub a_intact_level: Level,
    pub b_intact_level: Level,
    /// Beam A read as broken against its configured polarity
    pub a_obstructed: bool,
    /// Beam B read as broken against its configured polarity
    pub b_obstructed: bool,
}

impl CalibrationReport {
    pub fn all_clear(&self) -> bool {
        !self.a_obstructed && !self.b_obstructed
    }

    /// Status records to send once after calibration, in order
    ///
    /// `node_online` always comes first, followed by one obstruction
    /// record per beam that calibrated as broken.
    pub fn startup_messages(&self) -> Vec<StatusMessage, 3> {
        let mut messages = Vec::new();
        // Capacity covers every variant
        let _ = messages.push(StatusMessage::NodeOnline);
        if self.a_obstructed {
            let _ = messages.push(StatusMessage::BeamAObstructed);
        }
        if self.b_obstructed {
            let _ = messages.push(StatusMessage::BeamBObstructed);
        }
        messages
    }
}

/// Result of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Beam A debounced state changed
    pub a_changed: bool,
    /// Beam B debounced state changed
    pub b_changed: bool,
    pub outcome: Outcome,
}

impl Step {
    pub fn event(&self) -> Option<PassEvent> {
        self.outcome.event()
    }
}

/// Single-owner passage monitoring state
#[derive(Debug, Clone)]
pub struct Monitor {
    beam_a: Beam,
    beam_b: Beam,
    detector: CrossingDetector,
}

impl Monitor {
    /// Calibrate both beams from their first samples
    ///
    /// The detector starts idle.
    pub fn calibrate(
        config: &NodeConfig,
        raw_a: Level,
        raw_b: Level,
        now_ms: u32,
    ) -> (Self, CalibrationReport) {
        let debounce_ms = config.timing.debounce_ms;
        let beam_a = Beam::calibrate(Channel::A, raw_a, now_ms, debounce_ms, config.beam_a.polarity);
        let beam_b = Beam::calibrate(Channel::B, raw_b, now_ms, debounce_ms, config.beam_b.polarity);

        let report = CalibrationReport {
            a_intact_level: beam_a.intact_level(),
            b_intact_level: beam_b.intact_level(),
            a_obstructed: beam_a.is_broken(),
            b_obstructed: beam_b.is_broken(),
        };

        let monitor = Self {
            beam_a,
            beam_b,
            detector: CrossingDetector::new(&config.timing),
        };
        (monitor, report)
    }

    /// Calibrate by reading the pins and clock directly
    pub fn calibrate_from<A, B, C>(
        config: &NodeConfig,
        pin_a: &A,
        pin_b: &B,
        clock: &C,
    ) -> (Self, CalibrationReport)
    where
        A: InputPin,
        B: InputPin,
        C: Monotonic,
    {
        Self::calibrate(config, pin_a.level(), pin_b.level(), clock.now_ms())
    }

    /// Debounce both raw samples, then advance the detector
    pub fn step(&mut self, raw_a: Level, raw_b: Level, now_ms: u32) -> Step {
        let a_changed = self.beam_a.update(raw_a, now_ms);
        let b_changed = self.beam_b.update(raw_b, now_ms);
        let outcome = self.detector.advance(&self.beam_a, &self.beam_b, now_ms);

        Step {
            a_changed,
            b_changed,
            outcome,
        }
    }

    /// Read the pins and clock, then [`step`](Self::step)
    pub fn poll<A, B, C>(&mut self, pin_a: &A, pin_b: &B, clock: &C) -> Step
    where
        A: InputPin,
        B: InputPin,
        C: Monotonic,
    {
        let now_ms = clock.now_ms();
        let a_changed = self.beam_a.sample(pin_a, now_ms);
        let b_changed = self.beam_b.sample(pin_b, now_ms);
        let outcome = self.detector.advance(&self.beam_a, &self.beam_b, now_ms);

        Step {
            a_changed,
            b_changed,
            outcome,
        }
    }

    pub fn state(&self) -> State {
        self.detector.state()
    }

    pub fn events_emitted(&self) -> u32 {
        self.detector.events_emitted()
    }

    pub fn beam_a(&self) -> &Beam {
        &self.beam_a
    }

    pub fn beam_b(&self) -> &Beam {
        &self.beam_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Polarity;
    use beamgate_protocol::Direction;
    use core::cell::Cell;
    use std::vec::Vec;

    /// Simulated doorway: two pins and a clock the test moves by hand
    struct Bench {
        a: Cell<bool>,
        b: Cell<bool>,
        now: Cell<u32>,
    }

    struct PinRef<'a>(&'a Cell<bool>);

    impl InputPin for PinRef<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    impl Monotonic for Bench {
        fn now_ms(&self) -> u32 {
            self.now.get()
        }
    }

    impl Bench {
        /// Receivers wired so that high means intact
        fn new(start_ms: u32) -> Self {
            Self {
                a: Cell::new(true),
                b: Cell::new(true),
                now: Cell::new(start_ms),
            }
        }

        fn calibrate(&self, config: &NodeConfig) -> (Monitor, CalibrationReport) {
            Monitor::calibrate_from(config, &PinRef(&self.a), &PinRef(&self.b), self)
        }

        /// Run the loop every millisecond for `ms` milliseconds
        fn run(&self, monitor: &mut Monitor, ms: u32, events: &mut Vec<PassEvent>) {
            for _ in 0..ms {
                self.now.set(self.now.get().wrapping_add(1));
                let step = monitor.poll(&PinRef(&self.a), &PinRef(&self.b), self);
                events.extend(step.event());
            }
        }

        /// Walk through the door: first beam, both, second beam, clear
        fn walk(&self, monitor: &mut Monitor, first_is_a: bool, events: &mut Vec<PassEvent>) {
            let (first, second) = if first_is_a {
                (&self.a, &self.b)
            } else {
                (&self.b, &self.a)
            };

            first.set(false);
            self.run(monitor, 150, events);
            second.set(false);
            self.run(monitor, 150, events);
            first.set(true);
            self.run(monitor, 150, events);
            second.set(true);
            self.run(monitor, 300, events);
        }
    }

    #[test]
    fn test_walk_a_to_b() {
        let bench = Bench::new(0);
        let (mut monitor, report) = bench.calibrate(&NodeConfig::default());
        assert!(report.all_clear());
        assert_eq!(report.a_intact_level, Level::High);

        let mut events = Vec::new();
        bench.walk(&mut monitor, true, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, Direction::AToB);
        assert_eq!(events[0].seq, 1);
        assert_eq!(monitor.state(), State::Idle);
    }

    #[test]
    fn test_walk_both_ways_counts_up() {
        let bench = Bench::new(1_000);
        let (mut monitor, _) = bench.calibrate(&NodeConfig::default());

        let mut events = Vec::new();
        bench.walk(&mut monitor, true, &mut events);
        bench.walk(&mut monitor, false, &mut events);
        bench.walk(&mut monitor, false, &mut events);

        let dirs: Vec<Direction> = events.iter().map(|e| e.direction).collect();
        assert_eq!(dirs, [Direction::AToB, Direction::BToA, Direction::BToA]);
        let seqs: Vec<u32> = events.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, [1, 2, 3]);
        assert_eq!(monitor.events_emitted(), 3);
    }

    #[test]
    fn test_inverted_wiring_self_calibrates() {
        let bench = Bench::new(0);
        bench.a.set(false);
        bench.b.set(false);
        let (mut monitor, report) = bench.calibrate(&NodeConfig::default());
        assert_eq!(report.a_intact_level, Level::Low);
        assert!(monitor.beam_a().is_intact());
        assert!(monitor.beam_b().is_intact());

        // Broken is now high
        let mut events = Vec::new();
        bench.a.set(true);
        bench.run(&mut monitor, 100, &mut events);
        bench.b.set(true);
        bench.run(&mut monitor, 100, &mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, Direction::AToB);
    }

    #[test]
    fn test_bouncing_single_beam_produces_nothing() {
        let bench = Bench::new(0);
        let (mut monitor, _) = bench.calibrate(&NodeConfig::default());
        let mut events = Vec::new();

        // 5 ms chatter on A, never settles long enough
        for _ in 0..40 {
            bench.a.set(!bench.a.get());
            bench.run(&mut monitor, 5, &mut events);
        }
        // B chatters too
        for _ in 0..40 {
            bench.b.set(!bench.b.get());
            bench.run(&mut monitor, 5, &mut events);
        }

        assert!(events.is_empty());
        assert_eq!(monitor.state(), State::Idle);
    }

    #[test]
    fn test_partial_crossing_abandoned_then_real_crossing() {
        let bench = Bench::new(0);
        let (mut monitor, _) = bench.calibrate(&NodeConfig::default());
        let mut events = Vec::new();

        // Someone leans into A and backs out
        bench.a.set(false);
        bench.run(&mut monitor, 100, &mut events);
        bench.a.set(true);
        bench.run(&mut monitor, 1_000, &mut events);
        assert_eq!(monitor.state(), State::Idle);
        assert!(events.is_empty());

        bench.walk(&mut monitor, false, &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].direction, Direction::BToA);
        assert_eq!(events[0].seq, 1);
    }

    #[test]
    fn test_step_reports_beam_changes() {
        let config = NodeConfig::default();
        let (mut monitor, _) = Monitor::calibrate(&config, Level::High, Level::High, 0);

        let step = monitor.step(Level::Low, Level::High, 10);
        assert!(!step.a_changed);
        let step = monitor.step(Level::Low, Level::High, 35);
        assert!(step.a_changed);
        assert!(!step.b_changed);
        assert_eq!(step.outcome, Outcome::Armed(Channel::A));
    }

    #[test]
    fn test_fixed_polarity_reports_obstruction() {
        let mut config = NodeConfig::default();
        config.beam_b.polarity = Polarity::IntactHigh;

        let (monitor, report) = Monitor::calibrate(&config, Level::High, Level::Low, 0);
        assert!(!report.a_obstructed);
        assert!(report.b_obstructed);
        assert!(!report.all_clear());
        assert!(monitor.beam_b().is_broken());
    }

    #[test]
    fn test_startup_messages_all_clear() {
        let (_, report) = Monitor::calibrate(&NodeConfig::default(), Level::Low, Level::High, 0);
        assert_eq!(report.startup_messages().as_slice(), [StatusMessage::NodeOnline]);
    }

    #[test]
    fn test_startup_messages_both_obstructed() {
        let mut config = NodeConfig::default();
        config.beam_a.polarity = Polarity::IntactHigh;
        config.beam_b.polarity = Polarity::IntactLow;

        let (_, report) = Monitor::calibrate(&config, Level::Low, Level::High, 0);
        assert_eq!(
            report.startup_messages().as_slice(),
            [
                StatusMessage::NodeOnline,
                StatusMessage::BeamAObstructed,
                StatusMessage::BeamBObstructed,
            ]
        );
    }

    #[test]
    fn test_startup_messages_one_obstructed() {
        let mut config = NodeConfig::default();
        config.beam_b.polarity = Polarity::IntactHigh;

        let (_, report) = Monitor::calibrate(&config, Level::High, Level::Low, 0);
        assert_eq!(
            report.startup_messages().as_slice(),
            [StatusMessage::NodeOnline, StatusMessage::BeamBObstructed]
        );
    }

    #[test]
    fn test_crossing_across_clock_wrap() {
        let bench = Bench::new(u32::MAX - 200);
        let (mut monitor, _) = bench.calibrate(&NodeConfig::default());
        let mut events = Vec::new();

        bench.walk(&mut monitor, true, &mut events);
        bench.walk(&mut monitor, true, &mut events);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.direction == Direction::AToB));
        assert!(bench.now.get() < u32::MAX - 200);
    }
}
