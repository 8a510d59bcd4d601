//! Settling-time debouncer for one break-beam channel
//!
//! A raw change is only accepted once the input has held the new level for
//! the full debounce interval. Only two levels and one timestamp are kept
//! per channel, no sample history.

use beamgate_hal::{InputPin, Level};

use crate::config::Polarity;
use crate::time::elapsed;

/// Sensor channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    A,
    B,
}

/// One debounced break-beam channel
///
/// Created once by [`Beam::calibrate`] and updated every loop iteration.
/// The broken level is always the complement of the intact level captured
/// at calibration.
#[derive(Debug, Clone)]
pub struct Beam {
    channel: Channel,
    /// Level that means "unobstructed"
    intact_level: Level,
    /// Debounced level
    stable: Level,
    /// Most recent raw sample
    last_raw: Level,
    /// Time of the most recent raw change
    last_change_ms: u32,
    debounce_ms: u32,
}

impl Beam {
    /// Calibrate a beam from its first raw sample
    ///
    /// With [`Polarity::Auto`] the sampled level is taken as intact, so the
    /// beam must be unobstructed at boot. A fixed polarity takes the intact
    /// level from configuration instead; if the sample disagrees the beam
    /// starts out broken and [`Beam::is_broken`] reports it.
    pub fn calibrate(
        channel: Channel,
        raw: Level,
        now_ms: u32,
        debounce_ms: u32,
        polarity: Polarity,
    ) -> Self {
        let intact_level = match polarity {
            Polarity::Auto => raw,
            Polarity::IntactHigh => Level::High,
            Polarity::IntactLow => Level::Low,
        };

        Self {
            channel,
            intact_level,
            stable: raw,
            last_raw: raw,
            last_change_ms: now_ms,
            debounce_ms,
        }
    }

    /// Feed one raw sample
    ///
    /// Returns `true` when the debounced level changed on this call. At most
    /// one change is reported per debounce window, however fast the input
    /// bounces.
    pub fn update(&mut self, raw: Level, now_ms: u32) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_change_ms = now_ms;
        }

        if elapsed(now_ms, self.last_change_ms) >= self.debounce_ms && self.stable != self.last_raw
        {
            self.stable = self.last_raw;
            return true;
        }

        false
    }

    /// Read the pin and feed the sample
    pub fn sample<P: InputPin>(&mut self, pin: &P, now_ms: u32) -> bool {
        self.update(pin.level(), now_ms)
    }

    /// Beam is obstructed (debounced)
    pub fn is_broken(&self) -> bool {
        self.stable == self.broken_level()
    }

    /// Beam is unobstructed (debounced)
    pub fn is_intact(&self) -> bool {
        self.stable == self.intact_level
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn intact_level(&self) -> Level {
        self.intact_level
    }

    pub fn broken_level(&self) -> Level {
        self.intact_level.complement()
    }

    /// Current debounced level
    pub fn stable_level(&self) -> Level {
        self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;
    use std::vec::Vec;

    const DEBOUNCE_MS: u32 = 25;

    fn auto_beam(raw: Level, now_ms: u32) -> Beam {
        Beam::calibrate(Channel::A, raw, now_ms, DEBOUNCE_MS, Polarity::Auto)
    }

    #[test]
    fn test_calibration_either_polarity() {
        for raw in [Level::Low, Level::High] {
            let beam = auto_beam(raw, 0);
            assert!(beam.is_intact());
            assert!(!beam.is_broken());
            assert_eq!(beam.intact_level(), raw);
            assert_eq!(beam.broken_level(), raw.complement());
        }
    }

    #[test]
    fn test_fixed_polarity_detects_obstruction() {
        let beam = Beam::calibrate(Channel::B, Level::Low, 0, DEBOUNCE_MS, Polarity::IntactHigh);
        assert!(beam.is_broken());
        assert_eq!(beam.intact_level(), Level::High);

        let beam = Beam::calibrate(Channel::B, Level::High, 0, DEBOUNCE_MS, Polarity::IntactHigh);
        assert!(beam.is_intact());
    }

    #[test]
    fn test_change_needs_full_interval() {
        let mut beam = auto_beam(Level::High, 0);

        assert!(!beam.update(Level::Low, 100));
        assert!(!beam.update(Level::Low, 124));
        assert!(beam.is_intact());

        assert!(beam.update(Level::Low, 125));
        assert!(beam.is_broken());

        // Reported once
        assert!(!beam.update(Level::Low, 200));
        assert!(beam.is_broken());
    }

    #[test]
    fn test_bounce_restarts_window() {
        let mut beam = auto_beam(Level::High, 0);

        assert!(!beam.update(Level::Low, 100));
        assert!(!beam.update(Level::High, 110));
        assert!(!beam.update(Level::Low, 120));
        // 25 ms after 100 but only 20 after the last edge
        assert!(!beam.update(Level::Low, 140));
        assert!(beam.update(Level::Low, 145));
    }

    #[test]
    fn test_glitch_shorter_than_interval_is_ignored() {
        let mut beam = auto_beam(Level::High, 0);

        assert!(!beam.update(Level::Low, 100));
        assert!(!beam.update(Level::High, 105));
        assert!(!beam.update(Level::High, 200));
        assert!(beam.is_intact());
    }

    #[test]
    fn test_debounce_across_clock_wrap() {
        let start = u32::MAX - 10;
        let mut beam = auto_beam(Level::High, start);

        assert!(!beam.update(Level::Low, start + 5));
        assert!(!beam.update(Level::Low, 5));
        assert!(beam.update(Level::Low, 19));
        assert!(beam.is_broken());
    }

    #[test]
    fn test_sample_reads_pin() {
        struct Pin(Cell<bool>);
        impl InputPin for Pin {
            fn is_high(&self) -> bool {
                self.0.get()
            }
        }

        let pin = Pin(Cell::new(false));
        let mut beam = auto_beam(pin.level(), 0);
        pin.0.set(true);

        assert!(!beam.sample(&pin, 10));
        assert!(beam.sample(&pin, 35));
        assert!(beam.is_broken());
    }

    fn level_strategy() -> impl Strategy<Value = Level> {
        any::<bool>().prop_map(Level::from)
    }

    proptest! {
        #[test]
        fn stable_changes_at_most_once_per_interval(
            debounce_ms in 1u32..100,
            initial in level_strategy(),
            samples in proptest::collection::vec((0u32..40, level_strategy()), 1..200),
        ) {
            let mut beam = Beam::calibrate(Channel::A, initial, 0, debounce_ms, Polarity::Auto);
            let mut now = 0u32;
            let mut commits: Vec<u32> = Vec::new();

            for (dt, raw) in samples {
                now += dt;
                if beam.update(raw, now) {
                    commits.push(now);
                }
            }

            for pair in commits.windows(2) {
                prop_assert!(pair[1] - pair[0] >= debounce_ms);
            }
        }

        #[test]
        fn stable_converges_after_hold(
            debounce_ms in 1u32..100,
            initial in level_strategy(),
            samples in proptest::collection::vec((0u32..40, level_strategy()), 0..100),
            last in level_strategy(),
            extra_hold in 0u32..50,
        ) {
            let mut beam = Beam::calibrate(Channel::B, initial, 0, debounce_ms, Polarity::Auto);
            let mut now = 0u32;

            for (dt, raw) in samples {
                now += dt;
                beam.update(raw, now);
            }

            now += 1;
            beam.update(last, now);
            now += debounce_ms + extra_hold;
            beam.update(last, now);

            prop_assert_eq!(beam.stable_level(), last);
        }
    }
}
