//! Configuration type definitions

use heapless::String;

use beamgate_hal::UartConfig;
use beamgate_protocol::is_valid_node_id;

pub use beamgate_protocol::MAX_NODE_ID_LEN;

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Default node identifier
pub const DEFAULT_NODE_ID: &str = "door_01";

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Node id empty, too long, or not `[A-Za-z0-9_.-]`
    InvalidNodeId,
    /// Pin number outside the GPIO range
    InvalidPin,
    /// Both beams assigned to the same pin
    DuplicatePin,
    /// Timing values that make the detector unusable
    InvalidTiming,
    /// Zero baud rate
    InvalidBaudrate,
}

/// How the intact level of a beam is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Whatever the input reads at boot is intact (beam must be clear)
    #[default]
    Auto,
    /// Input reads high when the beam is intact
    IntactHigh,
    /// Input reads low when the beam is intact
    IntactLow,
}

/// GPIO pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO number
    pub pin: u8,
    /// Enable the internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn pulled_up(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }
}

/// One break-beam input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeamConfig {
    pub pin: PinConfig,
    pub polarity: Polarity,
}

impl BeamConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin: PinConfig::pulled_up(pin),
            polarity: Polarity::Auto,
        }
    }
}

/// Detector timing, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Raw level must hold this long before it is accepted
    pub debounce_ms: u32,
    /// Maximum time between first and second beam break
    pub sequence_timeout_ms: u32,
    /// Both beams must stay intact this long before re-arming
    pub restore_stable_ms: u32,
    /// Wait after configuring the inputs before sampling for calibration
    pub settle_ms: u32,
    /// Wait after bringing up the uplink before the first record
    pub startup_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 25,
            sequence_timeout_ms: 900,
            restore_stable_ms: 120,
            settle_ms: 10,
            startup_delay_ms: 200,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 || self.restore_stable_ms == 0 {
            return Err(ConfigError::InvalidTiming);
        }
        // A timeout shorter than the debounce could never see the second beam
        if self.sequence_timeout_ms <= self.debounce_ms {
            return Err(ConfigError::InvalidTiming);
        }
        Ok(())
    }
}

/// Record uplink settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UplinkConfig {
    pub baudrate: u32,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self { baudrate: 115200 }
    }
}

impl UplinkConfig {
    pub fn uart_config(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }
}

/// Complete node configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeConfig {
    /// Identifier reported in every pass record
    pub node_id: String<MAX_NODE_ID_LEN>,
    pub beam_a: BeamConfig,
    pub beam_b: BeamConfig,
    pub timing: TimingConfig,
    pub uplink: UplinkConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let mut node_id = String::new();
        let _ = node_id.push_str(DEFAULT_NODE_ID);

        Self {
            node_id,
            beam_a: BeamConfig::new(4),
            beam_b: BeamConfig::new(16),
            timing: TimingConfig::default(),
            uplink: UplinkConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_node_id(&self.node_id) {
            return Err(ConfigError::InvalidNodeId);
        }

        for beam in [&self.beam_a, &self.beam_b] {
            if beam.pin.pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin);
            }
        }
        if self.beam_a.pin.pin == self.beam_b.pin.pin {
            return Err(ConfigError::DuplicatePin);
        }

        self.timing.validate()?;

        if self.uplink.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NodeConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.node_id.as_str(), "door_01");
        assert_eq!(config.beam_a.pin.pin, 4);
        assert_eq!(config.beam_b.pin.pin, 16);
        assert_eq!(config.timing.debounce_ms, 25);
        assert_eq!(config.timing.sequence_timeout_ms, 900);
        assert_eq!(config.timing.restore_stable_ms, 120);
        assert_eq!(config.uplink.uart_config().baudrate, 115200);
    }

    #[test]
    fn test_rejects_bad_node_id() {
        let mut config = NodeConfig::default();
        config.node_id.clear();
        assert_eq!(config.validate(), Err(ConfigError::InvalidNodeId));

        let _ = config.node_id.push_str("door 1");
        assert_eq!(config.validate(), Err(ConfigError::InvalidNodeId));
    }

    #[test]
    fn test_rejects_pin_conflicts() {
        let mut config = NodeConfig::default();
        config.beam_b.pin.pin = 4;
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin));

        config.beam_b.pin.pin = 30;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPin));
    }

    #[test]
    fn test_rejects_bad_timing() {
        let mut config = NodeConfig::default();
        config.timing.debounce_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));

        config.timing = TimingConfig {
            sequence_timeout_ms: 20,
            ..TimingConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));

        config.timing = TimingConfig {
            restore_stable_ms: 0,
            ..TimingConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));
    }

    #[test]
    fn test_rejects_zero_baudrate() {
        let mut config = NodeConfig::default();
        config.uplink.baudrate = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBaudrate));
    }
}
