//! Break-beam input pins

use beamgate_core::config::{PinConfig, GPIO_COUNT};
use beamgate_hal::InputPin;
use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::Peri;

/// A break-beam receiver input
pub struct BeamPin {
    input: Input<'static>,
}

impl BeamPin {
    /// Configure a pin taken from the [`PinBank`](crate::pins::PinBank)
    pub fn new(pin: Peri<'static, AnyPin>, config: &PinConfig) -> Self {
        let pull = if config.pull_up { Pull::Up } else { Pull::None };
        Self {
            input: Input::new(pin, pull),
        }
    }
}

impl InputPin for BeamPin {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio4" -> pin 4, no pull
/// - "^gpio4" -> pin 4 with internal pull-up
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let s = s.trim();

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if pin >= GPIO_COUNT {
        return None;
    }

    Some(PinConfig { pin, pull_up })
}
