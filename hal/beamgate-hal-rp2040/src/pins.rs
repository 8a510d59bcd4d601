//! Runtime pin allocation for config-driven beam inputs
//!
//! Beam pins come from `node.toml`, so they are taken by number at runtime
//! instead of by peripheral name at compile time.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_0, UART0};
use embassy_rp::{Peri, Peripherals};

use beamgate_core::config::GPIO_COUNT;

/// GPIO used for the record uplink TX (UART0)
pub const UPLINK_TX_PIN: u8 = 0;

/// GPIO left to UART0 RX; the uplink is transmit-only but the pin is kept free
pub const UPLINK_RX_PIN: u8 = 1;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for the uplink UART
    Reserved,
}

/// Peripherals the uplink needs, split off before the pin bank is built
pub struct UplinkPeripherals {
    pub uart: Peri<'static, UART0>,
    pub tx_pin: Peri<'static, PIN_0>,
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Split the peripherals into the uplink UART and a bank of free pins
    pub fn split(p: Peripherals) -> (Self, UplinkPeripherals) {
        let uplink = UplinkPeripherals {
            uart: p.UART0,
            tx_pin: p.PIN_0,
        };

        let bank = Self {
            pins: [
                None, // UART0 uplink
                None, // UART0 uplink
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };

        (bank, uplink)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if is_reserved(pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        pin_num < GPIO_COUNT && self.pins[pin_num as usize].is_some()
    }
}

/// Pins held back for the uplink UART
pub fn is_reserved(pin_num: u8) -> bool {
    pin_num == UPLINK_TX_PIN || pin_num == UPLINK_RX_PIN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uplink_pins_reserved() {
        assert!(is_reserved(0));
        assert!(is_reserved(1));
        assert!(!is_reserved(4));
        assert!(!is_reserved(16));
    }
}
