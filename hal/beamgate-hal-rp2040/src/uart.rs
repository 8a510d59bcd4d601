//! UART uplink adapter
//!
//! Bridges embassy-rp UART transmitters to the `beamgate_hal` sink traits:
//! blocking `embedded_io::Write` to `UartTx`, and async
//! `embedded_io_async::Write` (the buffered, interrupt-driven TX half the
//! firmware uses) to `AsyncUartTx`.

use beamgate_hal::{uart, AsyncUartTx, UartConfig, UartTx};
use embassy_rp::uart::{Config, DataBits, Parity, StopBits};

/// Record sink over a blocking serial transmitter
pub struct UplinkTx<W> {
    inner: W,
}

impl<W> UplinkTx<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: embedded_io::Write> UartTx for UplinkTx<W> {
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

impl<W: embedded_io_async::Write> AsyncUartTx for UplinkTx<W> {
    type Error = W::Error;

    async fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data).await
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush().await
    }
}

/// Translate the board-agnostic UART settings to embassy-rp's
pub fn rp_uart_config(config: &UartConfig) -> Config {
    let mut cfg = Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        uart::DataBits::Seven => DataBits::DataBits7,
        uart::DataBits::Eight => DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        uart::Parity::None => Parity::ParityNone,
        uart::Parity::Even => Parity::ParityEven,
        uart::Parity::Odd => Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        uart::StopBits::One => StopBits::STOP1,
        uart::StopBits::Two => StopBits::STOP2,
    };
    cfg
}
