//! nRF24L01 2.4 GHz Transceiver Driver
//!
//! SPI driver for the Nordic nRF24L01(+) used as a fixed-payload receiver.
//!
//! ## Features
//!
//! - Primary receive mode on pipe 0 with static payload size
//! - 250 kbps / 1 Mbps / 2 Mbps data rates
//! - 1 or 2 byte CRC
//! - Interrupt source masking (only RX_DR routed for this receiver)
//!
//! The chip's configuration registers are write-mostly, so the driver keeps
//! shadow copies of CONFIG, EN_AA, EN_RXADDR and RF_SETUP and only ever
//! writes whole registers.
//!
//! ## Usage
//!
//! ```ignore
//! use hoprx::devices::nrf24l01::Nrf24l01;
//! use hoprx::platform::hal::{HalOutputPin, HalSpi};
//!
//! let radio = Nrf24l01::new(HalSpi::new(spi_device), HalOutputPin::new(ce_pin));
//! ```

mod driver;
pub mod registers;

pub use driver::Nrf24l01;
