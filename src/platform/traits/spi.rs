//! SPI interface trait
//!
//! This module defines the SPI bus communication interface that platform implementations must provide.

use crate::platform::Result;

/// SPI interface trait
///
/// Each call is one complete transaction: chip select is asserted before the
/// first byte and released after the last. Register-oriented devices such as
/// the nRF24L01 rely on this to frame commands.
///
/// # Safety Invariants
///
/// - SPI peripheral must be initialized before use
/// - Only one owner per SPI device instance
pub trait SpiInterface {
    /// Transfer data in place (full-duplex)
    ///
    /// Transmits `buffer` and overwrites it with the received bytes.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the transfer fails.
    fn transfer_in_place(&mut self, buffer: &mut [u8]) -> Result<()>;

    /// Write data (transmit only)
    ///
    /// Transmits data and discards received bytes.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the write operation fails.
    fn write(&mut self, data: &[u8]) -> Result<()>;
}
