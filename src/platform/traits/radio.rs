//! Radio transceiver interface trait
//!
//! The receiver only ever listens: it programs an address and a channel,
//! raises chip-enable, and drains fixed-size frames from the receive FIFO.

use crate::platform::Result;

/// On-air CRC length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrcMode {
    /// No CRC
    Disabled,
    /// 1-byte CRC
    OneByte,
    /// 2-byte CRC
    TwoBytes,
}

/// On-air data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// 250 kbps
    Kbps250,
    /// 1 Mbps
    Mbps1,
    /// 2 Mbps
    Mbps2,
}

/// Radio interrupt conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioIrq {
    /// Data ready in the receive FIFO
    RxDataReady,
    /// Transmit complete
    TxDataSent,
    /// Maximum retransmits reached
    MaxRetransmits,
}

/// Radio transceiver interface
///
/// # Errors
///
/// Every operation returns `PlatformError::Spi` when the bus fails and
/// `PlatformError::Radio` when a setting is outside the transceiver's range.
pub trait RadioInterface {
    /// Enable the radio's clock and power it up
    fn power_up(&mut self) -> Result<()>;

    /// Raise chip-enable (start listening)
    fn set_ce(&mut self) -> Result<()>;

    /// Lower chip-enable (stop listening)
    fn clear_ce(&mut self) -> Result<()>;

    /// Put the radio in primary receive mode
    fn enable_receiver(&mut self) -> Result<()>;

    /// Select the on-air CRC length
    fn set_crc(&mut self, mode: CrcMode) -> Result<()>;

    /// Route only `irq` to the interrupt line
    fn set_irq_source(&mut self, irq: RadioIrq) -> Result<()>;

    /// Select the on-air data rate
    fn set_data_rate(&mut self, rate: DataRate) -> Result<()>;

    /// Enable or disable auto-acknowledge on `pipe`
    fn set_auto_ack(&mut self, pipe: u8, enabled: bool) -> Result<()>;

    /// Set the address width in bytes
    fn set_address_width(&mut self, width: u8) -> Result<()>;

    /// Set the static payload size of `pipe`
    fn set_payload_size(&mut self, pipe: u8, size: u8) -> Result<()>;

    /// Set the receive address of `pipe`
    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<()>;

    /// Tune to RF `channel`
    fn set_channel(&mut self, channel: u8) -> Result<()>;

    /// Discard everything in the receive FIFO
    fn flush_rx_fifo(&mut self) -> Result<()>;

    /// Check whether the receive FIFO is empty
    fn is_rx_fifo_empty(&mut self) -> Result<bool>;

    /// Pop one frame from the receive FIFO into `buf`
    fn read_payload(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Acknowledge the interrupt condition `irq`
    fn clear_irq(&mut self, irq: RadioIrq) -> Result<()>;
}
