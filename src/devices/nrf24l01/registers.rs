//! nRF24L01 register map

use bitflags::bitflags;

// =============================================================================
// SPI commands
// =============================================================================

/// Read register (OR with register address)
pub const R_REGISTER: u8 = 0x00;
/// Write register (OR with register address)
pub const W_REGISTER: u8 = 0x20;
/// Register address bits of a register command
pub const REGISTER_MASK: u8 = 0x1F;
/// Pop one payload from the RX FIFO
pub const R_RX_PAYLOAD: u8 = 0x61;
/// Flush the RX FIFO
pub const FLUSH_RX: u8 = 0xE2;
/// No operation; clocks out STATUS
pub const NOP: u8 = 0xFF;

// =============================================================================
// Registers
// =============================================================================

pub const CONFIG: u8 = 0x00;
pub const EN_AA: u8 = 0x01;
pub const EN_RXADDR: u8 = 0x02;
pub const SETUP_AW: u8 = 0x03;
pub const RF_CH: u8 = 0x05;
pub const RF_SETUP: u8 = 0x06;
pub const STATUS: u8 = 0x07;
pub const RX_ADDR_P0: u8 = 0x0A;
pub const RX_PW_P0: u8 = 0x11;
pub const FIFO_STATUS: u8 = 0x17;

/// Number of data pipes
pub const PIPE_COUNT: u8 = 6;

/// Largest static payload size
pub const MAX_PAYLOAD_SIZE: u8 = 32;

/// RF_CH channel bits
pub const RF_CH_MASK: u8 = 0x7F;

/// EN_AA power-on value (auto-ack on all pipes)
pub const EN_AA_RESET: u8 = 0x3F;

/// EN_RXADDR power-on value (pipes 0 and 1)
pub const EN_RXADDR_RESET: u8 = 0x03;

bitflags! {
    /// CONFIG register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Config: u8 {
        /// Mask RX_DR from the IRQ pin
        const MASK_RX_DR = 0x40;
        /// Mask TX_DS from the IRQ pin
        const MASK_TX_DS = 0x20;
        /// Mask MAX_RT from the IRQ pin
        const MASK_MAX_RT = 0x10;
        /// Enable CRC
        const EN_CRC = 0x08;
        /// CRC encoding scheme: set = 2 bytes
        const CRCO = 0x04;
        /// Power up
        const PWR_UP = 0x02;
        /// Primary receiver
        const PRIM_RX = 0x01;

        /// All interrupt mask bits
        const MASK_ALL = Self::MASK_RX_DR.bits() | Self::MASK_TX_DS.bits() | Self::MASK_MAX_RT.bits();
    }
}

impl Config {
    /// Power-on value
    pub const RESET: Self = Self::EN_CRC;
}

bitflags! {
    /// STATUS register interrupt bits (write 1 to clear)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// Data ready in the RX FIFO
        const RX_DR = 0x40;
        /// Data sent
        const TX_DS = 0x20;
        /// Maximum retransmits
        const MAX_RT = 0x10;
    }
}

bitflags! {
    /// RF_SETUP register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RfSetup: u8 {
        /// 250 kbps (overrides RF_DR_HIGH)
        const RF_DR_LOW = 0x20;
        /// 2 Mbps
        const RF_DR_HIGH = 0x08;
        /// Output power bits
        const RF_PWR = 0x06;
    }
}

impl RfSetup {
    /// Power-on value: 2 Mbps, 0 dBm
    pub const RESET: Self = Self::RF_DR_HIGH.union(Self::RF_PWR);
}

bitflags! {
    /// FIFO_STATUS register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FifoStatus: u8 {
        /// TX FIFO full
        const TX_FULL = 0x20;
        /// TX FIFO empty
        const TX_EMPTY = 0x10;
        /// RX FIFO full
        const RX_FULL = 0x02;
        /// RX FIFO empty
        const RX_EMPTY = 0x01;
    }
}
