//! Mock radio transceiver for testing
//!
//! Behaves like an nRF24L01 at the trait level: a 3-deep receive FIFO that
//! drops frames while full, a pending RX_DR flag raised whenever a frame is
//! queued, and per-pipe settings validated against the chip's ranges.

use crate::platform::{
    error::{PlatformError, RadioError},
    traits::{CrcMode, DataRate, RadioInterface, RadioIrq},
    Result,
};
use heapless::Deque;
use hoprx_core::config::{ADDRESS_WIDTH, PAYLOAD_SIZE};
use std::vec::Vec;

/// Receive FIFO depth
const RX_FIFO_DEPTH: usize = 3;

/// Number of data pipes
const PIPE_COUNT: usize = 6;

/// Largest static payload size
const MAX_PAYLOAD: u8 = 32;

/// Mock radio implementation
#[derive(Debug)]
pub struct MockRadio {
    powered: bool,
    ce: bool,
    receiver: bool,
    crc: CrcMode,
    irq_source: Option<RadioIrq>,
    data_rate: DataRate,
    auto_ack: [bool; PIPE_COUNT],
    address_width: u8,
    payload_size: [u8; PIPE_COUNT],
    rx_address: [u8; ADDRESS_WIDTH],
    channel: u8,
    channel_history: Vec<u8>,
    fifo: Deque<[u8; PAYLOAD_SIZE], RX_FIFO_DEPTH>,
    rx_ready: bool,
    flush_count: u32,
}

impl MockRadio {
    /// Create a radio in its power-on reset state
    pub fn new() -> Self {
        Self {
            powered: false,
            ce: false,
            receiver: false,
            crc: CrcMode::OneByte,
            irq_source: None,
            data_rate: DataRate::Mbps2,
            auto_ack: [true; PIPE_COUNT],
            address_width: 5,
            payload_size: [0; PIPE_COUNT],
            rx_address: [0xE7; ADDRESS_WIDTH],
            channel: 2,
            channel_history: Vec::new(),
            fifo: Deque::new(),
            rx_ready: false,
            flush_count: 0,
        }
    }

    /// Deliver a frame over the air
    ///
    /// Returns `false` if the frame was lost: chip-enable is low, or the
    /// FIFO is already full.
    pub fn push_rx(&mut self, payload: [u8; PAYLOAD_SIZE]) -> bool {
        if !self.ce || self.fifo.push_back(payload).is_err() {
            return false;
        }
        self.rx_ready = true;
        true
    }

    /// Frames waiting in the FIFO
    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    /// Check whether RX_DR is pending
    pub fn rx_ready(&self) -> bool {
        self.rx_ready
    }

    /// Current RF channel
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Every channel programmed since creation, in order
    pub fn channel_history(&self) -> &[u8] {
        &self.channel_history
    }

    /// Forget the channel history
    pub fn clear_channel_history(&mut self) {
        self.channel_history.clear();
    }

    /// Pipe 0 receive address
    pub fn rx_address(&self) -> [u8; ADDRESS_WIDTH] {
        self.rx_address
    }

    /// Check whether chip-enable is high
    pub fn is_listening(&self) -> bool {
        self.ce
    }

    /// Check whether the radio is powered up
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Check whether primary receive mode is selected
    pub fn is_receiver(&self) -> bool {
        self.receiver
    }

    /// Configured CRC length
    pub fn crc(&self) -> CrcMode {
        self.crc
    }

    /// Interrupt condition routed to the IRQ line
    pub fn irq_source(&self) -> Option<RadioIrq> {
        self.irq_source
    }

    /// Configured data rate
    pub fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// Auto-acknowledge setting of `pipe`
    pub fn auto_ack(&self, pipe: u8) -> bool {
        self.auto_ack[pipe as usize]
    }

    /// Configured address width
    pub fn address_width(&self) -> u8 {
        self.address_width
    }

    /// Static payload size of `pipe`
    pub fn payload_size(&self, pipe: u8) -> u8 {
        self.payload_size[pipe as usize]
    }

    /// Number of FIFO flushes
    pub fn flush_count(&self) -> u32 {
        self.flush_count
    }

    fn check_pipe(pipe: u8) -> Result<usize> {
        if (pipe as usize) < PIPE_COUNT {
            Ok(pipe as usize)
        } else {
            Err(PlatformError::Radio(RadioError::InvalidPipe))
        }
    }
}

impl Default for MockRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioInterface for MockRadio {
    fn power_up(&mut self) -> Result<()> {
        self.powered = true;
        Ok(())
    }

    fn set_ce(&mut self) -> Result<()> {
        self.ce = true;
        Ok(())
    }

    fn clear_ce(&mut self) -> Result<()> {
        self.ce = false;
        Ok(())
    }

    fn enable_receiver(&mut self) -> Result<()> {
        self.receiver = true;
        Ok(())
    }

    fn set_crc(&mut self, mode: CrcMode) -> Result<()> {
        self.crc = mode;
        Ok(())
    }

    fn set_irq_source(&mut self, irq: RadioIrq) -> Result<()> {
        self.irq_source = Some(irq);
        Ok(())
    }

    fn set_data_rate(&mut self, rate: DataRate) -> Result<()> {
        self.data_rate = rate;
        Ok(())
    }

    fn set_auto_ack(&mut self, pipe: u8, enabled: bool) -> Result<()> {
        let pipe = Self::check_pipe(pipe)?;
        self.auto_ack[pipe] = enabled;
        Ok(())
    }

    fn set_address_width(&mut self, width: u8) -> Result<()> {
        if !(3..=5).contains(&width) {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }
        self.address_width = width;
        Ok(())
    }

    fn set_payload_size(&mut self, pipe: u8, size: u8) -> Result<()> {
        let pipe = Self::check_pipe(pipe)?;
        if size > MAX_PAYLOAD {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }
        self.payload_size[pipe] = size;
        Ok(())
    }

    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<()> {
        if Self::check_pipe(pipe)? != 0 {
            // Only pipe 0 carries a full address in this receiver
            return Err(PlatformError::Radio(RadioError::InvalidPipe));
        }
        if address.len() != ADDRESS_WIDTH {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }
        self.rx_address.copy_from_slice(address);
        Ok(())
    }

    fn set_channel(&mut self, channel: u8) -> Result<()> {
        self.channel = channel & 0x7f;
        self.channel_history.push(self.channel);
        Ok(())
    }

    fn flush_rx_fifo(&mut self) -> Result<()> {
        self.fifo.clear();
        self.flush_count += 1;
        Ok(())
    }

    fn is_rx_fifo_empty(&mut self) -> Result<bool> {
        Ok(self.fifo.is_empty())
    }

    fn read_payload(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.fifo.pop_front() {
            Some(frame) => {
                let len = buf.len().min(PAYLOAD_SIZE);
                buf[..len].copy_from_slice(&frame[..len]);
                buf[len..].fill(0);
            }
            None => buf.fill(0),
        }
        Ok(())
    }

    fn clear_irq(&mut self, irq: RadioIrq) -> Result<()> {
        if irq == RadioIrq::RxDataReady {
            self.rx_ready = false;
        }
        Ok(())
    }
}
