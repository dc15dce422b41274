//! Mock Flash implementation for testing
//!
//! Provides in-memory Flash simulation for unit tests.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use std::vec::Vec;

/// Erase sector size (1 KB)
const BLOCK_SIZE: u32 = 1024;

/// Flash capacity (16 KB, an LPC812-class part)
const FLASH_CAPACITY: u32 = 16 * 1024;

/// Firmware image region (first 15 KB is write-protected)
const FIRMWARE_SIZE: u32 = 15 * 1024;

/// Mock Flash implementation
///
/// Simulates Flash storage in memory for testing. Supports:
/// - Read/write/erase operations with 1→0 write semantics
/// - Corruption injection for testing error handling
/// - Erase count tracking
/// - Power-loss simulation for reliability testing
///
/// # Example
///
/// ```
/// use hoprx::platform::mock::MockFlash;
/// use hoprx::platform::traits::FlashInterface;
///
/// let mut flash = MockFlash::new();
/// flash.erase(0x3c00, 1024).unwrap();
/// flash.write(0x3c00, b"BND1").unwrap();
///
/// let mut buf = [0u8; 4];
/// flash.read(0x3c00, &mut buf).unwrap();
/// assert_eq!(&buf, b"BND1");
/// assert_eq!(flash.get_erase_count(0x3c00), 1);
/// ```
#[derive(Debug)]
pub struct MockFlash {
    /// Flash storage (initialized to 0xFF - erased state)
    storage: Vec<u8>,
    /// Erase count per block
    erase_counts: Vec<u32>,
    /// Next write only half-completes
    power_loss: bool,
}

impl MockFlash {
    /// Create a new, fully erased mock Flash instance
    pub fn new() -> Self {
        let block_count = (FLASH_CAPACITY / BLOCK_SIZE) as usize;
        Self {
            storage: std::vec![0xFF; FLASH_CAPACITY as usize],
            erase_counts: std::vec![0; block_count],
            power_loss: false,
        }
    }

    /// Get Flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        self.storage[address as usize..(address as usize + len)].to_vec()
    }

    /// Overwrite `len` bytes at `address` with a corrupt pattern
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        for byte in &mut self.storage[address as usize..address as usize + len] {
            *byte = 0xAA;
        }
    }

    /// Number of times the block containing `address` has been erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / BLOCK_SIZE) as usize]
    }

    /// Make the next write only partially complete
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }

    fn is_writable(&self, address: u32, len: u32) -> bool {
        address >= FIRMWARE_SIZE
            && address
                .checked_add(len)
                .is_some_and(|end| end <= FLASH_CAPACITY)
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        let end = address as usize + buf.len();
        if end > FLASH_CAPACITY as usize {
            return Err(FlashError::InvalidAddress.into());
        }

        buf.copy_from_slice(&self.storage[address as usize..end]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        if !self.is_writable(address, data.len() as u32) {
            return Err(FlashError::InvalidAddress.into());
        }

        let write_len = if self.power_loss {
            self.power_loss = false;
            data.len() / 2
        } else {
            data.len()
        };

        // Flash can only change bits from 1→0
        let start = address as usize;
        for (cell, byte) in self.storage[start..start + write_len]
            .iter_mut()
            .zip(data.iter())
        {
            *cell &= *byte;
        }

        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if !self.is_writable(address, size)
            || !address.is_multiple_of(BLOCK_SIZE)
            || !size.is_multiple_of(BLOCK_SIZE)
        {
            return Err(FlashError::InvalidAddress.into());
        }

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);

        let first_block = (address / BLOCK_SIZE) as usize;
        for count in &mut self.erase_counts[first_block..first_block + (size / BLOCK_SIZE) as usize] {
            *count += 1;
        }

        Ok(())
    }

    fn block_size(&self) -> u32 {
        BLOCK_SIZE
    }

    fn capacity(&self) -> u32 {
        FLASH_CAPACITY
    }
}
