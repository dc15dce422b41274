//! Mock SPI implementation for testing

use crate::platform::{traits::SpiInterface, Result};
use core::cell::RefCell;
use std::vec::Vec;

/// SPI transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiTransaction {
    /// Transfer (full-duplex)
    Transfer { write: Vec<u8>, read: Vec<u8> },
    /// Write only
    Write { data: Vec<u8> },
}

/// Mock SPI implementation
///
/// Records all transactions for test verification and allows
/// pre-programming the bytes clocked back by the device.
#[derive(Debug, Default)]
pub struct MockSpi {
    transactions: RefCell<Vec<SpiTransaction>>,
    read_data: RefCell<Vec<u8>>,
}

impl MockSpi {
    /// Create a new mock SPI
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<SpiTransaction> {
        self.transactions.borrow().clone()
    }

    /// Bytes written by every transaction, in order
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.transactions
            .borrow()
            .iter()
            .map(|t| match t {
                SpiTransaction::Transfer { write, .. } => write.clone(),
                SpiTransaction::Write { data } => data.clone(),
            })
            .collect()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.borrow_mut().clear();
    }

    /// Queue data to return for subsequent transfers
    ///
    /// Bytes past the queued data read back as 0x00.
    pub fn set_read_data(&mut self, data: &[u8]) {
        *self.read_data.borrow_mut() = data.to_vec();
    }
}

impl SpiInterface for MockSpi {
    fn transfer_in_place(&mut self, buffer: &mut [u8]) -> Result<()> {
        let write = buffer.to_vec();

        let mut read_data = self.read_data.borrow_mut();
        let to_read = core::cmp::min(buffer.len(), read_data.len());
        buffer[..to_read].copy_from_slice(&read_data[..to_read]);
        buffer[to_read..].fill(0);
        read_data.drain(..to_read);

        self.transactions
            .borrow_mut()
            .push(SpiTransaction::Transfer {
                write,
                read: buffer.to_vec(),
            });

        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.transactions.borrow_mut().push(SpiTransaction::Write {
            data: data.to_vec(),
        });
        Ok(())
    }
}
