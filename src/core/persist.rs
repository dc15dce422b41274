//! Bind record persistence on raw flash
//!
//! The record lives in a single slot at the start of a dedicated erase
//! block:
//!
//! | Offset | Size | Content                                  |
//! |--------|------|------------------------------------------|
//! | 0      | 4    | Magic `"BND1"`                           |
//! | 4      | 25   | Bind record (address, hop channels)      |
//! | 29     | 3    | Padding (0xFF)                           |
//! | 32     | 4    | CRC-32/ISO-HDLC of bytes 0..32, LE       |
//!
//! Erased flash fails the magic check, so a virgin part loads as
//! `FlashError::Corrupted` and the receiver falls back to an unbound record.

use crc::{Crc, CRC_32_ISO_HDLC};

use crate::platform::{
    error::{FlashError, PlatformError},
    traits::{BindStorage, FlashInterface},
    Result,
};
use hoprx_core::config::BIND_RECORD_SIZE;

/// Slot magic (ASCII "BND1")
pub const SLOT_MAGIC: [u8; 4] = *b"BND1";

/// Bytes covered by the CRC
const SLOT_BODY_SIZE: usize = 32;

/// Full slot size including CRC
pub const SLOT_SIZE: usize = SLOT_BODY_SIZE + 4;

const RECORD_OFFSET: usize = SLOT_MAGIC.len();

/// CRC32 algorithm (ISO HDLC / Ethernet / ZIP)
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Bind storage on a dedicated flash block
pub struct FlashBindStorage<F> {
    flash: F,
    address: u32,
}

impl<F: FlashInterface> FlashBindStorage<F> {
    /// Use the erase block at `address`
    ///
    /// # Errors
    ///
    /// Returns `FlashError::InvalidAddress` if `address` is not block-aligned
    /// or the slot does not fit in the part.
    pub fn new(flash: F, address: u32) -> Result<Self> {
        let fits = address
            .checked_add(SLOT_SIZE as u32)
            .is_some_and(|end| end <= flash.capacity());
        if !fits || address % flash.block_size() != 0 {
            return Err(PlatformError::Flash(FlashError::InvalidAddress));
        }
        Ok(Self { flash, address })
    }

    /// Borrow the underlying flash
    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Release the underlying flash
    pub fn release(self) -> F {
        self.flash
    }
}

fn encode_slot(record: &[u8; BIND_RECORD_SIZE]) -> [u8; SLOT_SIZE] {
    let mut slot = [0xFF; SLOT_SIZE];
    slot[..RECORD_OFFSET].copy_from_slice(&SLOT_MAGIC);
    slot[RECORD_OFFSET..RECORD_OFFSET + BIND_RECORD_SIZE].copy_from_slice(record);

    let crc = CRC32.checksum(&slot[..SLOT_BODY_SIZE]);
    slot[SLOT_BODY_SIZE..].copy_from_slice(&crc.to_le_bytes());
    slot
}

fn decode_slot(slot: &[u8; SLOT_SIZE], record: &mut [u8; BIND_RECORD_SIZE]) -> Result<()> {
    if slot[..RECORD_OFFSET] != SLOT_MAGIC {
        return Err(PlatformError::Flash(FlashError::Corrupted));
    }

    let mut stored = [0u8; 4];
    stored.copy_from_slice(&slot[SLOT_BODY_SIZE..]);
    if CRC32.checksum(&slot[..SLOT_BODY_SIZE]) != u32::from_le_bytes(stored) {
        return Err(PlatformError::Flash(FlashError::Corrupted));
    }

    record.copy_from_slice(&slot[RECORD_OFFSET..RECORD_OFFSET + BIND_RECORD_SIZE]);
    Ok(())
}

impl<F: FlashInterface> BindStorage for FlashBindStorage<F> {
    fn load(&mut self, buf: &mut [u8; BIND_RECORD_SIZE]) -> Result<()> {
        let mut slot = [0u8; SLOT_SIZE];
        self.flash.read(self.address, &mut slot)?;
        decode_slot(&slot, buf)
    }

    fn save(&mut self, buf: &[u8; BIND_RECORD_SIZE]) -> Result<()> {
        let slot = encode_slot(buf);
        let block = self.flash.block_size();
        self.flash.erase(self.address, block)?;
        self.flash.write(self.address, &slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockFlash;

    const SLOT: u32 = 0x3c00;

    fn record() -> [u8; BIND_RECORD_SIZE] {
        core::array::from_fn(|i| i as u8 + 1)
    }

    #[test]
    fn test_virgin_flash_is_corrupted() {
        let mut storage = FlashBindStorage::new(MockFlash::new(), SLOT).unwrap();
        let mut buf = [0u8; BIND_RECORD_SIZE];
        assert_eq!(
            storage.load(&mut buf),
            Err(PlatformError::Flash(FlashError::Corrupted))
        );
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = FlashBindStorage::new(MockFlash::new(), SLOT).unwrap();
        storage.save(&record()).unwrap();

        let mut buf = [0u8; BIND_RECORD_SIZE];
        storage.load(&mut buf).unwrap();
        assert_eq!(buf, record());

        let raw = storage.flash().get_contents(SLOT, SLOT_SIZE);
        assert_eq!(&raw[..4], b"BND1");
        assert_eq!(&raw[29..32], &[0xFF; 3]);
    }

    #[test]
    fn test_resave_erases_first() {
        let mut storage = FlashBindStorage::new(MockFlash::new(), SLOT).unwrap();
        storage.save(&[0x00; BIND_RECORD_SIZE]).unwrap();
        storage.save(&record()).unwrap();

        let mut buf = [0u8; BIND_RECORD_SIZE];
        storage.load(&mut buf).unwrap();
        assert_eq!(buf, record());
        assert_eq!(storage.flash().get_erase_count(SLOT), 2);
    }

    #[test]
    fn test_corruption_detected() {
        let mut storage = FlashBindStorage::new(MockFlash::new(), SLOT).unwrap();
        storage.save(&record()).unwrap();

        let mut flash = storage.release();
        flash.inject_corruption(SLOT + 10, 1);
        let mut storage = FlashBindStorage::new(flash, SLOT).unwrap();

        let mut buf = [0u8; BIND_RECORD_SIZE];
        assert_eq!(
            storage.load(&mut buf),
            Err(PlatformError::Flash(FlashError::Corrupted))
        );
    }

    #[test]
    fn test_torn_write_detected() {
        let mut flash = MockFlash::new();
        flash.simulate_power_loss();
        let mut storage = FlashBindStorage::new(flash, SLOT).unwrap();
        storage.save(&record()).unwrap();

        let mut buf = [0u8; BIND_RECORD_SIZE];
        assert!(storage.load(&mut buf).is_err());
    }

    #[test]
    fn test_rejects_unaligned_slot() {
        assert!(FlashBindStorage::new(MockFlash::new(), SLOT + 4).is_err());
        assert!(FlashBindStorage::new(MockFlash::new(), 16 * 1024).is_err());
    }
}
