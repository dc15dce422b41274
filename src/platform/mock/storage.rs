//! Mock bind storage for testing

use crate::platform::{
    error::{FlashError, PlatformError},
    traits::BindStorage,
    Result,
};
use hoprx_core::config::BIND_RECORD_SIZE;

/// Mock bind storage implementation
///
/// Starts empty (load fails as `Corrupted`, like virgin flash). Saves can be
/// made to fail for error-path tests.
#[derive(Debug, Default)]
pub struct MockStorage {
    record: Option<[u8; BIND_RECORD_SIZE]>,
    fail_saves: bool,
    saves: u32,
}

impl MockStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds `record`
    pub fn with_record(record: [u8; BIND_RECORD_SIZE]) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Stored record, if any
    pub fn stored(&self) -> Option<[u8; BIND_RECORD_SIZE]> {
        self.record
    }

    /// Number of successful saves
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl BindStorage for MockStorage {
    fn load(&mut self, buf: &mut [u8; BIND_RECORD_SIZE]) -> Result<()> {
        let record = self
            .record
            .ok_or(PlatformError::Flash(FlashError::Corrupted))?;
        *buf = record;
        Ok(())
    }

    fn save(&mut self, buf: &[u8; BIND_RECORD_SIZE]) -> Result<()> {
        if self.fail_saves {
            return Err(PlatformError::Flash(FlashError::WriteFailed));
        }
        self.record = Some(*buf);
        self.saves += 1;
        Ok(())
    }
}
