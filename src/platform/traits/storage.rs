//! Bind record storage trait

use crate::platform::Result;
use hoprx_core::config::BIND_RECORD_SIZE;

/// Non-volatile home of the bind record
///
/// Both operations are synchronous and all-or-nothing as far as the caller
/// can tell.
pub trait BindStorage {
    /// Read the stored record into `buf`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::Corrupted)` if nothing valid
    /// is stored.
    fn load(&mut self, buf: &mut [u8; BIND_RECORD_SIZE]) -> Result<()>;

    /// Replace the stored record with `buf`
    fn save(&mut self, buf: &[u8; BIND_RECORD_SIZE]) -> Result<()>;
}
