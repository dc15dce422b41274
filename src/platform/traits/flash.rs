//! Flash interface trait

use crate::platform::Result;

/// Raw flash access
///
/// Writes can only clear bits; a region must be erased (to 0xFF) before it
/// is rewritten. Erase operates on whole blocks of `block_size()` bytes.
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Program `data` starting at `address`
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at the block-aligned `address`
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Erase block size in bytes
    fn block_size(&self) -> u32;

    /// Total flash capacity in bytes
    fn capacity(&self) -> u32;
}
