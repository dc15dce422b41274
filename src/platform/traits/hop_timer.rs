//! Hop timer trait

use crate::platform::Result;

/// Free-running match timer that paces channel hops
///
/// The timer counts microseconds up from the programmed count, raises the
/// hop interrupt on reaching the reload value and restarts from zero.
pub trait HopTimer {
    /// Halt counting
    fn stop(&mut self) -> Result<()>;

    /// Resume counting
    fn start(&mut self) -> Result<()>;

    /// Load the current count
    fn set_count(&mut self, count: u32) -> Result<()>;

    /// Load the match/reload value
    fn set_reload(&mut self, reload: u32) -> Result<()>;
}
