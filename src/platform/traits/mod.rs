//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod flash;
pub mod gpio;
pub mod hop_timer;
pub mod platform;
pub mod radio;
pub mod servo;
pub mod spi;
pub mod storage;

// Re-export trait interfaces
pub use flash::FlashInterface;
pub use gpio::GpioInterface;
pub use hop_timer::HopTimer;
pub use platform::Platform;
pub use radio::{CrcMode, DataRate, RadioInterface, RadioIrq};
pub use servo::ServoOutput;
pub use spi::SpiInterface;
pub use storage::BindStorage;
