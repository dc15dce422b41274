//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the receiver's peripherals.
//! All board-specific code must be isolated behind these traits.

pub mod error;
pub mod hal;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    BindStorage, CrcMode, DataRate, FlashInterface, GpioInterface, HopTimer, Platform,
    RadioInterface, RadioIrq, ServoOutput, SpiInterface,
};
