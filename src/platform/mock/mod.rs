//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use hoprx::platform::mock::MockPlatform;
//! use hoprx::platform::traits::{Platform, RadioInterface};
//!
//! let mut platform = MockPlatform::new();
//! platform.radio().set_channel(0x51).unwrap();
//! assert_eq!(platform.radio.channel(), 0x51);
//! ```

#![cfg(any(test, feature = "mock"))]

mod flash;
mod gpio;
mod hop_timer;
mod platform;
mod radio;
mod servo;
mod spi;
mod storage;

pub use flash::MockFlash;
pub use gpio::MockGpio;
pub use hop_timer::MockHopTimer;
pub use platform::MockPlatform;
pub use radio::MockRadio;
pub use servo::MockServo;
pub use spi::{MockSpi, SpiTransaction};
pub use storage::MockStorage;
