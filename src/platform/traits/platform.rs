//! Root platform trait
//!
//! This module defines the root Platform trait that aggregates all peripheral interfaces.

use super::{BindStorage, GpioInterface, HopTimer, RadioInterface, ServoOutput};

/// Root platform trait
///
/// This trait aggregates the receiver's peripherals. Implementations provide
/// concrete types for each peripheral via associated types, enabling
/// zero-cost abstractions through compile-time dispatch.
///
/// # Example
///
/// ```ignore
/// pub struct Lpc812Board {
///     radio: Nrf24l01<HalSpi<SpiDev>, HalOutputPin<CePin>>,
///     // ...
/// }
///
/// impl Platform for Lpc812Board {
///     type Radio = Nrf24l01<HalSpi<SpiDev>, HalOutputPin<CePin>>;
///     // ... other associated types
///
///     fn radio(&mut self) -> &mut Self::Radio {
///         &mut self.radio
///     }
///
///     fn enter_bootloader(&mut self) -> ! {
///         // Hand over to the ROM ISP routine
///     }
/// }
/// ```
pub trait Platform {
    /// Radio transceiver
    type Radio: RadioInterface;

    /// Servo pulse outputs
    type Servo: ServoOutput;

    /// Hop pacing timer
    type HopTimer: HopTimer;

    /// Bind record storage
    type Storage: BindStorage;

    /// Status LED pin
    type Led: GpioInterface;

    /// Bind button pin
    type Button: GpioInterface;

    /// Get the radio
    fn radio(&mut self) -> &mut Self::Radio;

    /// Get the servo outputs
    fn servo(&mut self) -> &mut Self::Servo;

    /// Get the hop timer
    fn hop_timer(&mut self) -> &mut Self::HopTimer;

    /// Get the bind storage
    fn storage(&mut self) -> &mut Self::Storage;

    /// Get the status LED pin
    fn status_led(&mut self) -> &mut Self::Led;

    /// Get the bind button pin
    fn bind_button(&mut self) -> &mut Self::Button;

    /// Jump to the in-system-programming bootloader
    ///
    /// Diverges: no further code in this program executes.
    fn enter_bootloader(&mut self) -> !;
}
