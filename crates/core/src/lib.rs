//! hoprx_core - Pure no_std state machines for the hoprx receiver
//!
//! This crate contains the protocol and timing logic of a frequency-hopping
//! RC receiver. Nothing in here touches hardware: every component takes the
//! inputs it needs (a payload, a sampled button level, a countdown) and
//! returns what the caller should do with the peripherals.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No std library dependencies, no heap
//! - **Fixed-size buffers**: Every frame and record has a compile-time size
//! - **Hardware-free**: Effects are returned as values and applied by the dispatcher
//!
//! # Modules
//!
//! - [`config`]: Protocol constants and tick-derived timing
//! - [`timer`]: Saturating tick countdowns
//! - [`frame`]: Radio payload validation and frame decoding
//! - [`bind`]: Bind record and the over-the-air bind handshake
//! - [`hop`]: Hop sequence tracking and hop-timer programming values
//! - [`failsafe`]: Failsafe profile and activation guard
//! - [`led`]: Status LED state machine
//! - [`button`]: Bind button debounce and bootloader trigger
//! - [`error`]: Decoding and configuration errors

#![no_std]

pub mod bind;
pub mod button;
pub mod config;
pub mod error;
pub mod failsafe;
pub mod frame;
pub mod hop;
pub mod led;
pub mod timer;

pub use bind::{BindProgress, BindRecord, BindSession, BindStage};
pub use button::{BindButton, ButtonEvent};
pub use config::{ReceiverConfig, Timing};
pub use error::{ConfigError, DecodeError};
pub use failsafe::{ChannelOutputs, FailsafeController, FailsafeProfile};
pub use frame::{FailsafeCommand, Frame, Payload, StickData};
pub use hop::{HopAction, HopSequence, HopTiming};
pub use led::{LedCommand, LedStatus, StatusLed};
pub use timer::{Countdown, Timers};

#[cfg(all(test, feature = "defmt"))]
mod tests {
    use super::*;

    fn assert_format<T: defmt::Format>() {}

    #[test]
    fn test_state_types_are_loggable() {
        assert_format::<Timers>();
        assert_format::<StatusLed>();
        assert_format::<BindButton>();
        assert_format::<FailsafeController>();
        assert_format::<HopSequence>();
    }
}
