//! Receiver configuration
//!
//! Protocol constants are fixed by the transmitter and cannot change at
//! runtime. Everything tied to the board (tick period, pin polarity) lives in
//! [`ReceiverConfig`], and all countdown lengths are derived from it through
//! [`Timing`].

use crate::error::ConfigError;

/// Radio payload size in bytes
pub const PAYLOAD_SIZE: usize = 10;

/// Radio address width in bytes
pub const ADDRESS_WIDTH: usize = 5;

/// Number of channels in the hop table
pub const HOP_CHANNEL_COUNT: usize = 20;

/// Size of the persisted bind record (address followed by hop table)
pub const BIND_RECORD_SIZE: usize = ADDRESS_WIDTH + HOP_CHANNEL_COUNT;

/// Number of servo output channels
pub const CHANNEL_COUNT: usize = 3;

/// Consecutive hop-timer expiries without a packet before a full restart
pub const MAX_HOPS_WITHOUT_PACKET: u32 = 15;

/// Delay from a received packet to the first hop (µs)
///
/// Shorter than [`HOP_TIME_US`] so the receiver is on the next channel
/// before the transmitter's next packet arrives.
pub const FIRST_HOP_TIME_US: u32 = 4000;

/// Steady-state hop period (µs)
pub const HOP_TIME_US: u32 = 5000;

/// Fixed channel used by transmitters for bind frames
pub const BIND_CHANNEL: u8 = 0x51;

/// Fixed address used by transmitters for bind frames
pub const BIND_ADDRESS: [u8; ADDRESS_WIDTH] = [0x12, 0x23, 0x23, 0x45, 0x78];

/// Centered servo pulse width (µs)
pub const SERVO_PULSE_CENTER: u16 = 1500;

const FAILSAFE_TIMEOUT_MS: u32 = 640;
const BIND_TIMEOUT_MS: u32 = 5000;
const ISP_TIMEOUT_MS: u32 = 3000;
const BLINK_TIME_SLOW_MS: u32 = 320;
const BLINK_TIME_FAST_MS: u32 = 50;

/// Board-level receiver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverConfig {
    /// Period of the system tick in milliseconds
    pub systick_ms: u32,
    /// LED lights when its pin is driven low
    pub led_active_low: bool,
    /// Bind button reads low while pressed
    pub button_active_low: bool,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            systick_ms: 10,
            led_active_low: true,
            button_active_low: true,
        }
    }
}

/// Countdown lengths in system ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Ticks without stick data before failsafe engages
    pub failsafe_timeout: u32,
    /// Ticks allowed for a complete bind handshake
    pub bind_timeout: u32,
    /// Ticks the bind button must be held to enter the bootloader
    pub isp_timeout: u32,
    /// Blink half-period for Idle and Failsafe
    pub blink_slow: u32,
    /// Blink half-period for Binding
    pub blink_fast: u32,
}

impl Timing {
    /// Derive tick counts from the configured tick period
    ///
    /// Durations shorter than one tick round up to a single tick so that no
    /// countdown is born expired.
    pub fn from_config(config: &ReceiverConfig) -> Result<Self, ConfigError> {
        if config.systick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        let ticks = |ms: u32| (ms / config.systick_ms).max(1);

        Ok(Self {
            failsafe_timeout: ticks(FAILSAFE_TIMEOUT_MS),
            bind_timeout: ticks(BIND_TIMEOUT_MS),
            isp_timeout: ticks(ISP_TIMEOUT_MS),
            blink_slow: ticks(BLINK_TIME_SLOW_MS),
            blink_fast: ticks(BLINK_TIME_FAST_MS),
        })
    }
}
