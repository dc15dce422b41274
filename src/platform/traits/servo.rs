//! Servo pulse output trait

use crate::platform::Result;
use hoprx_core::ChannelOutputs;

/// PWM servo outputs
///
/// Pulse widths are in microseconds. Outputs start disabled so that no pulse
/// reaches a servo until `enable` is called; writes before that are latched.
pub trait ServoOutput {
    /// Latch one pulse width per channel
    fn write_pulses(&mut self, pulses: &ChannelOutputs) -> Result<()>;

    /// Start driving the latched pulses onto the pins
    fn enable(&mut self) -> Result<()>;
}
