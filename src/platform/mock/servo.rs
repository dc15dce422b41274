//! Mock servo outputs for testing

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::ServoOutput,
    Result,
};
use hoprx_core::config::{CHANNEL_COUNT, SERVO_PULSE_CENTER};
use hoprx_core::ChannelOutputs;
use std::vec::Vec;

/// Mock servo implementation
///
/// Records every latched pulse set so tests can check that channels are
/// always written as a whole.
#[derive(Debug)]
pub struct MockServo {
    pulses: ChannelOutputs,
    enabled: bool,
    history: Vec<ChannelOutputs>,
    fail_next_enable: bool,
}

impl MockServo {
    /// Create disabled outputs latched at center
    pub fn new() -> Self {
        Self {
            pulses: [SERVO_PULSE_CENTER; CHANNEL_COUNT],
            enabled: false,
            history: Vec::new(),
            fail_next_enable: false,
        }
    }

    /// Latched pulse widths
    pub fn pulses(&self) -> ChannelOutputs {
        self.pulses
    }

    /// Check whether pulses are being driven
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Every pulse set written, in order
    pub fn history(&self) -> &[ChannelOutputs] {
        &self.history
    }

    /// Make the next `enable` call fail once
    pub fn fail_next_enable(&mut self) {
        self.fail_next_enable = true;
    }

    /// Number of writes
    pub fn write_count(&self) -> usize {
        self.history.len()
    }
}

impl Default for MockServo {
    fn default() -> Self {
        Self::new()
    }
}

impl ServoOutput for MockServo {
    fn write_pulses(&mut self, pulses: &ChannelOutputs) -> Result<()> {
        self.pulses = *pulses;
        self.history.push(*pulses);
        Ok(())
    }

    fn enable(&mut self) -> Result<()> {
        if core::mem::take(&mut self.fail_next_enable) {
            return Err(PlatformError::Pwm(PwmError::ChannelUnavailable));
        }
        self.enabled = true;
        Ok(())
    }
}
