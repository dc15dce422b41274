//! Failsafe profile and activation
//!
//! The failsafe only arms after the first stick-data frame since power-up.
//! Before that the servo outputs stay off, so a receiver powered up ahead
//! of its transmitter never drives servos to the failsafe position.
//!
//! Once armed, failsafe asserts whenever the failsafe countdown has expired.
//! The countdown is reloaded only by stick data, so the failsafe outputs are
//! re-applied on every pass until the link comes back.

use crate::config::{CHANNEL_COUNT, SERVO_PULSE_CENTER};
use crate::frame::FailsafeCommand;
use crate::timer::Countdown;

/// One pulse width per servo channel
pub type ChannelOutputs = [u16; CHANNEL_COUNT];

/// Centered pulse on every channel
pub const CENTERED: ChannelOutputs = [SERVO_PULSE_CENTER; CHANNEL_COUNT];

/// Outputs to apply when the link is lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FailsafeProfile {
    /// Pulse width per channel
    pub pulses: ChannelOutputs,
    /// Transmitter supplied its own failsafe positions
    pub enabled: bool,
}

impl FailsafeProfile {
    /// Centered, disabled profile
    pub const fn centered() -> Self {
        Self {
            pulses: CENTERED,
            enabled: false,
        }
    }
}

impl Default for FailsafeProfile {
    fn default() -> Self {
        Self::centered()
    }
}

/// Failsafe activation guard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FailsafeController {
    profile: FailsafeProfile,
    armed: bool,
    engaged: bool,
}

impl FailsafeController {
    /// Create a disarmed controller with a centered profile
    pub const fn new() -> Self {
        Self {
            profile: FailsafeProfile::centered(),
            armed: false,
            engaged: false,
        }
    }

    /// Stick data arrived
    ///
    /// Arms the failsafe and clears any engaged state. Returns `true` the
    /// first time since power-up, when the outputs should be switched on.
    pub fn on_stick_data(&mut self) -> bool {
        let first = !self.armed;
        self.armed = true;
        self.engaged = false;
        first
    }

    /// Apply a failsafe setup frame
    ///
    /// Disabling discards any previously learned positions.
    pub fn apply(&mut self, command: FailsafeCommand) {
        match command {
            FailsafeCommand::Enable(pulses) => {
                self.profile = FailsafeProfile {
                    pulses,
                    enabled: true,
                };
            }
            FailsafeCommand::Disable => self.profile = FailsafeProfile::centered(),
        }
    }

    /// Outputs to force this pass, if failsafe is asserting
    pub fn poll(&mut self, countdown: &Countdown) -> Option<ChannelOutputs> {
        if !self.armed || !countdown.is_expired() {
            return None;
        }

        self.engaged = true;
        Some(self.profile.pulses)
    }

    /// Check whether stick data has ever been received
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Check whether failsafe outputs are currently asserted
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Current profile
    pub fn profile(&self) -> &FailsafeProfile {
        &self.profile
    }
}
