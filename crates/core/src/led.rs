//! Status LED state machine
//!
//! | Status    | LED              |
//! |-----------|------------------|
//! | Receiving | steady on        |
//! | Binding   | fast blink       |
//! | Idle      | slow blink       |
//! | Failsafe  | slow blink       |
//!
//! Rendering is edge-triggered: the LED is only reprogrammed when the status
//! differs from what was last rendered. Blinking is a separate periodic
//! toggle driven by the blink countdown, reloaded each time it expires.

use crate::config::Timing;
use crate::timer::Countdown;

/// Receiver status shown on the LED
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedStatus {
    /// No link yet
    #[default]
    Idle,
    /// Stick data arriving
    Receiving,
    /// Link lost, failsafe outputs asserted
    Failsafe,
    /// Bind handshake in progress
    Binding,
}

/// Change to apply to the LED pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedCommand {
    /// Light the LED
    On,
    /// Turn the LED off
    Off,
    /// Invert the LED
    Toggle,
}

/// Edge-triggered LED renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusLed {
    rendered: Option<LedStatus>,
    blink_period: Option<u32>,
}

impl StatusLed {
    /// Create a renderer that has not drawn anything yet
    pub const fn new() -> Self {
        Self {
            rendered: None,
            blink_period: None,
        }
    }

    /// Render `status`, returning the pin change for this pass
    ///
    /// A status transition always lights the LED; blinking states then
    /// toggle it every time the blink countdown expires.
    pub fn update(
        &mut self,
        status: LedStatus,
        blink: &mut Countdown,
        timing: &Timing,
    ) -> Option<LedCommand> {
        let mut command = None;

        if let Some(period) = self.blink_period {
            if blink.is_expired() {
                blink.reload(period);
                command = Some(LedCommand::Toggle);
            }
        }

        if self.rendered == Some(status) {
            return command;
        }
        self.rendered = Some(status);

        self.blink_period = match status {
            LedStatus::Receiving => None,
            LedStatus::Binding => Some(timing.blink_fast),
            LedStatus::Idle | LedStatus::Failsafe => Some(timing.blink_slow),
        };

        Some(LedCommand::On)
    }

    /// Last rendered status
    pub fn rendered(&self) -> Option<LedStatus> {
        self.rendered
    }

    /// Check whether the current status blinks
    pub fn is_blinking(&self) -> bool {
        self.blink_period.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReceiverConfig;

    fn timing() -> Timing {
        Timing::from_config(&ReceiverConfig::default()).unwrap()
    }

    #[test]
    fn test_first_update_renders() {
        let mut led = StatusLed::new();
        let mut blink = Countdown::new();
        assert_eq!(
            led.update(LedStatus::Idle, &mut blink, &timing()),
            Some(LedCommand::On)
        );
        assert_eq!(led.rendered(), Some(LedStatus::Idle));
        assert!(led.is_blinking());
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut led = StatusLed::new();
        let mut blink = Countdown::with_ticks(1000);
        let timing = timing();

        led.update(LedStatus::Receiving, &mut blink, &timing);
        for _ in 0..10 {
            assert_eq!(led.update(LedStatus::Receiving, &mut blink, &timing), None);
        }
    }

    #[test]
    fn test_receiving_never_toggles() {
        let mut led = StatusLed::new();
        let mut blink = Countdown::new();
        let timing = timing();

        led.update(LedStatus::Receiving, &mut blink, &timing);
        assert!(!led.is_blinking());
        for _ in 0..100 {
            blink.tick();
            assert_eq!(led.update(LedStatus::Receiving, &mut blink, &timing), None);
        }
    }

    #[test]
    fn test_binding_blinks_at_fast_period() {
        let mut led = StatusLed::new();
        let mut blink = Countdown::new();
        let timing = timing();

        assert_eq!(
            led.update(LedStatus::Binding, &mut blink, &timing),
            Some(LedCommand::On)
        );

        // Countdown already expired: first toggle on the next pass
        assert_eq!(
            led.update(LedStatus::Binding, &mut blink, &timing),
            Some(LedCommand::Toggle)
        );
        assert_eq!(blink.remaining(), timing.blink_fast);

        let mut toggles = 0;
        for _ in 0..timing.blink_fast * 4 {
            blink.tick();
            if led.update(LedStatus::Binding, &mut blink, &timing) == Some(LedCommand::Toggle) {
                toggles += 1;
            }
        }
        assert_eq!(toggles, 4);
    }

    #[test]
    fn test_idle_and_failsafe_share_slow_period() {
        let timing = timing();

        for status in [LedStatus::Idle, LedStatus::Failsafe] {
            let mut led = StatusLed::new();
            let mut blink = Countdown::new();
            led.update(status, &mut blink, &timing);
            led.update(status, &mut blink, &timing);
            assert_eq!(blink.remaining(), timing.blink_slow);
        }
    }

    #[test]
    fn test_transition_overrides_toggle() {
        let mut led = StatusLed::new();
        let mut blink = Countdown::new();
        let timing = timing();

        led.update(LedStatus::Idle, &mut blink, &timing);
        // Blink countdown expired and status changes in the same pass
        assert_eq!(
            led.update(LedStatus::Receiving, &mut blink, &timing),
            Some(LedCommand::On)
        );
        assert!(!led.is_blinking());
    }
}
