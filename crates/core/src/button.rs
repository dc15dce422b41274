//! Bind button and bootloader trigger
//!
//! The button is sampled once per system tick, which debounces contact
//! bounce shorter than a tick. A short press requests a bind; holding the
//! button for the whole ISP window requests the bootloader.

use crate::timer::Countdown;

/// Outcome of one button sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// No change
    Idle,
    /// Button went down; ISP window armed
    Pressed,
    /// Button released before the ISP window closed
    BindRequested,
    /// Button held for the whole ISP window
    EnterBootloader,
}

/// Debounced bind button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BindButton {
    pressed: bool,
    isp_armed: bool,
}

impl BindButton {
    /// Create a button in the released state
    pub const fn new() -> Self {
        Self {
            pressed: false,
            isp_armed: false,
        }
    }

    /// Process one tick-aligned sample
    ///
    /// `isp_window` reloads `countdown` on press. Expiry while the window is
    /// still armed wins over any level change in the same sample.
    pub fn sample(&mut self, pressed: bool, countdown: &mut Countdown, isp_window: u32) -> ButtonEvent {
        if self.isp_armed && countdown.is_expired() {
            return ButtonEvent::EnterBootloader;
        }

        if pressed == self.pressed {
            return ButtonEvent::Idle;
        }
        self.pressed = pressed;

        if pressed {
            countdown.reload(isp_window);
            self.isp_armed = true;
            ButtonEvent::Pressed
        } else {
            self.isp_armed = false;
            ButtonEvent::BindRequested
        }
    }

    /// Last sampled level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Check whether a hold would still reach the bootloader
    pub fn is_isp_armed(&self) -> bool {
        self.isp_armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u32 = 300;

    #[test]
    fn test_short_press_requests_bind_once() {
        let mut button = BindButton::new();
        let mut countdown = Countdown::new();

        assert_eq!(button.sample(true, &mut countdown, WINDOW), ButtonEvent::Pressed);
        for _ in 0..10 {
            countdown.tick();
            assert_eq!(button.sample(true, &mut countdown, WINDOW), ButtonEvent::Idle);
        }

        countdown.tick();
        assert_eq!(
            button.sample(false, &mut countdown, WINDOW),
            ButtonEvent::BindRequested
        );

        // Staying released, even long after, raises nothing else
        for _ in 0..(WINDOW * 2) {
            countdown.tick();
            assert_eq!(button.sample(false, &mut countdown, WINDOW), ButtonEvent::Idle);
        }
    }

    #[test]
    fn test_long_hold_enters_bootloader() {
        let mut button = BindButton::new();
        let mut countdown = Countdown::new();

        assert_eq!(button.sample(true, &mut countdown, WINDOW), ButtonEvent::Pressed);
        for _ in 0..WINDOW - 1 {
            countdown.tick();
            assert_eq!(button.sample(true, &mut countdown, WINDOW), ButtonEvent::Idle);
        }

        countdown.tick();
        assert_eq!(
            button.sample(true, &mut countdown, WINDOW),
            ButtonEvent::EnterBootloader
        );
    }

    #[test]
    fn test_expiry_wins_over_release() {
        let mut button = BindButton::new();
        let mut countdown = Countdown::new();

        button.sample(true, &mut countdown, WINDOW);
        countdown.reload(0);

        assert_eq!(
            button.sample(false, &mut countdown, WINDOW),
            ButtonEvent::EnterBootloader
        );
    }

    #[test]
    fn test_release_disarms_isp() {
        let mut button = BindButton::new();
        let mut countdown = Countdown::new();

        button.sample(true, &mut countdown, WINDOW);
        assert!(button.is_isp_armed());
        button.sample(false, &mut countdown, WINDOW);
        assert!(!button.is_isp_armed());

        // Countdown expiring later does nothing
        countdown.reload(0);
        assert_eq!(button.sample(false, &mut countdown, WINDOW), ButtonEvent::Idle);
    }
}
