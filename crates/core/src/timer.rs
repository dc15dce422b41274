//! Tick countdowns
//!
//! Every timeout in the receiver is a countdown decremented once per system
//! tick. A countdown at zero stays at zero until someone reloads it; reaching
//! zero is the only "timeout fired" signal.

/// Saturating tick countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Create a countdown that is already expired
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Create a countdown loaded with `ticks`
    pub const fn with_ticks(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Load the countdown with `ticks`
    pub fn reload(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    /// Decrement by one tick, floored at zero
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Check whether the countdown has reached zero
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Ticks left before expiry
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// All countdowns driven by the system tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timers {
    /// Time left before failsafe engages
    pub failsafe: Countdown,
    /// Time left for the bind handshake
    pub bind: Countdown,
    /// Time left before a held bind button enters the bootloader
    pub button: Countdown,
    /// Time left before the next LED blink toggle
    pub blink: Countdown,
}

impl Timers {
    /// Create a set of expired countdowns
    pub const fn new() -> Self {
        Self {
            failsafe: Countdown::new(),
            bind: Countdown::new(),
            button: Countdown::new(),
            blink: Countdown::new(),
        }
    }

    /// Advance every countdown by one tick
    pub fn tick(&mut self) {
        self.failsafe.tick();
        self.bind.tick();
        self.button.tick();
        self.blink.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_starts_expired() {
        let countdown = Countdown::new();
        assert!(countdown.is_expired());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_countdown_expires_after_reload_ticks() {
        let mut countdown = Countdown::new();
        countdown.reload(3);

        countdown.tick();
        countdown.tick();
        assert!(!countdown.is_expired());

        countdown.tick();
        assert!(countdown.is_expired());
    }

    #[test]
    fn test_countdown_saturates_at_zero() {
        let mut countdown = Countdown::with_ticks(1);
        for _ in 0..10 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_timers_tick_all() {
        let mut timers = Timers::new();
        timers.failsafe.reload(5);
        timers.bind.reload(4);
        timers.button.reload(3);
        timers.blink.reload(1);

        timers.tick();

        assert_eq!(timers.failsafe.remaining(), 4);
        assert_eq!(timers.bind.remaining(), 3);
        assert_eq!(timers.button.remaining(), 2);
        assert!(timers.blink.is_expired());

        // Expired timers stay at zero while the others keep counting
        timers.tick();
        assert!(timers.blink.is_expired());
        assert_eq!(timers.failsafe.remaining(), 3);
    }
}
