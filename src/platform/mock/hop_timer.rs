//! Mock hop timer for testing

use crate::core::irq::IrqFlag;
use crate::platform::{traits::HopTimer, Result};

/// Mock hop timer implementation
///
/// Tracks the programmed count and reload values and how often the timer
/// was (re)started.
#[derive(Debug, Default)]
pub struct MockHopTimer {
    running: bool,
    count: u32,
    reload: u32,
    starts: u32,
    stops: u32,
    raise_on_stop: Option<&'static IrqFlag>,
}

impl MockHopTimer {
    /// Create a stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the timer is counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Programmed count
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Programmed reload value
    pub fn reload(&self) -> u32 {
        self.reload
    }

    /// Number of `start` calls
    pub fn start_count(&self) -> u32 {
        self.starts
    }

    /// Number of `stop` calls
    pub fn stop_count(&self) -> u32 {
        self.stops
    }

    /// Raise `flag` on every `stop`, as if the match interrupt fired just
    /// before the timer halted
    pub fn raise_on_stop(&mut self, flag: &'static IrqFlag) {
        self.raise_on_stop = Some(flag);
    }
}

impl HopTimer for MockHopTimer {
    fn stop(&mut self) -> Result<()> {
        if let Some(flag) = self.raise_on_stop {
            flag.raise();
        }
        self.running = false;
        self.stops += 1;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.running = true;
        self.starts += 1;
        Ok(())
    }

    fn set_count(&mut self, count: u32) -> Result<()> {
        self.count = count;
        Ok(())
    }

    fn set_reload(&mut self, reload: u32) -> Result<()> {
        self.reload = reload;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_hop_timer() {
        let mut timer = MockHopTimer::new();
        assert!(!timer.is_running());

        timer.stop().unwrap();
        timer.set_count(1000).unwrap();
        timer.set_reload(4999).unwrap();
        timer.start().unwrap();

        assert!(timer.is_running());
        assert_eq!((timer.count(), timer.reload()), (1000, 4999));
        assert_eq!((timer.stop_count(), timer.start_count()), (1, 1));
    }

    #[test]
    fn test_mock_hop_timer_raises_on_stop() {
        static EXPIRED: IrqFlag = IrqFlag::new();

        let mut timer = MockHopTimer::new();
        timer.raise_on_stop(&EXPIRED);
        timer.stop().unwrap();

        assert!(EXPIRED.is_raised());
    }
}
