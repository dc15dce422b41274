//! Mock GPIO implementation for testing

use crate::platform::{
    Result,
    error::{GpioError, PlatformError},
    traits::GpioInterface,
};

/// Mock GPIO implementation
///
/// Tracks pin level and direction for test verification.
#[derive(Debug)]
pub struct MockGpio {
    state: bool,
    output: bool,
    writes: u32,
}

impl MockGpio {
    /// Create a new mock GPIO in output mode, driven low
    pub fn new_output() -> Self {
        Self {
            state: false,
            output: true,
            writes: 0,
        }
    }

    /// Create a new mock GPIO in input mode, reading low
    pub fn new_input() -> Self {
        Self {
            state: false,
            output: false,
            writes: 0,
        }
    }

    /// Set the input state (for simulating input pin reads)
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }

    /// Current level, without going through the trait
    pub fn level(&self) -> bool {
        self.state
    }

    /// Number of successful level changes requested through the trait
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    fn drive(&mut self, high: bool) -> Result<()> {
        if !self.output {
            return Err(PlatformError::Gpio(GpioError::InvalidMode));
        }
        self.state = high;
        self.writes += 1;
        Ok(())
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        self.drive(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.drive(false)
    }

    fn toggle(&mut self) -> Result<()> {
        self.drive(!self.state)
    }

    fn read(&mut self) -> Result<bool> {
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gpio_output() {
        let mut gpio = MockGpio::new_output();
        assert!(!gpio.read().unwrap());

        gpio.set_high().unwrap();
        assert!(gpio.read().unwrap());

        gpio.set_low().unwrap();
        assert!(!gpio.read().unwrap());
        assert_eq!(gpio.write_count(), 2);
    }

    #[test]
    fn test_mock_gpio_toggle() {
        let mut gpio = MockGpio::new_output();
        gpio.toggle().unwrap();
        assert!(gpio.level());

        gpio.toggle().unwrap();
        assert!(!gpio.level());
    }

    #[test]
    fn test_mock_gpio_input() {
        let mut gpio = MockGpio::new_input();
        assert!(!gpio.read().unwrap());

        // Simulate external signal
        gpio.set_input_state(true);
        assert!(gpio.read().unwrap());

        // Input mode should not allow set_high/set_low
        assert!(gpio.set_high().is_err());
        assert!(gpio.set_low().is_err());
        assert!(gpio.toggle().is_err());
    }
}
