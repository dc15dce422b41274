//! Mock Platform implementation for testing

use crate::platform::traits::Platform;

use super::{MockGpio, MockHopTimer, MockRadio, MockServo, MockStorage};

/// Mock Platform implementation
///
/// Provides mock peripheral implementations for hardware-free testing. The
/// LED and button are wired active-low, matching `ReceiverConfig::default()`.
///
/// # Example
///
/// ```
/// use hoprx::platform::mock::MockPlatform;
///
/// let mut platform = MockPlatform::new();
/// platform.press_button();
/// assert!(!platform.button.level());
/// ```
#[derive(Debug)]
pub struct MockPlatform {
    /// Radio transceiver
    pub radio: MockRadio,
    /// Servo outputs
    pub servo: MockServo,
    /// Hop timer
    pub hop_timer: MockHopTimer,
    /// Bind record storage
    pub storage: MockStorage,
    /// Status LED (active-low)
    pub led: MockGpio,
    /// Bind button (active-low, pulled up)
    pub button: MockGpio,
}

impl MockPlatform {
    /// Create a mock platform with empty storage and a released button
    pub fn new() -> Self {
        Self::with_storage(MockStorage::new())
    }

    /// Create a mock platform around pre-populated storage
    pub fn with_storage(storage: MockStorage) -> Self {
        let mut button = MockGpio::new_input();
        button.set_input_state(true);

        let mut led = MockGpio::new_output();
        led.set_input_state(true);

        Self {
            radio: MockRadio::new(),
            servo: MockServo::new(),
            hop_timer: MockHopTimer::new(),
            storage,
            led,
            button,
        }
    }

    /// Hold the bind button down
    pub fn press_button(&mut self) {
        self.button.set_input_state(false);
    }

    /// Let go of the bind button
    pub fn release_button(&mut self) {
        self.button.set_input_state(true);
    }

    /// Check whether the status LED is lit
    pub fn led_lit(&self) -> bool {
        !self.led.level()
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MockPlatform {
    type Radio = MockRadio;
    type Servo = MockServo;
    type HopTimer = MockHopTimer;
    type Storage = MockStorage;
    type Led = MockGpio;
    type Button = MockGpio;

    fn radio(&mut self) -> &mut Self::Radio {
        &mut self.radio
    }

    fn servo(&mut self) -> &mut Self::Servo {
        &mut self.servo
    }

    fn hop_timer(&mut self) -> &mut Self::HopTimer {
        &mut self.hop_timer
    }

    fn storage(&mut self) -> &mut Self::Storage {
        &mut self.storage
    }

    fn status_led(&mut self) -> &mut Self::Led {
        &mut self.led
    }

    fn bind_button(&mut self) -> &mut Self::Button {
        &mut self.button
    }

    fn enter_bootloader(&mut self) -> ! {
        panic!("bootloader entered");
    }
}
