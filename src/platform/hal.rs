//! embedded-hal 1.0 adapters
//!
//! Wraps HAL peripherals so board crates can hand them straight to the
//! platform traits. HAL error types are opaque here and are mapped to the
//! closest `PlatformError` variant.

use embedded_hal::digital::{InputPin, StatefulOutputPin};
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal::spi::SpiDevice;

use crate::platform::{
    error::{GpioError, PlatformError, PwmError, SpiError},
    traits::{GpioInterface, ServoOutput, SpiInterface},
    Result,
};
use hoprx_core::config::{CHANNEL_COUNT, SERVO_PULSE_CENTER};
use hoprx_core::ChannelOutputs;

/// SPI device adapter
///
/// `SpiDevice` owns chip select, so every call is one framed transaction.
pub struct HalSpi<D> {
    device: D,
}

impl<D: SpiDevice> HalSpi<D> {
    /// Wrap an SPI device
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Release the wrapped device
    pub fn release(self) -> D {
        self.device
    }
}

impl<D: SpiDevice> SpiInterface for HalSpi<D> {
    fn transfer_in_place(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.device
            .transfer_in_place(buffer)
            .map_err(|_| PlatformError::Spi(SpiError::TransferFailed))
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.device
            .write(data)
            .map_err(|_| PlatformError::Spi(SpiError::TransferFailed))
    }
}

/// Output pin adapter (LED, radio CE)
pub struct HalOutputPin<P> {
    pin: P,
}

impl<P: StatefulOutputPin> HalOutputPin<P> {
    /// Wrap an output pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: StatefulOutputPin> GpioInterface for HalOutputPin<P> {
    fn set_high(&mut self) -> Result<()> {
        self.pin
            .set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::PinFault))
    }

    fn set_low(&mut self) -> Result<()> {
        self.pin
            .set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::PinFault))
    }

    fn toggle(&mut self) -> Result<()> {
        self.pin
            .toggle()
            .map_err(|_| PlatformError::Gpio(GpioError::PinFault))
    }

    fn read(&mut self) -> Result<bool> {
        self.pin
            .is_set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::PinFault))
    }
}

/// Input pin adapter (bind button)
pub struct HalInputPin<P> {
    pin: P,
}

impl<P: InputPin> HalInputPin<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> GpioInterface for HalInputPin<P> {
    fn set_high(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn set_low(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn toggle(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn read(&mut self) -> Result<bool> {
        self.pin
            .is_high()
            .map_err(|_| PlatformError::Gpio(GpioError::PinFault))
    }
}

/// Servo outputs over PWM channels
///
/// Each channel runs at a frame period of `period_us`; a pulse width maps to
/// the duty fraction `pulse / period`. Pulses wider than the frame are
/// clamped to a full duty cycle.
pub struct HalServo<C> {
    channels: [C; CHANNEL_COUNT],
    period_us: u16,
    pulses: ChannelOutputs,
    enabled: bool,
}

impl<C: SetDutyCycle> HalServo<C> {
    /// Wrap PWM channels running at a `period_us` frame
    pub fn new(channels: [C; CHANNEL_COUNT], period_us: u16) -> Self {
        Self {
            channels,
            period_us,
            pulses: [SERVO_PULSE_CENTER; CHANNEL_COUNT],
            enabled: false,
        }
    }

    fn apply(&mut self) -> Result<()> {
        if self.period_us == 0 {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }

        for (channel, &pulse) in self.channels.iter_mut().zip(self.pulses.iter()) {
            channel
                .set_duty_cycle_fraction(pulse.min(self.period_us), self.period_us)
                .map_err(|_| PlatformError::Pwm(PwmError::InvalidDutyCycle))?;
        }
        Ok(())
    }
}

impl<C: SetDutyCycle> ServoOutput for HalServo<C> {
    fn write_pulses(&mut self, pulses: &ChannelOutputs) -> Result<()> {
        self.pulses = *pulses;
        if self.enabled {
            self.apply()?;
        }
        Ok(())
    }

    fn enable(&mut self) -> Result<()> {
        self.enabled = true;
        self.apply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorType as DigitalErrorType, OutputPin};
    use embedded_hal::pwm::ErrorType as PwmErrorType;

    struct FakePwm {
        duty: u16,
    }

    impl PwmErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            20_000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    struct FakePin {
        high: bool,
    }

    impl DigitalErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for FakePin {
        fn is_set_high(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    fn servo() -> HalServo<FakePwm> {
        HalServo::new(
            [FakePwm { duty: 0 }, FakePwm { duty: 0 }, FakePwm { duty: 0 }],
            20_000,
        )
    }

    #[test]
    fn test_servo_latches_until_enabled() {
        let mut servo = servo();
        servo.write_pulses(&[1000, 1500, 2000]).unwrap();
        assert!(servo.channels.iter().all(|c| c.duty == 0));

        servo.enable().unwrap();
        let duties: [u16; 3] = core::array::from_fn(|i| servo.channels[i].duty);
        assert_eq!(duties, [1000, 1500, 2000]);

        servo.write_pulses(&[1100, 1200, 1300]).unwrap();
        assert_eq!(servo.channels[2].duty, 1300);
    }

    #[test]
    fn test_servo_clamps_to_period() {
        let mut servo = servo();
        servo.enable().unwrap();
        servo.write_pulses(&[0xffff, 0, 1500]).unwrap();
        assert_eq!(servo.channels[0].duty, 20_000);
        assert_eq!(servo.channels[1].duty, 0);
    }

    #[test]
    fn test_output_pin_toggle() {
        let mut pin = HalOutputPin::new(FakePin { high: false });
        pin.toggle().unwrap();
        assert!(pin.read().unwrap());
        pin.set_level(false).unwrap();
        assert!(!pin.read().unwrap());
    }

    #[test]
    fn test_input_pin_rejects_writes() {
        let mut pin = HalInputPin::new(FakePin { high: true });
        assert!(pin.read().unwrap());
        assert_eq!(
            pin.set_high(),
            Err(PlatformError::Gpio(GpioError::InvalidMode))
        );
    }
}
