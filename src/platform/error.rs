//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// SPI operation failed
    Spi(SpiError),
    /// GPIO operation failed
    Gpio(GpioError),
    /// Flash operation failed
    Flash(FlashError),
    /// Radio rejected a setting or did not respond
    Radio(RadioError),
    /// Hop timer operation failed
    Timer(TimerError),
    /// PWM operation failed
    Pwm(PwmError),
}

/// SPI-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// Transfer failed
    TransferFailed,
    /// Chip select could not be asserted
    ChipSelect,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Invalid mode for operation
    InvalidMode,
    /// Pin driver reported a failure
    PinFault,
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Address outside the writable region or not aligned
    InvalidAddress,
    /// Program operation failed
    WriteFailed,
    /// Erase operation failed
    EraseFailed,
    /// Stored data failed magic or CRC validation
    Corrupted,
}

/// Radio-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Setting outside the transceiver's supported range
    InvalidConfig,
    /// Pipe number out of range
    InvalidPipe,
}

/// Timer-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Value does not fit the counter
    Overflow,
}

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Invalid duty cycle value
    InvalidDutyCycle,
    /// Channel not available
    ChannelUnavailable,
}

impl From<SpiError> for PlatformError {
    fn from(e: SpiError) -> Self {
        PlatformError::Spi(e)
    }
}

impl From<GpioError> for PlatformError {
    fn from(e: GpioError) -> Self {
        PlatformError::Gpio(e)
    }
}

impl From<FlashError> for PlatformError {
    fn from(e: FlashError) -> Self {
        PlatformError::Flash(e)
    }
}

impl From<RadioError> for PlatformError {
    fn from(e: RadioError) -> Self {
        PlatformError::Radio(e)
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Spi(e) => write!(f, "SPI error: {:?}", e),
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Flash(e) => write!(f, "Flash error: {:?}", e),
            PlatformError::Radio(e) => write!(f, "Radio error: {:?}", e),
            PlatformError::Timer(e) => write!(f, "Timer error: {:?}", e),
            PlatformError::Pwm(e) => write!(f, "PWM error: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sub_errors() {
        assert_eq!(
            PlatformError::from(FlashError::Corrupted),
            PlatformError::Flash(FlashError::Corrupted)
        );
        assert_eq!(
            PlatformError::from(RadioError::InvalidConfig),
            PlatformError::Radio(RadioError::InvalidConfig)
        );
    }

    #[test]
    fn test_display() {
        let text = format!("{}", PlatformError::Spi(SpiError::TransferFailed));
        assert_eq!(text, "SPI error: TransferFailed");
    }
}
