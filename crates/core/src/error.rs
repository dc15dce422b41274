//! Core error types
//!
//! Protocol mismatches (wrong marker, wrong checksum, unknown discriminant)
//! are not errors: frames that fail those checks are dropped silently.
//! These types cover malformed inputs that cannot be interpreted at all.

use core::fmt;

/// Errors from validating raw byte buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Buffer length does not match the fixed wire/record size
    InvalidLength {
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

/// Errors from building runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// System tick period of zero milliseconds
    ZeroTick,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTick => write!(f, "system tick period must be non-zero"),
        }
    }
}
