//! Radio payload decoding
//!
//! Every frame on air is exactly [`PAYLOAD_SIZE`] bytes. Normal frames carry
//! three little-endian 16-bit stick values in bytes 0-5 and a type
//! discriminant in byte 7:
//!
//! ```text
//! byte  0   1   2   3   4   5   6   7     8       9
//!      [s0 lo/hi][s1 lo/hi][s2 lo/hi] --  type  marker  --
//!
//! type 0x55: stick data
//! type 0xaa: failsafe setup, marker 0x5a = enable, anything else = disable
//! ```

use crate::config::{CHANNEL_COUNT, PAYLOAD_SIZE};
use crate::error::DecodeError;

/// Discriminant for stick-data frames
pub const FRAME_TYPE_STICKS: u8 = 0x55;

/// Discriminant for failsafe frames
pub const FRAME_TYPE_FAILSAFE: u8 = 0xaa;

/// Failsafe frame marker requesting an enabled failsafe
pub const FAILSAFE_ENABLE_MARKER: u8 = 0x5a;

const TYPE_OFFSET: usize = 7;
const MARKER_OFFSET: usize = 8;

/// One complete radio frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Payload([u8; PAYLOAD_SIZE]);

impl Payload {
    /// Wrap a full-size frame
    pub const fn new(bytes: [u8; PAYLOAD_SIZE]) -> Self {
        Self(bytes)
    }

    /// Validate the length of a received buffer and copy it into a frame
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let bytes: [u8; PAYLOAD_SIZE] =
            bytes.try_into().map_err(|_| DecodeError::InvalidLength {
                expected: PAYLOAD_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Raw frame bytes
    pub fn bytes(&self) -> &[u8; PAYLOAD_SIZE] {
        &self.0
    }

    /// Type discriminant (byte 7)
    pub fn frame_type(&self) -> u8 {
        self.0[TYPE_OFFSET]
    }

    /// Failsafe enable marker (byte 8)
    pub fn marker(&self) -> u8 {
        self.0[MARKER_OFFSET]
    }

    /// The three raw 16-bit stick fields
    pub fn sticks(&self) -> StickData {
        let mut raw = [0u16; CHANNEL_COUNT];
        for (i, value) in raw.iter_mut().enumerate() {
            *value = u16::from_le_bytes([self.0[2 * i], self.0[2 * i + 1]]);
        }
        StickData(raw)
    }
}

impl From<[u8; PAYLOAD_SIZE]> for Payload {
    fn from(bytes: [u8; PAYLOAD_SIZE]) -> Self {
        Self(bytes)
    }
}

/// Raw stick values as sent by the transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickData(pub [u16; CHANNEL_COUNT]);

impl StickData {
    /// Convert every stick value to a servo pulse width
    pub fn pulses(&self) -> [u16; CHANNEL_COUNT] {
        self.0.map(stick_to_pulse)
    }
}

/// Convert a raw stick value to a pulse width
///
/// Transmitters send pulse widths inverted against the full 16-bit range.
pub const fn stick_to_pulse(raw: u16) -> u16 {
    u16::MAX - raw
}

/// Failsafe setup carried by a failsafe frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailsafeCommand {
    /// Use these pulse widths when the link is lost
    Enable([u16; CHANNEL_COUNT]),
    /// Fall back to centered outputs when the link is lost
    Disable,
}

/// A decoded radio frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Live stick positions
    Sticks(StickData),
    /// Failsafe setup
    Failsafe(FailsafeCommand),
    /// Any other discriminant; ignored by the receiver
    Unknown(u8),
}

impl Frame {
    /// Interpret a frame by its type discriminant
    pub fn decode(payload: &Payload) -> Self {
        match payload.frame_type() {
            FRAME_TYPE_STICKS => Frame::Sticks(payload.sticks()),
            FRAME_TYPE_FAILSAFE => {
                if payload.marker() == FAILSAFE_ENABLE_MARKER {
                    Frame::Failsafe(FailsafeCommand::Enable(payload.sticks().pulses()))
                } else {
                    Frame::Failsafe(FailsafeCommand::Disable)
                }
            }
            other => Frame::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(sticks: [u16; 3], frame_type: u8, marker: u8) -> Payload {
        let mut bytes = [0u8; PAYLOAD_SIZE];
        for (i, value) in sticks.iter().enumerate() {
            bytes[2 * i..2 * i + 2].copy_from_slice(&value.to_le_bytes());
        }
        bytes[7] = frame_type;
        bytes[8] = marker;
        Payload::new(bytes)
    }

    #[test]
    fn test_stick_to_pulse_inverts() {
        assert_eq!(stick_to_pulse(0), 0xffff);
        assert_eq!(stick_to_pulse(0xffff), 0);
        assert_eq!(stick_to_pulse(0xffff - 1500), 1500);
    }

    #[test]
    fn test_decode_stick_frame() {
        let payload = frame_with([0xffff - 1000, 0xffff - 1500, 0xffff - 2000], 0x55, 0);
        match Frame::decode(&payload) {
            Frame::Sticks(sticks) => assert_eq!(sticks.pulses(), [1000, 1500, 2000]),
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn test_sticks_are_little_endian() {
        let payload = Payload::new([0x34, 0x12, 0x78, 0x56, 0xbc, 0x9a, 0, 0x55, 0, 0]);
        assert_eq!(payload.sticks(), StickData([0x1234, 0x5678, 0x9abc]));
    }

    #[test]
    fn test_decode_failsafe_enable() {
        let payload = frame_with([0xffff - 1100, 0xffff - 1200, 0xffff - 1300], 0xaa, 0x5a);
        assert_eq!(
            Frame::decode(&payload),
            Frame::Failsafe(FailsafeCommand::Enable([1100, 1200, 1300]))
        );
    }

    #[test]
    fn test_decode_failsafe_disable() {
        let payload = frame_with([1, 2, 3], 0xaa, 0x5b);
        assert_eq!(
            Frame::decode(&payload),
            Frame::Failsafe(FailsafeCommand::Disable)
        );

        // Any marker other than the enable marker disables
        let payload = frame_with([1, 2, 3], 0xaa, 0x00);
        assert_eq!(
            Frame::decode(&payload),
            Frame::Failsafe(FailsafeCommand::Disable)
        );
    }

    #[test]
    fn test_decode_unknown_type() {
        let payload = frame_with([1, 2, 3], 0x42, 0);
        assert_eq!(Frame::decode(&payload), Frame::Unknown(0x42));
    }

    #[test]
    fn test_from_slice_validates_length() {
        assert!(Payload::from_slice(&[0u8; PAYLOAD_SIZE]).is_ok());
        assert_eq!(
            Payload::from_slice(&[0u8; 9]),
            Err(DecodeError::InvalidLength {
                expected: PAYLOAD_SIZE,
                actual: 9
            })
        );
        assert_eq!(
            Payload::from_slice(&[0u8; 32]),
            Err(DecodeError::InvalidLength {
                expected: PAYLOAD_SIZE,
                actual: 32
            })
        );
    }
}
