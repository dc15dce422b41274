//! Bind record and over-the-air bind handshake
//!
//! Transmitters continuously broadcast bind frames on a fixed channel and
//! address, cycling through four frames roughly every 5 ms:
//!
//! ```text
//! ff aa 55 a0 a1 a2 a3 a4 .. ..    marker + 5 address bytes
//! cl ch 00 h0 h1 h2 h3 h4 h5 h6    checksum + hop block 0
//! cl ch 01 h7 h8 h9 hA hB hC hD    checksum + hop block 1
//! cl ch 02 hE hF hG hH hI hJ ..    checksum + hop block 2
//! ```
//!
//! The checksum is the 16-bit sum of the address bytes. It ties the hop
//! blocks to the address frame that started the handshake, so blocks from
//! another transmitter (or a stale cycle) are dropped without needing
//! sequence numbers. A frame that fails any check is ignored and the session
//! simply waits for the transmitter to repeat it.

use crate::config::{ADDRESS_WIDTH, BIND_RECORD_SIZE, HOP_CHANNEL_COUNT};
use crate::error::DecodeError;
use crate::frame::Payload;

/// Marker opening the address frame
pub const ADDRESS_MARKER: [u8; 3] = [0xff, 0xaa, 0x55];

/// Offset of the data bytes in every bind frame
const DATA_OFFSET: usize = 3;

/// (record offset, length) of each hop block
const HOP_BLOCKS: [(usize, usize); 3] = [
    (ADDRESS_WIDTH, 7),
    (ADDRESS_WIDTH + 7, 7),
    (ADDRESS_WIDTH + 14, 6),
];

/// Transmitter address and hop table, persisted as one 25-byte record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BindRecord {
    /// Radio address of the bound transmitter
    pub address: [u8; ADDRESS_WIDTH],
    /// Channel sequence the transmitter hops through
    pub hop_channels: [u8; HOP_CHANNEL_COUNT],
}

impl BindRecord {
    /// Contents of storage that was never written (erased flash)
    pub const UNBOUND: Self = Self {
        address: [0xff; ADDRESS_WIDTH],
        hop_channels: [0xff; HOP_CHANNEL_COUNT],
    };

    /// Serialize as address bytes followed by hop channels
    pub fn to_bytes(&self) -> [u8; BIND_RECORD_SIZE] {
        let mut buf = [0u8; BIND_RECORD_SIZE];
        buf[..ADDRESS_WIDTH].copy_from_slice(&self.address);
        buf[ADDRESS_WIDTH..].copy_from_slice(&self.hop_channels);
        buf
    }

    /// Deserialize a record, which must be exactly [`BIND_RECORD_SIZE`] bytes
    pub fn from_bytes(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() != BIND_RECORD_SIZE {
            return Err(DecodeError::InvalidLength {
                expected: BIND_RECORD_SIZE,
                actual: buf.len(),
            });
        }

        let mut record = Self::UNBOUND;
        record.address.copy_from_slice(&buf[..ADDRESS_WIDTH]);
        record.hop_channels.copy_from_slice(&buf[ADDRESS_WIDTH..]);
        Ok(record)
    }
}

/// 16-bit wrapping sum of the address bytes
pub fn address_checksum(address: &[u8]) -> u16 {
    address
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(byte as u16))
}

/// Progress of the bind handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindStage {
    /// No bind in progress
    Idle,
    /// Waiting for the marker + address frame
    AwaitingAddress,
    /// Waiting for hop block 0
    AwaitingHopBlock1,
    /// Waiting for hop block 1
    AwaitingHopBlock2,
    /// Waiting for hop block 2
    AwaitingHopBlock3,
}

impl BindStage {
    /// Index of the hop block this stage waits for
    fn hop_block(self) -> Option<u8> {
        match self {
            BindStage::AwaitingHopBlock1 => Some(0),
            BindStage::AwaitingHopBlock2 => Some(1),
            BindStage::AwaitingHopBlock3 => Some(2),
            _ => None,
        }
    }
}

/// Result of feeding one frame to a bind session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindProgress {
    /// Frame did not match the expected stage; nothing changed
    Ignored,
    /// Frame accepted, session now in the given stage
    Advanced(BindStage),
    /// Last block accepted; the assembled record is ready to persist
    Complete(BindRecord),
}

/// In-progress bind handshake
#[derive(Debug, Clone)]
pub struct BindSession {
    stage: BindStage,
    checksum: u16,
    pending: [u8; BIND_RECORD_SIZE],
}

impl BindSession {
    /// Create an idle session
    pub const fn new() -> Self {
        Self {
            stage: BindStage::Idle,
            checksum: 0,
            pending: [0; BIND_RECORD_SIZE],
        }
    }

    /// Begin a handshake, waiting for the address frame
    pub fn start(&mut self) {
        self.stage = BindStage::AwaitingAddress;
        self.checksum = 0;
    }

    /// Abandon the handshake
    pub fn cancel(&mut self) {
        self.stage = BindStage::Idle;
    }

    /// Check whether a handshake is in progress
    pub fn is_active(&self) -> bool {
        self.stage != BindStage::Idle
    }

    /// Current stage
    pub fn stage(&self) -> BindStage {
        self.stage
    }

    /// Checksum captured from the address frame
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Feed one received frame to the handshake
    pub fn accept(&mut self, payload: &Payload) -> BindProgress {
        let bytes = payload.bytes();

        match self.stage {
            BindStage::Idle => BindProgress::Ignored,
            BindStage::AwaitingAddress => {
                if bytes[..DATA_OFFSET] != ADDRESS_MARKER {
                    return BindProgress::Ignored;
                }

                let address = &bytes[DATA_OFFSET..DATA_OFFSET + ADDRESS_WIDTH];
                self.pending[..ADDRESS_WIDTH].copy_from_slice(address);
                self.checksum = address_checksum(address);
                self.stage = BindStage::AwaitingHopBlock1;
                BindProgress::Advanced(self.stage)
            }
            stage => {
                let Some(block) = stage.hop_block() else {
                    return BindProgress::Ignored;
                };

                let [lo, hi] = self.checksum.to_le_bytes();
                if bytes[0] != lo || bytes[1] != hi || bytes[2] != block {
                    return BindProgress::Ignored;
                }

                let (offset, len) = HOP_BLOCKS[block as usize];
                self.pending[offset..offset + len]
                    .copy_from_slice(&bytes[DATA_OFFSET..DATA_OFFSET + len]);

                self.stage = match stage {
                    BindStage::AwaitingHopBlock1 => BindStage::AwaitingHopBlock2,
                    BindStage::AwaitingHopBlock2 => BindStage::AwaitingHopBlock3,
                    _ => BindStage::Idle,
                };

                if self.stage == BindStage::Idle {
                    let mut record = BindRecord::UNBOUND;
                    record.address.copy_from_slice(&self.pending[..ADDRESS_WIDTH]);
                    record
                        .hop_channels
                        .copy_from_slice(&self.pending[ADDRESS_WIDTH..]);
                    BindProgress::Complete(record)
                } else {
                    BindProgress::Advanced(self.stage)
                }
            }
        }
    }
}

impl Default for BindSession {
    fn default() -> Self {
        Self::new()
    }
}
