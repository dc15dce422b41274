//! Hop sequence tracking
//!
//! The transmitter steps through a 20-entry channel table on a fixed period.
//! The receiver follows by hopping whenever its hop timer fires, and restarts
//! the timer on every received packet to stay in phase. After too many
//! consecutive hops without a packet the lock is considered lost and the
//! receiver parks on the first channel until the transmitter comes around.

use crate::config::{FIRST_HOP_TIME_US, HOP_CHANNEL_COUNT, HOP_TIME_US, MAX_HOPS_WITHOUT_PACKET};

/// What to do after a hop-timer expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HopAction {
    /// Tune to this channel and keep following the sequence
    Hop(u8),
    /// Too many misses; perform a full receive restart
    Restart,
}

/// Position in the hop table and missed-packet bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HopSequence {
    channels: [u8; HOP_CHANNEL_COUNT],
    index: usize,
    misses: u32,
}

impl HopSequence {
    /// Create a sequence positioned at the first channel
    pub const fn new(channels: [u8; HOP_CHANNEL_COUNT]) -> Self {
        Self {
            channels,
            index: 0,
            misses: 0,
        }
    }

    /// Replace the channel table (after binding)
    pub fn set_channels(&mut self, channels: [u8; HOP_CHANNEL_COUNT]) {
        self.channels = channels;
        self.index = 0;
        self.misses = 0;
    }

    /// Go back to the first channel and forget missed hops
    ///
    /// Returns the channel to tune to.
    pub fn restart(&mut self) -> u8 {
        self.index = 0;
        self.misses = 0;
        self.channels[0]
    }

    /// A packet arrived on the current channel
    pub fn on_packet(&mut self) {
        self.misses = 0;
    }

    /// The hop timer fired
    pub fn on_hop_timer(&mut self) -> HopAction {
        self.misses += 1;

        if self.misses > MAX_HOPS_WITHOUT_PACKET {
            return HopAction::Restart;
        }

        self.index = (self.index + 1) % HOP_CHANNEL_COUNT;
        HopAction::Hop(self.channels[self.index])
    }

    /// Current index into the hop table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Consecutive hops without a packet
    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Channel the receiver should currently be on
    pub fn current_channel(&self) -> u8 {
        self.channels[self.index]
    }
}

/// Hop-timer programming values
///
/// The timer runs with a period of [`HOP_TIME_US`], but right after a packet
/// its counter is preloaded so the first expiry comes after only
/// [`FIRST_HOP_TIME_US`]. That puts the receiver on the next channel ahead of
/// the transmitter's next packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HopTiming {
    /// Delay from packet to first hop (µs)
    pub first_hop_us: u32,
    /// Steady-state hop period (µs)
    pub hop_us: u32,
}

impl HopTiming {
    /// Counter value to preload after a packet
    pub fn initial_count(&self) -> u32 {
        self.hop_us.saturating_sub(self.first_hop_us)
    }

    /// Match/reload value for a free-running up-counter with `hop_us` period
    pub fn reload(&self) -> u32 {
        self.hop_us.saturating_sub(1)
    }
}

impl Default for HopTiming {
    fn default() -> Self {
        Self {
            first_hop_us: FIRST_HOP_TIME_US,
            hop_us: HOP_TIME_US,
        }
    }
}
