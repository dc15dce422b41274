//! Receiver event journal
//!
//! Fixed-capacity record of notable receiver events, for a debug console or
//! test harness to drain. Uses heapless HistoryBuf for no-allocation storage.
//!
//! - Oldest event is evicted when full
//! - Overflow tracking for diagnostics
//! - Oldest-first iteration order

use crate::platform::PlatformError;
use heapless::{HistoryBuf, Vec};

/// Journal capacity in events
pub const JOURNAL_SIZE: usize = 16;

/// Notable receiver event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverEvent {
    /// Stored bind record was missing or invalid at startup
    BindLoadFailed(PlatformError),
    /// Bind handshake started
    BindStarted,
    /// Bind handshake completed and the new record is in use
    BindComplete,
    /// Bind handshake gave up
    BindTimeout,
    /// New bind record could not be persisted
    BindStoreFailed(PlatformError),
    /// First stick data since power-up; servo outputs switched on
    OutputsEnabled,
    /// Too many missed hops; hop sequence restarted
    LinkRestarted,
    /// Failsafe outputs asserted
    FailsafeEngaged,
    /// Transmitter supplied failsafe positions
    FailsafeProfileSet,
    /// Transmitter disabled its failsafe positions
    FailsafeProfileCleared,
}

/// Ring buffer of receiver events
pub struct EventJournal {
    buffer: HistoryBuf<ReceiverEvent, JOURNAL_SIZE>,
    overflow_count: u32,
}

impl EventJournal {
    /// Create an empty journal
    pub const fn new() -> Self {
        Self {
            buffer: HistoryBuf::new(),
            overflow_count: 0,
        }
    }

    /// Record an event, evicting the oldest if full
    pub fn push(&mut self, event: ReceiverEvent) {
        if self.buffer.len() == JOURNAL_SIZE {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
        self.buffer.write(event);
    }

    /// Number of events held
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Return true if the journal is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Number of events lost to eviction
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Iterate over events in oldest-first order
    pub fn iter(&self) -> impl Iterator<Item = &ReceiverEvent> {
        self.buffer.oldest_ordered()
    }

    /// Check whether `event` is currently held
    pub fn contains(&self, event: &ReceiverEvent) -> bool {
        self.iter().any(|e| e == event)
    }

    /// Remove and return all events, oldest first
    pub fn drain(&mut self) -> Vec<ReceiverEvent, JOURNAL_SIZE> {
        let mut result = Vec::new();
        for event in self.buffer.oldest_ordered() {
            let _ = result.push(*event);
        }
        self.buffer.clear();
        result
    }
}

impl Default for EventJournal {
    fn default() -> Self {
        Self::new()
    }
}
