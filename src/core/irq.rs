//! Interrupt handoff flags
//!
//! Interrupt handlers never touch receiver state. Each source owns exactly
//! one flag: the handler raises it and returns, and the polling loop takes
//! (reads and clears) it on its next pass.
//!
//! ```ignore
//! #[interrupt]
//! fn PININT0() {
//!     hoprx::core::irq::on_radio_irq();
//! }
//!
//! loop {
//!     receiver.process(&IRQ_FLAGS)?;
//! }
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

/// Single-writer, single-reader event flag
#[derive(Debug, Default)]
pub struct IrqFlag(AtomicBool);

impl IrqFlag {
    /// Create a lowered flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Signal the event (interrupt context)
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Read and clear the flag (polling context)
    pub fn take(&self) -> bool {
        // thumbv6m has no atomic swap
        critical_section::with(|_| {
            let raised = self.0.load(Ordering::Acquire);
            self.0.store(false, Ordering::Release);
            raised
        })
    }

    /// Drop a pending event without observing it
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    /// Check the flag without clearing it
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The receiver's interrupt sources
#[derive(Debug, Default)]
pub struct IrqFlags {
    /// Radio signalled RX data ready
    pub packet: IrqFlag,
    /// Hop timer reached its match value
    pub hop_timer: IrqFlag,
    /// System tick elapsed
    pub systick: IrqFlag,
}

impl IrqFlags {
    /// Create a set of lowered flags
    pub const fn new() -> Self {
        Self {
            packet: IrqFlag::new(),
            hop_timer: IrqFlag::new(),
            systick: IrqFlag::new(),
        }
    }
}

/// Flags raised by the firmware's interrupt handlers
pub static IRQ_FLAGS: IrqFlags = IrqFlags::new();

/// Radio IRQ pin handler body
pub fn on_radio_irq() {
    IRQ_FLAGS.packet.raise();
}

/// Hop timer match handler body
pub fn on_hop_timer_irq() {
    IRQ_FLAGS.hop_timer.raise();
}

/// SysTick handler body
pub fn on_systick() {
    IRQ_FLAGS.systick.raise();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let flag = IrqFlag::new();
        assert!(!flag.take());

        flag.raise();
        assert!(flag.is_raised());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_repeated_raises_coalesce() {
        let flag = IrqFlag::new();
        flag.raise();
        flag.raise();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_clear_discards() {
        let flags = IrqFlags::new();
        flags.hop_timer.raise();
        flags.hop_timer.clear();
        assert!(!flags.hop_timer.take());
    }

    #[test]
    fn test_handlers_raise_their_own_flag() {
        on_systick();
        assert!(IRQ_FLAGS.systick.take());
        assert!(!IRQ_FLAGS.packet.is_raised());
    }
}
