//! Bind handshake driving

use super::{Receiver, DATA_PIPE};
use crate::core::irq::IrqFlags;
use crate::core::log_buffer::ReceiverEvent;
use crate::platform::{
    traits::{BindStorage, Platform, RadioInterface},
    Result,
};
use hoprx_core::config::{BIND_ADDRESS, BIND_CHANNEL};
use hoprx_core::{BindProgress, BindRecord, LedStatus};

impl<P: Platform> Receiver<P> {
    /// Start, time out, or feed the bind handshake
    ///
    /// Returns early without touching the radio FIFO unless a bind is
    /// requested or running.
    pub(super) fn process_binding(&mut self, flags: &IrqFlags) -> Result<()> {
        if !self.bind.is_active() {
            if self.bind_requested {
                self.start_binding()?;
            }
            return Ok(());
        }

        if self.timers.bind.is_expired() {
            self.bind.cancel();
            self.led_status = self.status_before_bind;
            self.finish_binding(flags)?;
            crate::log_warn!("Bind timeout");
            self.journal.push(ReceiverEvent::BindTimeout);
            return Ok(());
        }

        if !flags.packet.take() {
            return Ok(());
        }

        let Some(payload) = self.drain_rx_fifo()? else {
            return Ok(());
        };

        match self.bind.accept(&payload) {
            BindProgress::Ignored => {}
            BindProgress::Advanced(stage) => {
                crate::log_debug!("Bind stage {:?}", stage);
            }
            BindProgress::Complete(record) => self.complete_binding(record, flags)?,
        }

        Ok(())
    }

    fn start_binding(&mut self) -> Result<()> {
        self.bind_requested = false;
        self.status_before_bind = self.led_status;
        self.led_status = LedStatus::Binding;
        self.bind.start();
        self.timers.bind.reload(self.timing.bind_timeout);

        crate::log_info!("Starting bind procedure");
        self.journal.push(ReceiverEvent::BindStarted);

        let radio = self.platform.radio();
        radio.clear_ce()?;
        radio.set_rx_address(DATA_PIPE, &BIND_ADDRESS)?;
        radio.set_channel(BIND_CHANNEL)?;
        radio.set_ce()
    }

    fn complete_binding(&mut self, record: BindRecord, flags: &IrqFlags) -> Result<()> {
        if let Err(e) = self.platform.storage().save(&record.to_bytes()) {
            crate::log_error!("Failed to store bind data: {}", e);
            self.journal.push(ReceiverEvent::BindStoreFailed(e));
        }

        self.record = record;
        self.hops.set_channels(record.hop_channels);
        self.led_status = LedStatus::Idle;
        self.finish_binding(flags)?;

        crate::log_info!("Bind successful");
        self.journal.push(ReceiverEvent::BindComplete);
        Ok(())
    }

    /// Common exit path: back to normal receiving on the current record
    fn finish_binding(&mut self, flags: &IrqFlags) -> Result<()> {
        self.timers.failsafe.reload(self.timing.failsafe_timeout);
        self.bind_requested = false;
        self.restart_packet_receiving(flags)
    }
}
