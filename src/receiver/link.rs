//! Packet reception, hopping and failsafe

use super::{Receiver, DATA_PIPE};
use crate::core::irq::IrqFlags;
use crate::core::log_buffer::ReceiverEvent;
use crate::platform::{
    traits::{HopTimer, Platform, RadioInterface, RadioIrq, ServoOutput},
    Result,
};
use hoprx_core::config::PAYLOAD_SIZE;
use hoprx_core::{FailsafeCommand, Frame, HopAction, LedStatus, Payload};

impl<P: Platform> Receiver<P> {
    /// Failsafe check, then fresh radio data, then a pending hop
    ///
    /// A packet reprograms the hop timer and discards a hop request left
    /// over from the previous slot.
    pub(super) fn process_receiving(&mut self, flags: &IrqFlags) -> Result<()> {
        if self.bind.is_active() {
            return Ok(());
        }

        self.process_failsafe()?;

        if flags.packet.take() {
            if let Some(payload) = self.drain_rx_fifo()? {
                self.restart_hop_timer(flags)?;
                self.handle_frame(Frame::decode(&payload))?;
            }
        }

        if flags.hop_timer.take() {
            self.perform_hop(flags)?;
        }

        Ok(())
    }

    fn process_failsafe(&mut self) -> Result<()> {
        let was_engaged = self.failsafe.is_engaged();
        let Some(pulses) = self.failsafe.poll(&self.timers.failsafe) else {
            return Ok(());
        };

        self.channels = pulses;
        self.platform.servo().write_pulses(&self.channels)?;
        self.led_status = LedStatus::Failsafe;

        if !was_engaged {
            crate::log_warn!("Failsafe engaged");
            self.journal.push(ReceiverEvent::FailsafeEngaged);
        }
        Ok(())
    }

    fn handle_frame(&mut self, frame: Frame) -> Result<()> {
        match frame {
            Frame::Sticks(sticks) => {
                self.channels = sticks.pulses();
                let servo = self.platform.servo();
                servo.write_pulses(&self.channels)?;

                // Arm only once the outputs are really on, so a failed
                // enable is retried with the next stick frame
                if !self.failsafe.is_armed() {
                    servo.enable()?;
                    crate::log_info!("Servo outputs enabled");
                    self.journal.push(ReceiverEvent::OutputsEnabled);
                }
                self.failsafe.on_stick_data();

                self.timers.failsafe.reload(self.timing.failsafe_timeout);
                self.led_status = LedStatus::Receiving;
            }
            Frame::Failsafe(command) => {
                let before = *self.failsafe.profile();
                self.failsafe.apply(command);
                let changed = before != *self.failsafe.profile();

                match command {
                    FailsafeCommand::Enable(_) => {
                        if changed {
                            self.journal.push(ReceiverEvent::FailsafeProfileSet);
                        }
                    }
                    FailsafeCommand::Disable => {
                        self.timers.failsafe.reload(self.timing.failsafe_timeout);
                        if changed {
                            self.journal.push(ReceiverEvent::FailsafeProfileCleared);
                        }
                    }
                }
            }
            Frame::Unknown(_) => {}
        }
        Ok(())
    }

    fn perform_hop(&mut self, flags: &IrqFlags) -> Result<()> {
        match self.hops.on_hop_timer() {
            HopAction::Restart => {
                crate::log_debug!("Lost hop sync, restarting");
                self.journal.push(ReceiverEvent::LinkRestarted);
                self.restart_packet_receiving(flags)
            }
            HopAction::Hop(channel) => {
                let radio = self.platform.radio();
                radio.clear_ce()?;
                radio.set_channel(channel)?;
                radio.set_ce()
            }
        }
    }

    /// Read the receive FIFO until empty, keeping the newest frame
    pub(super) fn drain_rx_fifo(&mut self) -> Result<Option<Payload>> {
        let radio = self.platform.radio();
        let mut newest = None;

        while !radio.is_rx_fifo_empty()? {
            let mut buf = [0u8; PAYLOAD_SIZE];
            radio.read_payload(&mut buf)?;
            newest = Some(Payload::new(buf));
        }
        radio.clear_irq(RadioIrq::RxDataReady)?;

        Ok(newest)
    }

    /// Schedule the next hop relative to a packet that just arrived
    fn restart_hop_timer(&mut self, flags: &IrqFlags) -> Result<()> {
        self.hops.on_packet();

        let timer = self.platform.hop_timer();
        timer.stop()?;
        // An expiry that fired before the stop belongs to the old slot
        flags.hop_timer.clear();

        timer.set_count(self.hop_timing.initial_count())?;
        timer.set_reload(self.hop_timing.reload())?;
        timer.start()
    }

    /// Go back to the first hop channel and wait for a packet
    ///
    /// The hop timer stays stopped until the next packet restarts it.
    pub(super) fn restart_packet_receiving(&mut self, flags: &IrqFlags) -> Result<()> {
        let channel = self.hops.restart();

        self.platform.radio().clear_ce()?;
        self.platform.hop_timer().stop()?;
        flags.hop_timer.clear();

        let radio = self.platform.radio();
        radio.set_rx_address(DATA_PIPE, &self.record.address)?;
        radio.set_channel(channel)?;
        radio.set_ce()
    }
}
