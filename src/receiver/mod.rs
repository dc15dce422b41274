//! Receiver dispatcher
//!
//! `Receiver` owns every piece of receiver state and the platform. The
//! firmware's main loop calls [`Receiver::process`] as fast as it can; each
//! call is one pass through the fixed pipeline:
//!
//! 1. Tick bookkeeping (only when the system tick flag was raised)
//! 2. Bind button and bootloader trigger (tick-aligned)
//! 3. Bind handshake
//! 4. Failsafe, packet decoding and hopping (suppressed while binding)
//! 5. Status LED
//!
//! Interrupt handlers only raise flags in [`IrqFlags`]; all protocol logic
//! runs here, in the polling context.
//!
//! # Example
//!
//! ```ignore
//! use hoprx::core::irq::IRQ_FLAGS;
//! use hoprx::Receiver;
//!
//! let mut receiver = Receiver::new(board, ReceiverConfig::default())?;
//! receiver.init()?;
//! loop {
//!     if let Err(e) = receiver.process(&IRQ_FLAGS) {
//!         log_error!("Receiver pass failed: {}", e);
//!     }
//! }
//! ```

mod bind;
mod indicators;
mod link;


use crate::core::irq::IrqFlags;
use crate::core::log_buffer::{EventJournal, ReceiverEvent};
use crate::platform::{
    traits::{
        BindStorage, CrcMode, DataRate, Platform, RadioInterface, RadioIrq, ServoOutput,
    },
    Result,
};
use hoprx_core::config::{ADDRESS_WIDTH, BIND_RECORD_SIZE, PAYLOAD_SIZE};
use hoprx_core::failsafe::CENTERED;
use hoprx_core::{
    BindButton, BindRecord, BindSession, BindStage, ChannelOutputs, ConfigError,
    FailsafeController, HopSequence, HopTiming, LedStatus, ReceiverConfig, StatusLed, Timers,
    Timing,
};

/// Radio data pipe used for everything
const DATA_PIPE: u8 = 0;

/// Frequency-hopping receiver
pub struct Receiver<P: Platform> {
    platform: P,
    config: ReceiverConfig,
    timing: Timing,
    hop_timing: HopTiming,
    timers: Timers,
    channels: ChannelOutputs,
    failsafe: FailsafeController,
    record: BindRecord,
    hops: HopSequence,
    bind: BindSession,
    bind_requested: bool,
    status_before_bind: LedStatus,
    led_status: LedStatus,
    led: StatusLed,
    button: BindButton,
    journal: EventJournal,
}

impl<P: Platform> Receiver<P> {
    /// Create a receiver around `platform`
    ///
    /// No hardware is touched until [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroTick` if the tick period is zero.
    pub fn new(platform: P, config: ReceiverConfig) -> core::result::Result<Self, ConfigError> {
        let timing = Timing::from_config(&config)?;

        Ok(Self {
            platform,
            config,
            timing,
            hop_timing: HopTiming::default(),
            timers: Timers::new(),
            channels: CENTERED,
            failsafe: FailsafeController::new(),
            record: BindRecord::UNBOUND,
            hops: HopSequence::new(BindRecord::UNBOUND.hop_channels),
            bind: BindSession::new(),
            bind_requested: false,
            status_before_bind: LedStatus::Idle,
            led_status: LedStatus::Idle,
            led: StatusLed::new(),
            button: BindButton::new(),
            journal: EventJournal::new(),
        })
    }

    /// Bring the receiver up
    ///
    /// Latches centered outputs (still disabled), loads the bind record,
    /// arms the failsafe countdown and configures the radio to listen on
    /// the first hop channel.
    pub fn init(&mut self) -> Result<()> {
        self.channels = CENTERED;
        self.platform.servo().write_pulses(&self.channels)?;

        self.load_bind_record();
        self.hops.set_channels(self.record.hop_channels);

        self.failsafe = FailsafeController::new();
        self.timers.failsafe.reload(self.timing.failsafe_timeout);

        let radio = self.platform.radio();
        radio.power_up()?;
        radio.clear_ce()?;
        radio.enable_receiver()?;
        radio.set_crc(CrcMode::TwoBytes)?;
        radio.set_irq_source(RadioIrq::RxDataReady)?;
        radio.set_data_rate(DataRate::Kbps250)?;
        radio.set_auto_ack(DATA_PIPE, false)?;
        radio.set_address_width(ADDRESS_WIDTH as u8)?;
        radio.set_payload_size(DATA_PIPE, PAYLOAD_SIZE as u8)?;
        radio.set_rx_address(DATA_PIPE, &self.record.address)?;
        radio.set_channel(self.hops.current_channel())?;
        radio.flush_rx_fifo()?;
        radio.clear_irq(RadioIrq::RxDataReady)?;
        radio.set_ce()?;

        self.led_status = LedStatus::Idle;
        crate::log_info!("Receiver initialised");
        Ok(())
    }

    /// Run one pass of the receiver pipeline
    ///
    /// The system tick flag is taken once here and every tick-driven step
    /// in this pass sees the same, already decremented, timers.
    ///
    /// Does not return if the bind button was held long enough to enter the
    /// bootloader.
    pub fn process(&mut self, flags: &IrqFlags) -> Result<()> {
        let ticked = flags.systick.take();
        if ticked {
            self.timers.tick();
            self.process_bind_button()?;
        }

        self.process_binding(flags)?;
        self.process_receiving(flags)?;
        self.process_led()
    }

    fn load_bind_record(&mut self) {
        let mut buf = [0u8; BIND_RECORD_SIZE];
        self.record = match self.platform.storage().load(&mut buf) {
            Ok(()) => BindRecord::from_bytes(&buf).unwrap_or(BindRecord::UNBOUND),
            Err(e) => {
                crate::log_warn!("No valid bind data ({}), running unbound", e);
                self.journal.push(ReceiverEvent::BindLoadFailed(e));
                BindRecord::UNBOUND
            }
        };
    }

    /// Current servo outputs
    pub fn channels(&self) -> ChannelOutputs {
        self.channels
    }

    /// Status currently shown on the LED
    pub fn led_status(&self) -> LedStatus {
        self.led_status
    }

    /// Bind handshake stage
    pub fn bind_stage(&self) -> BindStage {
        self.bind.stage()
    }

    /// Check whether a bind handshake is running
    pub fn is_binding(&self) -> bool {
        self.bind.is_active()
    }

    /// Position in the hop table
    pub fn hop_index(&self) -> usize {
        self.hops.index()
    }

    /// Bind record in use
    pub fn record(&self) -> &BindRecord {
        &self.record
    }

    /// Failsafe state
    pub fn failsafe(&self) -> &FailsafeController {
        &self.failsafe
    }

    /// Tick-derived timing in use
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Event journal
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Event journal, for draining
    pub fn journal_mut(&mut self) -> &mut EventJournal {
        &mut self.journal
    }

    /// Borrow the platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutably borrow the platform
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Tear down the receiver, handing back the platform
    pub fn release(self) -> P {
        self.platform
    }
}
