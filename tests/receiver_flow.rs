//! End-to-end receiver flows on a bench platform
//!
//! The bench board pairs the mock radio and outputs with bind records kept
//! on simulated flash, so binding survives a power cycle the same way it
//! does on hardware.

#![cfg(feature = "mock")]

use hoprx::core::irq::{self, IrqFlags, IRQ_FLAGS};
use hoprx::core::log_buffer::ReceiverEvent;
use hoprx::core::persist::FlashBindStorage;
use hoprx::platform::mock::{MockFlash, MockGpio, MockHopTimer, MockRadio, MockServo};
use hoprx::platform::Platform;
use hoprx::Receiver;
use hoprx_core::config::{BIND_CHANNEL, PAYLOAD_SIZE};
use hoprx_core::failsafe::CENTERED;
use hoprx_core::{BindRecord, LedStatus, ReceiverConfig};

const BIND_SLOT: u32 = 0x3c00;

struct BenchBoard {
    radio: MockRadio,
    servo: MockServo,
    hop_timer: MockHopTimer,
    storage: FlashBindStorage<MockFlash>,
    led: MockGpio,
    button: MockGpio,
}

impl BenchBoard {
    fn new(flash: MockFlash) -> Self {
        let mut button = MockGpio::new_input();
        button.set_input_state(true);
        let mut led = MockGpio::new_output();
        led.set_input_state(true);

        Self {
            radio: MockRadio::new(),
            servo: MockServo::new(),
            hop_timer: MockHopTimer::new(),
            storage: FlashBindStorage::new(flash, BIND_SLOT).unwrap(),
            led,
            button,
        }
    }

    fn power_off(self) -> MockFlash {
        self.storage.release()
    }
}

impl Platform for BenchBoard {
    type Radio = MockRadio;
    type Servo = MockServo;
    type HopTimer = MockHopTimer;
    type Storage = FlashBindStorage<MockFlash>;
    type Led = MockGpio;
    type Button = MockGpio;

    fn radio(&mut self) -> &mut MockRadio {
        &mut self.radio
    }

    fn servo(&mut self) -> &mut MockServo {
        &mut self.servo
    }

    fn hop_timer(&mut self) -> &mut MockHopTimer {
        &mut self.hop_timer
    }

    fn storage(&mut self) -> &mut FlashBindStorage<MockFlash> {
        &mut self.storage
    }

    fn status_led(&mut self) -> &mut MockGpio {
        &mut self.led
    }

    fn bind_button(&mut self) -> &mut MockGpio {
        &mut self.button
    }

    fn enter_bootloader(&mut self) -> ! {
        panic!("bootloader entered")
    }
}

fn power_on(flash: MockFlash) -> Receiver<BenchBoard> {
    let mut rx = Receiver::new(BenchBoard::new(flash), ReceiverConfig::default()).unwrap();
    rx.init().unwrap();
    rx
}

fn transmitter_record() -> BindRecord {
    BindRecord {
        address: [0x5e, 0x11, 0xc0, 0xde, 0x42],
        hop_channels: [
            3, 77, 21, 58, 9, 66, 34, 12, 80, 45, 27, 71, 6, 39, 53, 18, 62, 30, 74, 15,
        ],
    }
}

fn bind_frames(record: &BindRecord) -> [[u8; PAYLOAD_SIZE]; 4] {
    let checksum: u16 = record.address.iter().map(|&b| b as u16).sum();
    let [lo, hi] = checksum.to_le_bytes();
    let h = &record.hop_channels;

    [
        [
            0xff,
            0xaa,
            0x55,
            record.address[0],
            record.address[1],
            record.address[2],
            record.address[3],
            record.address[4],
            0,
            0,
        ],
        [lo, hi, 0, h[0], h[1], h[2], h[3], h[4], h[5], h[6]],
        [lo, hi, 1, h[7], h[8], h[9], h[10], h[11], h[12], h[13]],
        [lo, hi, 2, h[14], h[15], h[16], h[17], h[18], h[19], 0],
    ]
}

fn sticks(pulses: [u16; 3]) -> [u8; PAYLOAD_SIZE] {
    let [a0, a1] = (0xffff - pulses[0]).to_le_bytes();
    let [b0, b1] = (0xffff - pulses[1]).to_le_bytes();
    let [c0, c1] = (0xffff - pulses[2]).to_le_bytes();
    [a0, a1, b0, b1, c0, c1, 0, 0x55, 0, 0]
}

fn failsafe_setup(pulses: [u16; 3]) -> [u8; PAYLOAD_SIZE] {
    let mut frame = sticks(pulses);
    frame[7] = 0xaa;
    frame[8] = 0x5a;
    frame
}

fn receive(rx: &mut Receiver<BenchBoard>, flags: &IrqFlags, frame: [u8; PAYLOAD_SIZE]) {
    assert!(rx.platform_mut().radio.push_rx(frame));
    flags.packet.raise();
    rx.process(flags).unwrap();
}

fn tick(rx: &mut Receiver<BenchBoard>, flags: &IrqFlags, n: u32) {
    for _ in 0..n {
        flags.systick.raise();
        rx.process(flags).unwrap();
    }
}

fn bind(rx: &mut Receiver<BenchBoard>, flags: &IrqFlags, record: &BindRecord) {
    rx.platform_mut().button.set_input_state(false);
    tick(rx, flags, 1);
    rx.platform_mut().button.set_input_state(true);
    tick(rx, flags, 1);
    assert!(rx.is_binding());

    for frame in bind_frames(record) {
        receive(rx, flags, frame);
    }
    assert!(!rx.is_binding());
}

#[test]
fn bind_survives_power_cycle() {
    let flags = IrqFlags::new();
    let mut rx = power_on(MockFlash::new());
    assert_eq!(*rx.record(), BindRecord::UNBOUND);

    bind(&mut rx, &flags, &transmitter_record());
    assert_eq!(*rx.record(), transmitter_record());

    let rx = power_on(rx.release().power_off());
    assert_eq!(*rx.record(), transmitter_record());
    assert_eq!(rx.platform().radio.rx_address(), transmitter_record().address);
    assert_eq!(
        rx.platform().radio.channel(),
        transmitter_record().hop_channels[0]
    );
    assert!(rx.journal().is_empty());
}

#[test]
fn corrupted_bind_slot_boots_unbound() {
    let flags = IrqFlags::new();
    let mut rx = power_on(MockFlash::new());
    bind(&mut rx, &flags, &transmitter_record());

    let mut flash = rx.release().power_off();
    flash.inject_corruption(BIND_SLOT + 10, 1);

    let rx = power_on(flash);
    assert_eq!(*rx.record(), BindRecord::UNBOUND);
    assert!(rx
        .journal()
        .iter()
        .any(|event| matches!(event, ReceiverEvent::BindLoadFailed(_))));
}

#[test]
fn rebinding_replaces_stored_record() {
    let flags = IrqFlags::new();
    let mut rx = power_on(MockFlash::new());
    bind(&mut rx, &flags, &transmitter_record());

    let mut second = transmitter_record();
    second.address = [0x01, 0x02, 0x03, 0x04, 0x05];
    second.hop_channels.reverse();
    bind(&mut rx, &flags, &second);

    let rx = power_on(rx.release().power_off());
    assert_eq!(*rx.record(), second);
}

#[test]
fn flight_with_signal_loss_and_recovery() {
    let flags = IrqFlags::new();
    let mut rx = power_on(MockFlash::new());
    bind(&mut rx, &flags, &transmitter_record());
    let table = transmitter_record().hop_channels;

    // Outputs stay dark until the transmitter sends sticks
    tick(&mut rx, &flags, 100);
    assert!(!rx.platform().servo.is_enabled());
    assert_eq!(rx.channels(), CENTERED);

    receive(&mut rx, &flags, failsafe_setup([1000, 1500, 1100]));
    receive(&mut rx, &flags, sticks([1800, 1500, 1600]));
    assert!(rx.platform().servo.is_enabled());
    assert_eq!(rx.led_status(), LedStatus::Receiving);

    // Follow the transmitter across the table
    rx.platform_mut().radio.clear_channel_history();
    for slot in 1..=5 {
        flags.hop_timer.raise();
        rx.process(&flags).unwrap();
        receive(&mut rx, &flags, sticks([1800, 1500, 1600 + slot as u16]));
    }
    assert_eq!(rx.platform().radio.channel_history(), &table[1..=5]);
    assert_eq!(rx.channels(), [1800, 1500, 1605]);

    // Transmitter goes silent
    let timeout = rx.timing().failsafe_timeout;
    tick(&mut rx, &flags, timeout);
    assert_eq!(rx.channels(), [1000, 1500, 1100]);
    assert_eq!(rx.platform().servo.pulses(), [1000, 1500, 1100]);
    assert_eq!(rx.led_status(), LedStatus::Failsafe);

    // Hop timer keeps running blind until it gives up and parks on channel 0
    for _ in 0..16 {
        flags.hop_timer.raise();
        rx.process(&flags).unwrap();
    }
    assert_eq!(rx.hop_index(), 0);
    assert_eq!(rx.platform().radio.channel(), table[0]);
    assert!(!rx.platform().hop_timer.is_running());

    // Transmitter comes back
    receive(&mut rx, &flags, sticks([1500, 1500, 1500]));
    assert_eq!(rx.channels(), [1500, 1500, 1500]);
    assert_eq!(rx.led_status(), LedStatus::Receiving);
    assert!(rx.platform().hop_timer.is_running());
    assert!(rx
        .journal()
        .iter()
        .any(|event| *event == ReceiverEvent::LinkRestarted));
}

#[test]
fn bind_listens_on_fixed_channel_then_returns() {
    let flags = IrqFlags::new();
    let mut rx = power_on(MockFlash::new());

    rx.platform_mut().button.set_input_state(false);
    tick(&mut rx, &flags, 1);
    rx.platform_mut().button.set_input_state(true);
    tick(&mut rx, &flags, 1);
    assert_eq!(rx.platform().radio.channel(), BIND_CHANNEL);
    assert_eq!(rx.led_status(), LedStatus::Binding);

    let timeout = rx.timing().bind_timeout;
    tick(&mut rx, &flags, timeout);
    assert!(!rx.is_binding());
    assert_eq!(rx.led_status(), LedStatus::Idle);
    assert_ne!(rx.platform().radio.channel(), BIND_CHANNEL);
    assert_eq!(rx.platform().radio.rx_address(), BindRecord::UNBOUND.address);
}

#[test]
fn interrupt_handlers_feed_the_dispatcher() {
    let mut rx = power_on(MockFlash::new());
    bind(&mut rx, &IrqFlags::new(), &transmitter_record());

    assert!(rx.platform_mut().radio.push_rx(sticks([1200, 1300, 1400])));
    irq::on_radio_irq();
    irq::on_systick();
    rx.process(&IRQ_FLAGS).unwrap();
    assert_eq!(rx.channels(), [1200, 1300, 1400]);

    irq::on_hop_timer_irq();
    rx.process(&IRQ_FLAGS).unwrap();
    assert_eq!(rx.hop_index(), 1);
    assert!(!IRQ_FLAGS.packet.is_raised());
    assert!(!IRQ_FLAGS.systick.is_raised());
}

#[test]
#[should_panic(expected = "bootloader entered")]
fn holding_bind_button_enters_bootloader() {
    let flags = IrqFlags::new();
    let mut rx = power_on(MockFlash::new());
    let window = rx.timing().isp_timeout;

    rx.platform_mut().button.set_input_state(false);
    tick(&mut rx, &flags, window + 1);
}
