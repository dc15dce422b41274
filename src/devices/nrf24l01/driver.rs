//! nRF24L01 driver implementation

use super::registers::{
    self, Config, FifoStatus, RfSetup, Status, EN_AA_RESET, EN_RXADDR_RESET, MAX_PAYLOAD_SIZE,
    PIPE_COUNT,
};
use crate::platform::{
    error::{PlatformError, RadioError},
    traits::{CrcMode, DataRate, GpioInterface, RadioInterface, RadioIrq, SpiInterface},
    Result,
};

/// Longest register write: command byte plus a 5-byte address
const MAX_REGISTER_WRITE: usize = 6;

/// nRF24L01 driver
///
/// # Type Parameters
///
/// * `SPI` - SPI device with the radio's CSN as chip select
/// * `CE` - Chip-enable output pin
pub struct Nrf24l01<SPI, CE> {
    spi: SPI,
    ce: CE,
    config: Config,
    en_aa: u8,
    en_rxaddr: u8,
    rf_setup: RfSetup,
}

impl<SPI, CE> Nrf24l01<SPI, CE>
where
    SPI: SpiInterface,
    CE: GpioInterface,
{
    /// Create a driver assuming the chip is in its power-on state
    pub fn new(spi: SPI, ce: CE) -> Self {
        Self {
            spi,
            ce,
            config: Config::RESET,
            en_aa: EN_AA_RESET,
            en_rxaddr: EN_RXADDR_RESET,
            rf_setup: RfSetup::RESET,
        }
    }

    /// Release the bus and pin
    pub fn release(self) -> (SPI, CE) {
        (self.spi, self.ce)
    }

    /// Shadowed CONFIG register
    pub fn config(&self) -> Config {
        self.config
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.spi
            .write(&[registers::W_REGISTER | (reg & registers::REGISTER_MASK), value])
    }

    fn write_register_bytes(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        if data.len() >= MAX_REGISTER_WRITE {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }

        let mut frame = [0u8; MAX_REGISTER_WRITE];
        frame[0] = registers::W_REGISTER | (reg & registers::REGISTER_MASK);
        frame[1..=data.len()].copy_from_slice(data);
        self.spi.write(&frame[..=data.len()])
    }

    fn read_register(&mut self, reg: u8) -> Result<u8> {
        let mut frame = [registers::R_REGISTER | (reg & registers::REGISTER_MASK), registers::NOP];
        self.spi.transfer_in_place(&mut frame)?;
        Ok(frame[1])
    }

    fn write_config(&mut self) -> Result<()> {
        self.write_register(registers::CONFIG, self.config.bits())
    }

    fn check_pipe(pipe: u8) -> Result<()> {
        if pipe < PIPE_COUNT {
            Ok(())
        } else {
            Err(PlatformError::Radio(RadioError::InvalidPipe))
        }
    }
}

fn irq_mask(irq: RadioIrq) -> Config {
    match irq {
        RadioIrq::RxDataReady => Config::MASK_RX_DR,
        RadioIrq::TxDataSent => Config::MASK_TX_DS,
        RadioIrq::MaxRetransmits => Config::MASK_MAX_RT,
    }
}

fn irq_status(irq: RadioIrq) -> Status {
    match irq {
        RadioIrq::RxDataReady => Status::RX_DR,
        RadioIrq::TxDataSent => Status::TX_DS,
        RadioIrq::MaxRetransmits => Status::MAX_RT,
    }
}

impl<SPI, CE> RadioInterface for Nrf24l01<SPI, CE>
where
    SPI: SpiInterface,
    CE: GpioInterface,
{
    fn power_up(&mut self) -> Result<()> {
        self.config.insert(Config::PWR_UP);
        self.write_config()
    }

    fn set_ce(&mut self) -> Result<()> {
        self.ce.set_high()
    }

    fn clear_ce(&mut self) -> Result<()> {
        self.ce.set_low()
    }

    fn enable_receiver(&mut self) -> Result<()> {
        self.config.insert(Config::PRIM_RX);
        self.write_config()
    }

    fn set_crc(&mut self, mode: CrcMode) -> Result<()> {
        match mode {
            CrcMode::Disabled => self.config.remove(Config::EN_CRC | Config::CRCO),
            CrcMode::OneByte => {
                self.config.insert(Config::EN_CRC);
                self.config.remove(Config::CRCO);
            }
            CrcMode::TwoBytes => self.config.insert(Config::EN_CRC | Config::CRCO),
        }
        self.write_config()
    }

    fn set_irq_source(&mut self, irq: RadioIrq) -> Result<()> {
        // A set mask bit keeps that condition off the IRQ pin
        self.config.remove(Config::MASK_ALL);
        self.config.insert(Config::MASK_ALL.difference(irq_mask(irq)));
        self.write_config()
    }

    fn set_data_rate(&mut self, rate: DataRate) -> Result<()> {
        self.rf_setup.remove(RfSetup::RF_DR_LOW | RfSetup::RF_DR_HIGH);
        match rate {
            DataRate::Kbps250 => self.rf_setup.insert(RfSetup::RF_DR_LOW),
            DataRate::Mbps1 => {}
            DataRate::Mbps2 => self.rf_setup.insert(RfSetup::RF_DR_HIGH),
        }
        self.write_register(registers::RF_SETUP, self.rf_setup.bits())
    }

    fn set_auto_ack(&mut self, pipe: u8, enabled: bool) -> Result<()> {
        Self::check_pipe(pipe)?;
        if enabled {
            self.en_aa |= 1 << pipe;
        } else {
            self.en_aa &= !(1 << pipe);
        }
        self.write_register(registers::EN_AA, self.en_aa)
    }

    fn set_address_width(&mut self, width: u8) -> Result<()> {
        if !(3..=5).contains(&width) {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }
        self.write_register(registers::SETUP_AW, width - 2)
    }

    fn set_payload_size(&mut self, pipe: u8, size: u8) -> Result<()> {
        Self::check_pipe(pipe)?;
        if size > MAX_PAYLOAD_SIZE {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }
        self.write_register(registers::RX_PW_P0 + pipe, size)?;

        if size > 0 && self.en_rxaddr & (1 << pipe) == 0 {
            self.en_rxaddr |= 1 << pipe;
            self.write_register(registers::EN_RXADDR, self.en_rxaddr)?;
        }
        Ok(())
    }

    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<()> {
        Self::check_pipe(pipe)?;

        // Pipes 2-5 share the upper address bytes of pipe 1
        let valid = match pipe {
            0 | 1 => (3..=5).contains(&address.len()),
            _ => address.len() == 1,
        };
        if !valid {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }

        self.write_register_bytes(registers::RX_ADDR_P0 + pipe, address)
    }

    fn set_channel(&mut self, channel: u8) -> Result<()> {
        self.write_register(registers::RF_CH, channel & registers::RF_CH_MASK)
    }

    fn flush_rx_fifo(&mut self) -> Result<()> {
        self.spi.write(&[registers::FLUSH_RX])
    }

    fn is_rx_fifo_empty(&mut self) -> Result<bool> {
        let fifo = FifoStatus::from_bits_truncate(self.read_register(registers::FIFO_STATUS)?);
        Ok(fifo.contains(FifoStatus::RX_EMPTY))
    }

    fn read_payload(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() > MAX_PAYLOAD_SIZE as usize {
            return Err(PlatformError::Radio(RadioError::InvalidConfig));
        }

        let mut frame = [registers::NOP; MAX_PAYLOAD_SIZE as usize + 1];
        frame[0] = registers::R_RX_PAYLOAD;
        let frame = &mut frame[..=buf.len()];
        self.spi.transfer_in_place(frame)?;
        buf.copy_from_slice(&frame[1..]);
        Ok(())
    }

    fn clear_irq(&mut self, irq: RadioIrq) -> Result<()> {
        self.write_register(registers::STATUS, irq_status(irq).bits())
    }
}
