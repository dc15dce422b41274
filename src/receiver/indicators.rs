//! Bind button and status LED

use super::Receiver;
use crate::platform::{
    traits::{GpioInterface, Platform},
    Result,
};
use hoprx_core::{ButtonEvent, LedCommand};

impl<P: Platform> Receiver<P> {
    /// Sample the bind button; called once per system tick
    pub(super) fn process_bind_button(&mut self) -> Result<()> {
        let level = self.platform.bind_button().read()?;
        let pressed = level != self.config.button_active_low;

        match self
            .button
            .sample(pressed, &mut self.timers.button, self.timing.isp_timeout)
        {
            ButtonEvent::EnterBootloader => {
                crate::log_warn!("Launching ISP");
                // Best effort; the jump happens regardless
                let _ = self.drive_led(LedCommand::Off);
                self.platform.enter_bootloader()
            }
            ButtonEvent::BindRequested => self.bind_requested = true,
            ButtonEvent::Pressed | ButtonEvent::Idle => {}
        }
        Ok(())
    }

    pub(super) fn process_led(&mut self) -> Result<()> {
        match self
            .led
            .update(self.led_status, &mut self.timers.blink, &self.timing)
        {
            Some(command) => self.drive_led(command),
            None => Ok(()),
        }
    }

    fn drive_led(&mut self, command: LedCommand) -> Result<()> {
        let active_low = self.config.led_active_low;
        let led = self.platform.status_led();
        match command {
            LedCommand::On => led.set_level(!active_low),
            LedCommand::Off => led.set_level(active_low),
            LedCommand::Toggle => led.toggle(),
        }
    }
}
