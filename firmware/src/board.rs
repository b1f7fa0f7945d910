//! Board wiring for the radio module's power.

use core::convert::Infallible;

use esp_hal::gpio::Output;
use wifi_scan::{PowerControl, RadioState};

/// Radio power switched by a GPIO enable line: low holds the module off,
/// high runs it.
pub struct RadioPower<'d> {
    enable: Output<'d>,
}

impl<'d> RadioPower<'d> {
    /// Wraps the enable line. Configure the pin low so the module starts off.
    pub fn new(enable: Output<'d>) -> Self {
        Self { enable }
    }
}

impl PowerControl for RadioPower<'_> {
    type Error = Infallible;

    async fn set(&mut self, state: RadioState) -> Result<(), Infallible> {
        match state {
            RadioState::Off => self.enable.set_low(),
            RadioState::ApplicationMode => self.enable.set_high(),
        }
        Ok(())
    }
}
