//! Power sequencing for the radio module.

use core::time::Duration;

use embedded_hal_async::delay::DelayNs;

use crate::config::BringUpConfig;
use crate::error::{Error, Result};
use crate::fmt::Debug2Format;
use crate::hal::{PowerControl, RadioState};

/// Walks the radio module through its power states with the mandatory
/// settle delays in between.
pub struct PowerSequencer<P, D> {
    power: P,
    delay: D,
    config: BringUpConfig,
}

impl<P, D> PowerSequencer<P, D>
where
    P: PowerControl,
    D: DelayNs,
{
    /// Creates a sequencer over a power line and a delay source.
    pub fn new(power: P, delay: D, config: BringUpConfig) -> Self {
        Self {
            power,
            delay,
            config,
        }
    }

    /// Switches the module into `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PowerControl`] if the power line rejects the change.
    pub async fn set_radio_power(&mut self, state: RadioState) -> Result<()> {
        debug!("radio power -> {}", state);
        self.power.set(state).await.map_err(|e| {
            error!(
                "Failed to switch radio power to {}: {}",
                state,
                Debug2Format(&e)
            );
            Error::PowerControl
        })
    }

    /// Power-cycles the module into application mode.
    ///
    /// The module is switched off and held there for
    /// [`off_settle`](BringUpConfig::off_settle), then switched on and given
    /// [`boot_settle`](BringUpConfig::boot_settle) before returning. No
    /// step is retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PowerControl`] if either switch fails. The sequence
    /// stops at the failing step.
    pub async fn bring_up(&mut self) -> Result<()> {
        self.set_radio_power(RadioState::Off).await?;
        settle(&mut self.delay, self.config.off_settle).await;

        self.set_radio_power(RadioState::ApplicationMode).await?;
        settle(&mut self.delay, self.config.boot_settle).await;

        info!("Radio module powered up");
        Ok(())
    }

    /// Timing in use.
    pub fn config(&self) -> &BringUpConfig {
        &self.config
    }

    /// Gives back the power line and delay source.
    pub fn release(self) -> (P, D) {
        (self.power, self.delay)
    }
}

async fn settle<D: DelayNs>(delay: &mut D, duration: Duration) {
    let micros = u32::try_from(duration.as_micros()).unwrap_or(u32::MAX);
    delay.delay_us(micros).await;
}
