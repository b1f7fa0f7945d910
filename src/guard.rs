//! At-most-once bring-up of the hosted network stack.

use embedded_hal_async::delay::DelayNs;

use crate::error::{Error, Result};
use crate::fmt::Debug2Format;
use crate::hal::{HostedStack, PowerControl, Transport};
use crate::link::{LinkStatus, LinkVerifier};
use crate::power::PowerSequencer;

/// One-way flag recording that the hosted stack is up.
///
/// Starts unset and can only be set by a successful
/// [`StackGuard::ensure_initialized`]. There is no way to clear it; a fresh
/// guard starts with a fresh latch.
#[derive(Debug, Default)]
pub struct InitLatch {
    set: bool,
}

impl InitLatch {
    /// An unset latch.
    pub const fn new() -> Self {
        Self { set: false }
    }

    /// Whether bring-up has completed.
    pub const fn is_set(&self) -> bool {
        self.set
    }

    fn set(&mut self) {
        self.set = true;
    }
}

/// Result of a successful [`StackGuard::ensure_initialized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readiness {
    /// An earlier call already brought the stack up; nothing was done.
    AlreadyReady,
    /// This call performed the bring-up.
    NewlyReady,
}

/// Owns the bring-up sequence and the latch that makes it run at most once.
///
/// Power sequencing, the link probe and hosted-stack init run in that
/// order; the latch is set only after all three succeed.
pub struct StackGuard<P, D, T: Transport, H> {
    power: PowerSequencer<P, D>,
    link: LinkVerifier<T>,
    hosted: H,
    latch: InitLatch,
}

impl<P, D, T, H> StackGuard<P, D, T, H>
where
    P: PowerControl,
    D: DelayNs,
    T: Transport,
    H: HostedStack<T::Handle>,
{
    /// Creates a guard with an unset latch.
    pub fn new(power: PowerSequencer<P, D>, link: LinkVerifier<T>, hosted: H) -> Self {
        Self {
            power,
            link,
            hosted,
            latch: InitLatch::new(),
        }
    }

    /// Brings the hosted stack up unless that already happened.
    ///
    /// Once the latch is set this returns [`Readiness::AlreadyReady`] without
    /// touching the hardware. Otherwise the module is power-cycled from off,
    /// the link is verified and the stack initialized.
    ///
    /// # Errors
    ///
    /// - [`Error::PowerControl`] if the power line fails
    /// - [`Error::Transport`] if the transport cannot be opened or probed
    /// - [`Error::InvalidState`] if the module does not answer the probe
    /// - [`Error::StackInit`] if the hosted stack refuses to initialize
    ///
    /// The latch stays unset on every error, so calling again reruns the
    /// whole sequence from the off state.
    pub async fn ensure_initialized(&mut self) -> Result<Readiness> {
        if self.latch.is_set() {
            return Ok(Readiness::AlreadyReady);
        }

        info!("Bringing up radio module...");
        self.power.bring_up().await?;

        match self.link.verify_link().await? {
            LinkStatus::Ready => {}
            LinkStatus::NotReady => {
                error!("Radio module not ready, bring-up aborted");
                return Err(Error::InvalidState);
            }
        }

        let handle = self.link.handle_mut().ok_or(Error::Transport)?;
        self.hosted.init(handle).await.map_err(|e| {
            error!("Failed to initialize hosted stack: {}", Debug2Format(&e));
            Error::StackInit
        })?;

        self.latch.set();
        info!("Hosted network stack initialized!");
        Ok(Readiness::NewlyReady)
    }

    /// Whether the stack is up.
    pub fn is_initialized(&self) -> bool {
        self.latch.is_set()
    }

    /// The latch scans are checked against.
    pub fn latch(&self) -> &InitLatch {
        &self.latch
    }

    /// The hosted stack, e.g. to reach the network interface it created.
    pub fn hosted(&self) -> &H {
        &self.hosted
    }
}
