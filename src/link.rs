//! Transport bring-up and liveness probe.

use crate::error::{Error, Result};
use crate::fmt::Debug2Format;
use crate::hal::{Probe, Transport};

/// Outcome of [`LinkVerifier::verify_link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// The module answered the probe.
    Ready,
    /// The link opened but the module stayed silent.
    NotReady,
}

/// Opens the transport to the radio module and checks that the module
/// answers over it.
///
/// The opened handle is kept so the hosted stack can run over the same link.
pub struct LinkVerifier<T: Transport> {
    transport: T,
    handle: Option<T::Handle>,
}

impl<T: Transport> LinkVerifier<T> {
    /// Wraps a transport. Nothing is opened until
    /// [`verify_link`](Self::verify_link).
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handle: None,
        }
    }

    /// Opens the transport and probes the module.
    ///
    /// Every call opens a fresh handle, replacing any earlier one. The handle
    /// is kept even when the module is not ready.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the transport cannot be opened or the
    /// probe itself fails. A silent module is not an error, it is
    /// [`LinkStatus::NotReady`].
    pub async fn verify_link(&mut self) -> Result<LinkStatus> {
        self.handle = None;

        let mut handle = self.transport.open().await.map_err(|e| {
            error!("Failed to open radio transport: {}", Debug2Format(&e));
            Error::Transport
        })?;

        let probe = self.transport.probe(&mut handle).await;
        self.handle = Some(handle);

        match probe {
            Ok(Probe::Ready) => {
                info!("Radio module answered probe");
                Ok(LinkStatus::Ready)
            }
            Ok(Probe::NotReady) => {
                warn!("Radio module did not answer probe");
                Ok(LinkStatus::NotReady)
            }
            Err(e) => {
                error!("Radio probe failed: {}", Debug2Format(&e));
                Err(Error::Transport)
            }
        }
    }

    /// Handle opened by the last [`verify_link`](Self::verify_link), if any.
    pub fn handle_mut(&mut self) -> Option<&mut T::Handle> {
        self.handle.as_mut()
    }
}
