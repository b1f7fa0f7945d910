//! Error kinds surfaced by bring-up and scanning.

use core::fmt;

/// Failure kinds returned by [`StackGuard`](crate::guard::StackGuard) and
/// [`ScanEngine`](crate::scan::ScanEngine).
///
/// Collaborator errors are logged where they are mapped, so the kind alone is
/// what travels up to the caller. Nothing in this crate retries on its own:
/// a failed bring-up leaves the latch unset and the caller may call
/// `ensure_initialized` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Driving the radio power line failed.
    PowerControl,
    /// The transport to the radio module could not be opened or probed.
    Transport,
    /// The radio module answered the probe as not ready.
    InvalidState,
    /// The hosted network stack refused to initialize.
    StackInit,
    /// A scan was requested before a successful bring-up.
    StackNotInitialized,
    /// Switching mode, configuring, starting or stopping the stack failed.
    StackControl,
    /// Storage for the scan records could not be allocated.
    ///
    /// The device-side scan results have already been drained when this is
    /// returned.
    OutOfMemory,
    /// Starting the scan, counting or fetching its records failed.
    ScanFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::PowerControl => "radio power control failed",
            Error::Transport => "transport to radio module failed",
            Error::InvalidState => "radio module not ready",
            Error::StackInit => "hosted network stack initialization failed",
            Error::StackNotInitialized => "network stack not initialized",
            Error::StackControl => "network stack control call failed",
            Error::OutOfMemory => "out of memory for scan results",
            Error::ScanFailure => "network scan failed",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
