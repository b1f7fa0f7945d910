//! Capability traits for the hardware this crate drives.
//!
//! The core never touches a peripheral directly. A board crate implements
//! these traits over its HAL; tests implement them over a simulated radio.
//! Every trait carries its own error type, which the core logs and maps to
//! an [`Error`](crate::Error) kind.

use core::fmt::Debug;

use crate::config::{ScanConfiguration, StationConfig};
use crate::record::{AccessPointRecord, WifiMode};

/// Power states of the radio module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioState {
    /// Module unpowered or held in reset.
    Off,
    /// Module running its application firmware.
    ApplicationMode,
}

/// Answer to a link probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Probe {
    /// The module answered.
    Ready,
    /// The module did not answer yet.
    NotReady,
}

/// Drives the radio module's power line.
#[allow(async_fn_in_trait)]
pub trait PowerControl {
    /// Error reported by the power line.
    type Error: Debug;

    /// Switches the module into `state`.
    async fn set(&mut self, state: RadioState) -> Result<(), Self::Error>;
}

/// Low-level link to the radio module.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Open link, kept around for the hosted stack.
    type Handle;
    /// Error reported by the link.
    type Error: Debug;

    /// Opens the link.
    async fn open(&mut self) -> Result<Self::Handle, Self::Error>;

    /// Asks the module whether it is alive.
    ///
    /// `Ok(Probe::NotReady)` means the module did not answer; `Err` means the
    /// link itself failed.
    async fn probe(&mut self, handle: &mut Self::Handle) -> Result<Probe, Self::Error>;
}

/// Network stack hosted on top of the radio module.
#[allow(async_fn_in_trait)]
pub trait HostedStack<H> {
    /// Error reported by the stack.
    type Error: Debug;

    /// Initializes the stack over an open link. Called at most once per
    /// successful bring-up.
    async fn init(&mut self, link: &mut H) -> Result<(), Self::Error>;
}

/// Wi-Fi control surface of the hosted stack.
///
/// Results of the last scan stay on the device until fetched. Fetching into
/// an empty slice discards them.
#[allow(async_fn_in_trait)]
pub trait NetworkStack {
    /// Error reported by the stack.
    type Error: Debug;

    /// Switches the operating mode.
    async fn set_mode(&mut self, mode: WifiMode) -> Result<(), Self::Error>;

    /// Applies the station interface configuration.
    async fn configure(&mut self, config: &StationConfig) -> Result<(), Self::Error>;

    /// Starts the Wi-Fi driver.
    async fn start(&mut self) -> Result<(), Self::Error>;

    /// Stops the Wi-Fi driver.
    async fn stop(&mut self) -> Result<(), Self::Error>;

    /// Starts a scan. With `block` set, returns once the scan has completed.
    async fn scan_start(
        &mut self,
        config: &ScanConfiguration,
        block: bool,
    ) -> Result<(), Self::Error>;

    /// Number of access points found by the last scan.
    async fn scan_count(&mut self) -> Result<usize, Self::Error>;

    /// Moves up to `records.len()` results into `records` and returns how
    /// many were written. Releases the device-side result list.
    async fn scan_fetch(&mut self, records: &mut [AccessPointRecord]) -> Result<usize, Self::Error>;
}
