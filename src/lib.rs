//! Radio bring-up and Wi-Fi scanning
//!
//! This library powers a companion radio module, checks that it answers
//! over its transport, initializes the network stack hosted on it exactly
//! once, and runs access-point scans whose results the caller owns.
//!
//! ## Features
//!
//! - Power sequencing with mandatory settle delays
//! - Idempotent stack bring-up guarded by an owned one-way latch
//! - Diagnostic scans printed to any `core::fmt::Write` sink
//! - Owned-result scans with drain-on-allocation-failure
//! - Allocation-free record formatting
//! - Hardware behind async capability traits, so tests can run on the host
//!
//! The `defmt` feature routes the crate's logging to `defmt`.
//!
//! ## Example
//!
//! ```ignore
//! use wifi_scan::{BringUpConfig, Radio, ScanConfiguration};
//!
//! let mut radio = Radio::new(power, delay, transport, hosted, stack, BringUpConfig::default());
//! radio.ensure_initialized().await?;
//!
//! let result = radio.scan(&ScanConfiguration::default()).await?;
//! for ap in &result {
//!     // ...
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Must stay first so the macros are visible to the modules below.
#[macro_use]
mod fmt;

/// Bring-up timing and scan parameters
pub mod config;

/// Error kinds
pub mod error;

/// Record formatting and label tables
pub mod format;

/// Bring-up latch
pub mod guard;

/// Hardware capability traits
pub mod hal;

/// Transport probe
pub mod link;

/// Radio power sequencing
pub mod power;

/// Bring-up and scanning facade
pub mod radio;

/// Access-point records
pub mod record;

/// Scan engine
pub mod scan;

pub use config::{BringUpConfig, DIAGNOSTIC_CAPACITY, ScanConfiguration, ScanType, StationConfig};
pub use error::{Error, Result};
pub use guard::{InitLatch, Readiness, StackGuard};
pub use hal::{HostedStack, NetworkStack, PowerControl, Probe, RadioState, Transport};
pub use link::{LinkStatus, LinkVerifier};
pub use power::PowerSequencer;
pub use radio::Radio;
pub use record::{AccessPointRecord, AuthMode, Bssid, CipherSuite, PhyCapabilities, Ssid, WifiMode};
pub use scan::{ScanEngine, ScanResult};
