//! Bring-up timing and scan parameters.

use core::time::Duration;

use crate::record::{Bssid, Ssid};

/// Records held by the fixed buffer of a diagnostic scan.
pub const DIAGNOSTIC_CAPACITY: usize = 20;

/// Settle delays used while power-cycling the radio module.
///
/// Shortening these, or skipping the off phase, is the usual reason a module
/// never answers the link probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringUpConfig {
    /// How long the module is held off before being switched on.
    pub off_settle: Duration,
    /// How long the module is given to boot its application firmware.
    pub boot_settle: Duration,
}

impl BringUpConfig {
    /// Default hold time in the off state.
    pub const DEFAULT_OFF_SETTLE: Duration = Duration::from_millis(50);
    /// Default boot time after power-on.
    pub const DEFAULT_BOOT_SETTLE: Duration = Duration::from_millis(1000);

    /// Overrides the off-state hold time.
    pub const fn with_off_settle(mut self, off_settle: Duration) -> Self {
        self.off_settle = off_settle;
        self
    }

    /// Overrides the boot time.
    pub const fn with_boot_settle(mut self, boot_settle: Duration) -> Self {
        self.boot_settle = boot_settle;
        self
    }
}

impl Default for BringUpConfig {
    fn default() -> Self {
        Self {
            off_settle: Self::DEFAULT_OFF_SETTLE,
            boot_settle: Self::DEFAULT_BOOT_SETTLE,
        }
    }
}

/// How each channel is listened to during a scan.
///
/// A zero duration leaves the choice to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanType {
    /// Send probe requests and wait between `min` and `max` per channel.
    Active {
        /// Minimum dwell per channel.
        min: Duration,
        /// Maximum dwell per channel.
        max: Duration,
    },
    /// Only listen for beacons, for `dwell` per channel.
    Passive {
        /// Dwell per channel.
        dwell: Duration,
    },
}

impl ScanType {
    /// Active scan with device-default dwell times.
    pub const ACTIVE_DEFAULT: ScanType = ScanType::Active {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    /// Whether probe requests are sent.
    pub const fn is_active(&self) -> bool {
        matches!(self, ScanType::Active { .. })
    }
}

impl Default for ScanType {
    fn default() -> Self {
        Self::ACTIVE_DEFAULT
    }
}

/// Filters and timing for one scan.
///
/// The default scans every channel for every network with device-default
/// dwell times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfiguration {
    /// Only report networks with this name.
    pub ssid: Option<Ssid>,
    /// Only report this access point.
    pub bssid: Option<Bssid>,
    /// Only scan this channel. `None` scans all of them.
    pub channel: Option<u8>,
    /// Probe or listen.
    pub scan_type: ScanType,
    /// Also report networks that hide their SSID.
    pub show_hidden: bool,
}

impl ScanConfiguration {
    /// Restricts the scan to one network name.
    pub fn with_ssid(mut self, ssid: Ssid) -> Self {
        self.ssid = Some(ssid);
        self
    }

    /// Restricts the scan to one access point.
    pub fn with_bssid(mut self, bssid: Bssid) -> Self {
        self.bssid = Some(bssid);
        self
    }

    /// Restricts the scan to one channel.
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Sets the scan type.
    pub fn with_scan_type(mut self, scan_type: ScanType) -> Self {
        self.scan_type = scan_type;
        self
    }

    /// Includes hidden networks.
    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }
}

/// Per-interface station configuration applied before a scan.
///
/// The default is the empty configuration: no network to join, so the
/// station is free to roam every channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationConfig {
    /// Network to join.
    pub ssid: Option<Ssid>,
    /// Access point to join.
    pub bssid: Option<Bssid>,
    /// Channel hint.
    pub channel: Option<u8>,
}
