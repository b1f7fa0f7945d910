//! Scan backend over the esp-radio Wi-Fi controller.

use alloc::vec::Vec;

use esp_radio::wifi::{
    AccessPointInfo, AuthMethod, ClientConfig, ModeConfig, ScanConfig, ScanTypeConfig,
    WifiController, WifiError,
};
use wifi_scan::{
    AccessPointRecord, AuthMode, Bssid, NetworkStack, ScanConfiguration, ScanType, Ssid,
    StationConfig, WifiMode,
};

use crate::types::take_controller;

/// Most results esp-radio is asked to keep per scan.
const SCAN_MAX_RESULTS: usize = 64;

/// Errors of the scan backend.
#[derive(Debug)]
pub enum StationError {
    /// The Wi-Fi controller has not been created yet.
    NoController,
    /// esp-radio has no such mode.
    UnsupportedMode(WifiMode),
    /// The driver rejected the call.
    Wifi(WifiError),
}

impl From<WifiError> for StationError {
    fn from(e: WifiError) -> Self {
        StationError::Wifi(e)
    }
}

/// [`NetworkStack`] over esp-radio's `WifiController`.
///
/// esp-radio returns all results at the end of a scan, so they are held here
/// until fetched, the way the ESP-IDF driver holds its record list.
pub struct EspStation {
    controller: Option<WifiController<'static>>,
    results: Vec<AccessPointInfo>,
}

impl EspStation {
    /// The controller is claimed on first use, after bring-up created it.
    pub fn new() -> Self {
        Self {
            controller: None,
            results: Vec::new(),
        }
    }

    fn controller(&mut self) -> Result<&mut WifiController<'static>, StationError> {
        if self.controller.is_none() {
            self.controller = take_controller();
        }
        self.controller.as_mut().ok_or(StationError::NoController)
    }
}

impl Default for EspStation {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkStack for EspStation {
    type Error = StationError;

    async fn set_mode(&mut self, mode: WifiMode) -> Result<(), StationError> {
        let mode = match mode {
            WifiMode::Station => esp_radio::wifi::WifiMode::Sta,
            WifiMode::AccessPoint => esp_radio::wifi::WifiMode::Ap,
            WifiMode::AccessPointStation => esp_radio::wifi::WifiMode::ApSta,
            WifiMode::Null => return Err(StationError::UnsupportedMode(mode)),
        };
        self.controller()?.set_mode(mode)?;
        Ok(())
    }

    async fn configure(&mut self, config: &StationConfig) -> Result<(), StationError> {
        let mut client = ClientConfig::default();
        if let Some(ssid) = config.ssid.as_ref().and_then(Ssid::as_str) {
            client = client.with_ssid(ssid.into());
        }
        if let Some(bssid) = config.bssid {
            client = client.with_bssid(bssid.octets());
        }
        if let Some(channel) = config.channel {
            client = client.with_channel(channel);
        }
        self.controller()?.set_config(&ModeConfig::Client(client))?;
        Ok(())
    }

    async fn start(&mut self) -> Result<(), StationError> {
        self.controller()?.start_async().await?;
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), StationError> {
        self.controller()?.stop_async().await?;
        Ok(())
    }

    // esp-radio only offers scans that run to completion, so `block` has no
    // effect.
    async fn scan_start(
        &mut self,
        config: &ScanConfiguration,
        _block: bool,
    ) -> Result<(), StationError> {
        self.results.clear();

        let mut scan = ScanConfig::default()
            .with_show_hidden(config.show_hidden)
            .with_scan_type(scan_type(config.scan_type))
            .with_max(SCAN_MAX_RESULTS);
        if let Some(ssid) = config.ssid.as_ref().and_then(Ssid::as_str) {
            scan = scan.with_ssid(ssid);
        }
        if let Some(bssid) = config.bssid {
            scan = scan.with_bssid(bssid.octets());
        }
        if let Some(channel) = config.channel {
            scan = scan.with_channel(channel);
        }

        self.results = self.controller()?.scan_with_config_async(scan).await?;
        Ok(())
    }

    async fn scan_count(&mut self) -> Result<usize, StationError> {
        Ok(self.results.len())
    }

    async fn scan_fetch(
        &mut self,
        records: &mut [AccessPointRecord],
    ) -> Result<usize, StationError> {
        let filled = records.len().min(self.results.len());
        for (slot, ap) in records.iter_mut().zip(self.results.drain(..)) {
            *slot = to_record(&ap);
        }
        self.results.clear();
        Ok(filled)
    }
}

fn scan_type(scan_type: ScanType) -> ScanTypeConfig {
    let millis = |d: core::time::Duration| {
        esp_hal::time::Duration::from_millis(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    };
    match scan_type {
        ScanType::Active { min, max } if min.is_zero() && max.is_zero() => {
            ScanTypeConfig::default()
        }
        ScanType::Active { min, max } => ScanTypeConfig::Active {
            min: millis(min),
            max: millis(max),
        },
        ScanType::Passive { dwell } => ScanTypeConfig::Passive(millis(dwell)),
    }
}

// esp-radio reports neither ciphers nor PHY modes; those stay at their
// defaults.
fn to_record(ap: &AccessPointInfo) -> AccessPointRecord {
    AccessPointRecord {
        ssid: Ssid::truncated(ap.ssid.as_bytes()),
        bssid: Bssid(ap.bssid),
        rssi: ap.signal_strength,
        auth_mode: ap.auth_method.map_or(AuthMode::Unknown(u8::MAX), auth_mode),
        primary_channel: ap.channel,
        ..Default::default()
    }
}

fn auth_mode(method: AuthMethod) -> AuthMode {
    match method {
        AuthMethod::None => AuthMode::Open,
        AuthMethod::Wep => AuthMode::Wep,
        AuthMethod::Wpa => AuthMode::WpaPsk,
        AuthMethod::Wpa2Personal => AuthMode::Wpa2Psk,
        AuthMethod::WpaWpa2Personal => AuthMode::WpaWpa2Psk,
        AuthMethod::Wpa2Enterprise => AuthMode::Wpa2Enterprise,
        AuthMethod::Wpa3Personal => AuthMode::Wpa3Psk,
        AuthMethod::Wpa2Wpa3Personal => AuthMode::Wpa2Wpa3Psk,
        AuthMethod::WapiPersonal => AuthMode::WapiPsk,
        #[allow(unreachable_patterns)]
        _ => AuthMode::Unknown(u8::MAX),
    }
}
