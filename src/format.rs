//! Human-readable rendering of access-point records.
//!
//! Everything here is pure: labels come from static tables and strings are
//! built in fixed-capacity buffers, so formatting never allocates.

use core::fmt::{self, Write};

use heapless::String;

use crate::record::{AccessPointRecord, AuthMode, Bssid, CipherSuite, PhyCapabilities, WifiMode};

/// Length of a formatted BSSID.
pub const BSSID_LABEL_LEN: usize = 17;

/// Longest PHY label, `"1/b/g/n"`.
pub const PHY_LABEL_LEN: usize = 7;

/// Label for values missing from a table.
pub const UNKNOWN_LABEL: &str = "unknown";

static AUTH_MODE_LABELS: [(AuthMode, &str); 11] = [
    (AuthMode::Open, "WIFI_AUTH_OPEN"),
    (AuthMode::Wep, "WIFI_AUTH_WEP"),
    (AuthMode::WpaPsk, "WIFI_AUTH_WPA_PSK"),
    (AuthMode::Wpa2Psk, "WIFI_AUTH_WPA2_PSK"),
    (AuthMode::WpaWpa2Psk, "WIFI_AUTH_WPA_WPA2_PSK"),
    (AuthMode::Wpa2Enterprise, "WIFI_AUTH_WPA2_ENTERPRISE"),
    (AuthMode::Wpa3Psk, "WIFI_AUTH_WPA3_PSK"),
    (AuthMode::Wpa2Wpa3Psk, "WIFI_AUTH_WPA2_WPA3_PSK"),
    (AuthMode::WapiPsk, "WIFI_AUTH_WAPI_PSK"),
    (AuthMode::Owe, "WIFI_AUTH_OWE"),
    (AuthMode::Wpa3Enterprise192, "WIFI_AUTH_WPA3_ENT_192"),
];

static CIPHER_LABELS: [(CipherSuite, &str); 12] = [
    (CipherSuite::None, "WIFI_CIPHER_TYPE_NONE"),
    (CipherSuite::Wep40, "WIFI_CIPHER_TYPE_WEP40"),
    (CipherSuite::Wep104, "WIFI_CIPHER_TYPE_WEP104"),
    (CipherSuite::Tkip, "WIFI_CIPHER_TYPE_TKIP"),
    (CipherSuite::Ccmp, "WIFI_CIPHER_TYPE_CCMP"),
    (CipherSuite::TkipCcmp, "WIFI_CIPHER_TYPE_TKIP_CCMP"),
    (CipherSuite::AesCmac128, "WIFI_CIPHER_TYPE_AES_CMAC128"),
    (CipherSuite::Sms4, "WIFI_CIPHER_TYPE_SMS4"),
    (CipherSuite::Gcmp, "WIFI_CIPHER_TYPE_GCMP"),
    (CipherSuite::Gcmp256, "WIFI_CIPHER_TYPE_GCMP256"),
    (CipherSuite::AesGmac128, "WIFI_CIPHER_TYPE_AES_GMAC128"),
    (CipherSuite::AesGmac256, "WIFI_CIPHER_TYPE_AES_GMAC256"),
];

static WIFI_MODE_LABELS: [(WifiMode, &str); 4] = [
    (WifiMode::Null, "WIFI_MODE_NULL"),
    (WifiMode::Station, "WIFI_MODE_STA"),
    (WifiMode::AccessPoint, "WIFI_MODE_AP"),
    (WifiMode::AccessPointStation, "WIFI_MODE_APSTA"),
];

fn lookup<K: PartialEq>(table: &[(K, &'static str)], key: &K) -> &'static str {
    table
        .iter()
        .find(|(k, _)| k == key)
        .map_or(UNKNOWN_LABEL, |&(_, label)| label)
}

/// Label for an authentication mode.
pub fn auth_mode_label(mode: AuthMode) -> &'static str {
    lookup(&AUTH_MODE_LABELS, &mode)
}

/// Label for a cipher suite.
pub fn cipher_label(cipher: CipherSuite) -> &'static str {
    lookup(&CIPHER_LABELS, &cipher)
}

/// Label for a network stack mode.
pub fn wifi_mode_label(mode: WifiMode) -> &'static str {
    lookup(&WIFI_MODE_LABELS, &mode)
}

/// Uppercase, colon-separated BSSID, e.g. `47:00:DF:97:5A:EE`.
pub fn format_bssid(bssid: &Bssid) -> String<BSSID_LABEL_LEN> {
    let mut out = String::new();
    // 17 characters always fit.
    let _ = write!(out, "{bssid}");
    out
}

/// PHY capability label.
///
/// `"1"` followed by `"/b"`, `"/g"`, `"/n"` for each supported mode, in that
/// order. Empty when no mode is advertised.
pub fn phy_label(phy: &PhyCapabilities) -> String<PHY_LABEL_LEN> {
    let mut out = String::new();
    if !phy.any() {
        return out;
    }
    let _ = out.push('1');
    for (present, tag) in [(phy.b, "/b"), (phy.g, "/g"), (phy.n, "/n")] {
        if present {
            let _ = out.push_str(tag);
        }
    }
    out
}

/// Display strings for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    /// See [`format_bssid`].
    pub bssid: String<BSSID_LABEL_LEN>,
    /// See [`phy_label`].
    pub phy: String<PHY_LABEL_LEN>,
    /// See [`auth_mode_label`].
    pub auth_mode: &'static str,
    /// See [`cipher_label`].
    pub pairwise_cipher: &'static str,
    /// See [`cipher_label`].
    pub group_cipher: &'static str,
}

/// Renders every displayable field of `record`.
pub fn format_record(record: &AccessPointRecord) -> FormattedRecord {
    FormattedRecord {
        bssid: format_bssid(&record.bssid),
        phy: phy_label(&record.phy),
        auth_mode: auth_mode_label(record.auth_mode),
        pairwise_cipher: cipher_label(record.pairwise_cipher),
        group_cipher: cipher_label(record.group_cipher),
    }
}

/// Writes the console line for one record:
/// `AP <BSSID> <SSID> rssi=<rssi><phy>\r\n`.
pub fn write_scan_line<W: Write>(out: &mut W, record: &AccessPointRecord) -> fmt::Result {
    let formatted = format_record(record);
    write!(
        out,
        "AP {} {} rssi={}{}\r\n",
        formatted.bssid, record.ssid, record.rssi, formatted.phy
    )
}
