//! Access-point records and the enumerations they carry.

use core::fmt;

/// Longest SSID an access point can advertise, in bytes.
pub const SSID_MAX_LEN: usize = 32;

/// Network name as advertised over the air.
///
/// Raw bytes: hidden networks report an empty SSID and nothing guarantees
/// the bytes are UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ssid(heapless::Vec<u8, SSID_MAX_LEN>);

impl Ssid {
    /// Builds an SSID from raw bytes, or `None` if longer than
    /// [`SSID_MAX_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        heapless::Vec::from_slice(bytes).ok().map(Self)
    }

    /// Builds an SSID from raw bytes, dropping anything past
    /// [`SSID_MAX_LEN`].
    pub fn truncated(bytes: &[u8]) -> Self {
        let len = bytes.len().min(SSID_MAX_LEN);
        // Cannot fail: len is clamped to the capacity.
        Self(heapless::Vec::from_slice(&bytes[..len]).unwrap_or_default())
    }

    /// Raw SSID bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The SSID as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    /// Whether the access point hides its name.
    pub fn is_hidden(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&str> for Ssid {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_bytes(value.as_bytes()).ok_or(())
    }
}

/// Writes the SSID, replacing invalid UTF-8 sequences with U+FFFD.
impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{FFFD}")?;
            }
        }
        Ok(())
    }
}

/// Hardware address of one access point radio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bssid(pub [u8; 6]);

impl Bssid {
    /// Raw address octets.
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl From<[u8; 6]> for Bssid {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

/// Canonical `AA:BB:CC:DD:EE:FF` form, always 17 characters.
impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Authentication mode advertised by an access point.
///
/// [`AuthMode::from_raw`] follows the ESP-IDF `wifi_auth_mode_t` numbering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum AuthMode {
    #[default]
    Open,
    Wep,
    WpaPsk,
    Wpa2Psk,
    WpaWpa2Psk,
    Wpa2Enterprise,
    Wpa3Psk,
    Wpa2Wpa3Psk,
    WapiPsk,
    Owe,
    Wpa3Enterprise192,
    /// A code this crate has no name for.
    Unknown(u8),
}

impl AuthMode {
    /// Maps a raw driver code onto an [`AuthMode`].
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => AuthMode::Open,
            1 => AuthMode::Wep,
            2 => AuthMode::WpaPsk,
            3 => AuthMode::Wpa2Psk,
            4 => AuthMode::WpaWpa2Psk,
            5 => AuthMode::Wpa2Enterprise,
            6 => AuthMode::Wpa3Psk,
            7 => AuthMode::Wpa2Wpa3Psk,
            8 => AuthMode::WapiPsk,
            9 => AuthMode::Owe,
            10 => AuthMode::Wpa3Enterprise192,
            other => AuthMode::Unknown(other),
        }
    }
}

/// Pairwise or group cipher suite, numbered as ESP-IDF `wifi_cipher_type_t`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum CipherSuite {
    #[default]
    None,
    Wep40,
    Wep104,
    Tkip,
    Ccmp,
    TkipCcmp,
    AesCmac128,
    Sms4,
    Gcmp,
    Gcmp256,
    AesGmac128,
    AesGmac256,
    /// A code this crate has no name for.
    Unknown(u8),
}

impl CipherSuite {
    /// Maps a raw driver code onto a [`CipherSuite`].
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => CipherSuite::None,
            1 => CipherSuite::Wep40,
            2 => CipherSuite::Wep104,
            3 => CipherSuite::Tkip,
            4 => CipherSuite::Ccmp,
            5 => CipherSuite::TkipCcmp,
            6 => CipherSuite::AesCmac128,
            7 => CipherSuite::Sms4,
            8 => CipherSuite::Gcmp,
            9 => CipherSuite::Gcmp256,
            10 => CipherSuite::AesGmac128,
            11 => CipherSuite::AesGmac256,
            other => CipherSuite::Unknown(other),
        }
    }
}

/// Operating mode of the network stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum WifiMode {
    #[default]
    Null,
    Station,
    AccessPoint,
    AccessPointStation,
}

/// 802.11 PHY modes an access point advertises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyCapabilities {
    /// 802.11b
    pub b: bool,
    /// 802.11g
    pub g: bool,
    /// 802.11n
    pub n: bool,
}

impl PhyCapabilities {
    /// Whether any PHY flag is set.
    pub const fn any(&self) -> bool {
        self.b || self.g || self.n
    }
}

/// One network observed by a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct AccessPointRecord {
    pub ssid: Ssid,
    pub bssid: Bssid,
    /// Received signal strength in dBm.
    pub rssi: i8,
    pub auth_mode: AuthMode,
    pub pairwise_cipher: CipherSuite,
    pub group_cipher: CipherSuite,
    pub primary_channel: u8,
    pub phy: PhyCapabilities,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn ssid_rejects_overlong_names() {
        assert!(Ssid::from_bytes(&[b'a'; SSID_MAX_LEN]).is_some());
        assert!(Ssid::from_bytes(&[b'a'; SSID_MAX_LEN + 1]).is_none());
        assert_eq!(Ssid::truncated(&[b'a'; 40]).as_bytes().len(), SSID_MAX_LEN);
    }

    #[test]
    fn ssid_display_replaces_invalid_utf8() {
        let ssid = Ssid::from_bytes(b"caf\xff!").unwrap();
        assert_eq!(ssid.to_string(), "caf\u{FFFD}!");
        assert_eq!(ssid.as_str(), None);
    }

    #[test]
    fn hidden_ssid_is_empty() {
        let ssid = Ssid::default();
        assert!(ssid.is_hidden());
        assert_eq!(ssid.to_string(), "");
    }

    #[test]
    fn raw_codes_outside_the_table_are_unknown() {
        assert_eq!(AuthMode::from_raw(3), AuthMode::Wpa2Psk);
        assert_eq!(AuthMode::from_raw(200), AuthMode::Unknown(200));
        assert_eq!(CipherSuite::from_raw(4), CipherSuite::Ccmp);
        assert_eq!(CipherSuite::from_raw(99), CipherSuite::Unknown(99));
    }
}
