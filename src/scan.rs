//! Network scanning against an initialized stack.

use alloc::vec::Vec;
use core::fmt::Write;
use core::ops::Deref;

use crate::config::{DIAGNOSTIC_CAPACITY, ScanConfiguration, ScanType, StationConfig};
use crate::error::{Error, Result};
use crate::fmt::Debug2Format;
use crate::format::write_scan_line;
use crate::guard::InitLatch;
use crate::hal::NetworkStack;
use crate::record::{AccessPointRecord, WifiMode};

/// Records returned by [`ScanEngine::scan`].
///
/// The caller owns the storage; dropping the result (or calling
/// [`release`](Self::release)) frees it. Every slot holds a record filled by
/// the device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    records: Vec<AccessPointRecord>,
}

impl ScanResult {
    /// Number of access points found.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no access point was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in the order the device reported them.
    pub fn as_slice(&self) -> &[AccessPointRecord] {
        &self.records
    }

    /// Iterates over the records.
    pub fn iter(&self) -> core::slice::Iter<'_, AccessPointRecord> {
        self.records.iter()
    }

    /// Record with the strongest signal.
    pub fn strongest(&self) -> Option<&AccessPointRecord> {
        self.records.iter().max_by_key(|record| record.rssi)
    }

    /// Takes the underlying storage.
    pub fn into_records(self) -> Vec<AccessPointRecord> {
        self.records
    }

    /// Frees the storage.
    pub fn release(self) {}
}

impl Deref for ScanResult {
    type Target = [AccessPointRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl IntoIterator for ScanResult {
    type Item = AccessPointRecord;
    type IntoIter = alloc::vec::IntoIter<AccessPointRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a AccessPointRecord;
    type IntoIter = core::slice::Iter<'a, AccessPointRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Runs scans on a [`NetworkStack`].
pub struct ScanEngine<N> {
    stack: N,
}

impl<N: NetworkStack> ScanEngine<N> {
    /// Wraps a network stack.
    pub fn new(stack: N) -> Self {
        Self { stack }
    }

    /// Scans with default parameters and writes one line per network to
    /// `out`.
    ///
    /// Meant for bring-up diagnostics: it assumes the network interface
    /// exists, does not check the init latch and reports at most
    /// [`DIAGNOSTIC_CAPACITY`] networks from a fixed buffer that is dropped
    /// before returning.
    ///
    /// # Returns
    ///
    /// The number of networks written to `out`.
    ///
    /// # Errors
    ///
    /// - [`Error::StackControl`] if station mode cannot be set or the stack
    ///   cannot be started
    /// - [`Error::ScanFailure`] if the scan, count or fetch fails, or `out`
    ///   rejects a line
    pub async fn scan_diagnostic<W: Write>(&mut self, out: &mut W) -> Result<usize> {
        self.set_station_mode().await?;
        self.start().await?;

        let config = ScanConfiguration::default();
        self.scan_blocking(&config).await?;
        let found = self.count().await?;
        info!("Found {} networks", found);

        let mut buffer: [AccessPointRecord; DIAGNOSTIC_CAPACITY] =
            core::array::from_fn(|_| AccessPointRecord::default());
        let filled = self.fetch(&mut buffer).await?;

        for record in &buffer[..filled] {
            write_scan_line(out, record).map_err(|_| Error::ScanFailure)?;
        }
        Ok(filled)
    }

    /// Scans and hands the records to the caller.
    ///
    /// Nothing touches the radio unless `latch` is set. Once it is, the stack
    /// is stopped, switched to station mode with an empty configuration,
    /// restarted and asked for a blocking scan. The filters of `config` are
    /// applied as given; the scan is always active with device-default dwell
    /// times.
    ///
    /// If the device fills fewer records than it counted, the result holds
    /// only the filled ones.
    ///
    /// # Errors
    ///
    /// - [`Error::StackNotInitialized`] if `latch` is unset
    /// - [`Error::StackControl`] if the stack cannot be reconfigured
    /// - [`Error::ScanFailure`] if the scan, count or fetch fails
    /// - [`Error::OutOfMemory`] if the records do not fit in memory; the
    ///   device-side results are discarded first so the next scan starts
    ///   clean. A failed discard is logged and still reports `OutOfMemory`.
    pub async fn scan(
        &mut self,
        latch: &InitLatch,
        config: &ScanConfiguration,
    ) -> Result<ScanResult> {
        if !latch.is_set() {
            warn!("Scan requested before the network stack was initialized");
            return Err(Error::StackNotInitialized);
        }

        self.stop().await?;
        self.set_station_mode().await?;
        self.stack
            .configure(&StationConfig::default())
            .await
            .map_err(|e| {
                error!("Failed to configure station: {}", Debug2Format(&e));
                Error::StackControl
            })?;
        self.start().await?;

        let config = ScanConfiguration {
            scan_type: ScanType::ACTIVE_DEFAULT,
            ..config.clone()
        };
        self.scan_blocking(&config).await?;

        let found = self.count().await?;
        let mut records: Vec<AccessPointRecord> = Vec::new();
        if records.try_reserve_exact(found).is_err() {
            error!("No memory for {} scan records, discarding results", found);
            if self.fetch(&mut []).await.is_err() {
                warn!("Device kept its scan results after the discard failed");
            }
            return Err(Error::OutOfMemory);
        }
        records.resize(found, AccessPointRecord::default());

        let filled = self.fetch(&mut records).await?;
        records.truncate(filled);
        records.shrink_to_fit();
        debug!("Scan returned {} of {} records", filled, found);

        Ok(ScanResult { records })
    }

    /// The wrapped stack.
    pub fn stack(&self) -> &N {
        &self.stack
    }

    /// Gives back the wrapped stack.
    pub fn into_inner(self) -> N {
        self.stack
    }

    async fn set_station_mode(&mut self) -> Result<()> {
        self.stack.set_mode(WifiMode::Station).await.map_err(|e| {
            error!("Failed to set Wi-Fi mode: {}", Debug2Format(&e));
            Error::StackControl
        })
    }

    async fn start(&mut self) -> Result<()> {
        self.stack.start().await.map_err(|e| {
            error!("Failed to start Wi-Fi: {}", Debug2Format(&e));
            Error::StackControl
        })
    }

    async fn stop(&mut self) -> Result<()> {
        self.stack.stop().await.map_err(|e| {
            error!("Failed to stop Wi-Fi: {}", Debug2Format(&e));
            Error::StackControl
        })
    }

    async fn scan_blocking(&mut self, config: &ScanConfiguration) -> Result<()> {
        self.stack.scan_start(config, true).await.map_err(|e| {
            error!("Wi-Fi scan failed: {}", Debug2Format(&e));
            Error::ScanFailure
        })
    }

    async fn count(&mut self) -> Result<usize> {
        self.stack.scan_count().await.map_err(|e| {
            error!("Failed to read scan count: {}", Debug2Format(&e));
            Error::ScanFailure
        })
    }

    async fn fetch(&mut self, records: &mut [AccessPointRecord]) -> Result<usize> {
        let capacity = records.len();
        let filled = self.stack.scan_fetch(records).await.map_err(|e| {
            error!("Failed to fetch scan records: {}", Debug2Format(&e));
            Error::ScanFailure
        })?;
        Ok(filled.min(capacity))
    }
}
