//! Simulated radio for host tests.
//!
//! Every fake shares one [`Trace`] that records each hardware call together
//! with the simulated time it happened at. Delays advance the simulated
//! clock instead of sleeping.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;
use wifi_scan::{
    AccessPointRecord, Bssid, HostedStack, NetworkStack, PhyCapabilities, PowerControl, Probe,
    RadioState, ScanConfiguration, Ssid, StationConfig, Transport, WifiMode,
};

/// One hardware interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Power(RadioState),
    Delay(u64),
    Open,
    Probe,
    HostedInit,
    SetMode(WifiMode),
    Configure(StationConfig),
    Start,
    Stop,
    ScanStart { config: ScanConfiguration, block: bool },
    ScanCount,
    ScanFetch { capacity: usize },
}

impl Call {
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Call::SetMode(_)
                | Call::Configure(_)
                | Call::Start
                | Call::Stop
                | Call::ScanStart { .. }
                | Call::ScanCount
                | Call::ScanFetch { .. }
        )
    }

    pub fn is_bring_up(&self) -> bool {
        matches!(
            self,
            Call::Power(_) | Call::Delay(_) | Call::Open | Call::Probe | Call::HostedInit
        )
    }
}

#[derive(Debug, Default)]
pub struct TraceInner {
    pub now_ns: u64,
    pub calls: Vec<(u64, Call)>,
}

/// Shared call log and simulated clock.
#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<TraceInner>>);

impl Trace {
    pub fn record(&self, call: Call) {
        let mut inner = self.0.borrow_mut();
        let now = inner.now_ns;
        inner.calls.push((now, call));
    }

    pub fn advance(&self, ns: u64) {
        self.0.borrow_mut().now_ns += ns;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(u64, Call)> {
        self.0.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().calls.iter().filter(|(_, c)| pred(c)).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().calls.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimError(pub &'static str);

pub struct SimPower {
    pub trace: Trace,
    pub fail_on: Option<RadioState>,
}

impl PowerControl for SimPower {
    type Error = SimError;

    async fn set(&mut self, state: RadioState) -> Result<(), SimError> {
        self.trace.record(Call::Power(state));
        if self.fail_on == Some(state) {
            return Err(SimError("power line stuck"));
        }
        Ok(())
    }
}

pub struct SimDelay {
    pub trace: Trace,
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.trace.record(Call::Delay(u64::from(ns)));
        self.trace.advance(u64::from(ns));
    }
}

/// What the transport does on each attempt; the last entry repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkBehavior {
    Ready,
    NotReady,
    OpenFails,
    ProbeFails,
}

pub struct SimTransport {
    pub trace: Trace,
    pub script: Vec<LinkBehavior>,
    attempt: usize,
    next_handle: u32,
}

impl SimTransport {
    fn behavior(&self) -> LinkBehavior {
        let idx = self.attempt.min(self.script.len().saturating_sub(1));
        self.script.get(idx).copied().unwrap_or(LinkBehavior::Ready)
    }
}

/// Opened link; the number tells handles of different attempts apart.
#[derive(Debug, PartialEq, Eq)]
pub struct SimHandle(pub u32);

impl Transport for SimTransport {
    type Handle = SimHandle;
    type Error = SimError;

    async fn open(&mut self) -> Result<SimHandle, SimError> {
        self.trace.record(Call::Open);
        if self.behavior() == LinkBehavior::OpenFails {
            self.attempt += 1;
            return Err(SimError("bus not responding"));
        }
        self.next_handle += 1;
        Ok(SimHandle(self.next_handle))
    }

    async fn probe(&mut self, _handle: &mut SimHandle) -> Result<Probe, SimError> {
        self.trace.record(Call::Probe);
        let behavior = self.behavior();
        self.attempt += 1;
        match behavior {
            LinkBehavior::Ready => Ok(Probe::Ready),
            LinkBehavior::NotReady => Ok(Probe::NotReady),
            LinkBehavior::ProbeFails => Err(SimError("probe timed out")),
            LinkBehavior::OpenFails => unreachable!(),
        }
    }
}

pub struct SimHosted {
    pub trace: Trace,
    pub fail: bool,
    pub initialized_with: Option<u32>,
}

impl HostedStack<SimHandle> for SimHosted {
    type Error = SimError;

    async fn init(&mut self, link: &mut SimHandle) -> Result<(), SimError> {
        self.trace.record(Call::HostedInit);
        if self.fail {
            return Err(SimError("stack init failed"));
        }
        self.initialized_with = Some(link.0);
        Ok(())
    }
}

/// Which network call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetFault {
    SetMode,
    Start,
    Stop,
    ScanStart,
    ScanCount,
    ScanFetch,
}

pub struct SimNetwork {
    pub trace: Trace,
    /// Access points on the air.
    pub aps: Vec<AccessPointRecord>,
    /// Overrides the count the device reports.
    pub reported_count: Option<usize>,
    pub fault: Option<NetFault>,
    /// Results waiting to be fetched.
    pending: Vec<AccessPointRecord>,
    /// Most records ever written in one fetch.
    pub max_written: usize,
}

impl SimNetwork {
    fn check(&self, fault: NetFault) -> Result<(), SimError> {
        if self.fault == Some(fault) {
            Err(SimError("driver error"))
        } else {
            Ok(())
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl NetworkStack for SimNetwork {
    type Error = SimError;

    async fn set_mode(&mut self, mode: WifiMode) -> Result<(), SimError> {
        self.trace.record(Call::SetMode(mode));
        self.check(NetFault::SetMode)
    }

    async fn configure(&mut self, config: &StationConfig) -> Result<(), SimError> {
        self.trace.record(Call::Configure(config.clone()));
        Ok(())
    }

    async fn start(&mut self) -> Result<(), SimError> {
        self.trace.record(Call::Start);
        self.check(NetFault::Start)
    }

    async fn stop(&mut self) -> Result<(), SimError> {
        self.trace.record(Call::Stop);
        self.check(NetFault::Stop)
    }

    async fn scan_start(
        &mut self,
        config: &ScanConfiguration,
        block: bool,
    ) -> Result<(), SimError> {
        self.trace.record(Call::ScanStart {
            config: config.clone(),
            block,
        });
        self.check(NetFault::ScanStart)?;
        self.pending = self
            .aps
            .iter()
            .filter(|ap| config.ssid.as_ref().is_none_or(|ssid| &ap.ssid == ssid))
            .filter(|ap| config.bssid.is_none_or(|bssid| ap.bssid == bssid))
            .filter(|ap| config.channel.is_none_or(|ch| ap.primary_channel == ch))
            .cloned()
            .collect();
        Ok(())
    }

    async fn scan_count(&mut self) -> Result<usize, SimError> {
        self.trace.record(Call::ScanCount);
        self.check(NetFault::ScanCount)?;
        Ok(self.reported_count.unwrap_or(self.pending.len()))
    }

    async fn scan_fetch(&mut self, records: &mut [AccessPointRecord]) -> Result<usize, SimError> {
        self.trace.record(Call::ScanFetch {
            capacity: records.len(),
        });
        self.check(NetFault::ScanFetch)?;
        let filled = records.len().min(self.pending.len());
        for (slot, ap) in records.iter_mut().zip(self.pending.drain(..)) {
            *slot = ap;
        }
        self.pending.clear();
        self.max_written = self.max_written.max(filled);
        Ok(filled)
    }
}

/// A full simulated module sharing one trace.
pub struct Sim {
    pub trace: Trace,
    pub power: SimPower,
    pub delay: SimDelay,
    pub transport: SimTransport,
    pub hosted: SimHosted,
    pub network: SimNetwork,
}

impl Sim {
    pub fn new() -> Self {
        let trace = Trace::default();
        Self {
            power: SimPower {
                trace: trace.clone(),
                fail_on: None,
            },
            delay: SimDelay {
                trace: trace.clone(),
            },
            transport: SimTransport {
                trace: trace.clone(),
                script: vec![LinkBehavior::Ready],
                attempt: 0,
                next_handle: 0,
            },
            hosted: SimHosted {
                trace: trace.clone(),
                fail: false,
                initialized_with: None,
            },
            network: SimNetwork {
                trace: trace.clone(),
                aps: Vec::new(),
                reported_count: None,
                fault: None,
                pending: Vec::new(),
                max_written: 0,
            },
            trace,
        }
    }

    pub fn with_link(mut self, script: &[LinkBehavior]) -> Self {
        self.transport.script = script.to_vec();
        self
    }

    pub fn with_aps(mut self, aps: Vec<AccessPointRecord>) -> Self {
        self.network.aps = aps;
        self
    }
}

pub fn ap(name: &str, last_octet: u8, rssi: i8, channel: u8) -> AccessPointRecord {
    AccessPointRecord {
        ssid: Ssid::try_from(name).unwrap(),
        bssid: Bssid([0x47, 0x00, 0xDF, 0x97, 0x5A, last_octet]),
        rssi,
        primary_channel: channel,
        phy: PhyCapabilities {
            b: true,
            g: true,
            n: true,
        },
        ..Default::default()
    }
}

pub fn block_on<F: core::future::Future>(fut: F) -> F::Output {
    embassy_futures::block_on(fut)
}
