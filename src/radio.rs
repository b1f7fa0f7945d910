//! Bring-up and scanning behind one owner.

use core::fmt::Write;

use embedded_hal_async::delay::DelayNs;

use crate::config::{BringUpConfig, ScanConfiguration};
use crate::error::Result;
use crate::guard::{Readiness, StackGuard};
use crate::hal::{HostedStack, NetworkStack, PowerControl, Transport};
use crate::link::LinkVerifier;
use crate::power::PowerSequencer;
use crate::scan::{ScanEngine, ScanResult};

/// A radio module together with the stack hosted on it.
///
/// Every operation takes `&mut self`, so bring-up and scans on one module
/// can never overlap. Share a `Radio` between tasks behind a mutex.
pub struct Radio<P, D, T: Transport, H, N> {
    guard: StackGuard<P, D, T, H>,
    engine: ScanEngine<N>,
}

impl<P, D, T, H, N> Radio<P, D, T, H, N>
where
    P: PowerControl,
    D: DelayNs,
    T: Transport,
    H: HostedStack<T::Handle>,
    N: NetworkStack,
{
    /// Assembles a radio from its capabilities. Nothing is touched until
    /// [`ensure_initialized`](Self::ensure_initialized).
    pub fn new(
        power: P,
        delay: D,
        transport: T,
        hosted: H,
        stack: N,
        config: BringUpConfig,
    ) -> Self {
        Self {
            guard: StackGuard::new(
                PowerSequencer::new(power, delay, config),
                LinkVerifier::new(transport),
                hosted,
            ),
            engine: ScanEngine::new(stack),
        }
    }

    /// See [`StackGuard::ensure_initialized`].
    pub async fn ensure_initialized(&mut self) -> Result<Readiness> {
        self.guard.ensure_initialized().await
    }

    /// See [`ScanEngine::scan`].
    pub async fn scan(&mut self, config: &ScanConfiguration) -> Result<ScanResult> {
        self.engine.scan(self.guard.latch(), config).await
    }

    /// See [`ScanEngine::scan_diagnostic`].
    pub async fn scan_diagnostic<W: Write>(&mut self, out: &mut W) -> Result<usize> {
        self.engine.scan_diagnostic(out).await
    }

    /// Whether bring-up has completed.
    pub fn is_initialized(&self) -> bool {
        self.guard.is_initialized()
    }

    /// The hosted stack.
    pub fn hosted(&self) -> &H {
        self.guard.hosted()
    }

    /// The network stack scans run on.
    pub fn stack(&self) -> &N {
        self.engine.stack()
    }
}
