//! esp-radio transport and the embassy-net stack hosted on it.

use embassy_executor::{SpawnError, Spawner};
use embassy_net::{Runner, Stack, StackResources};
use esp_hal::peripherals::WIFI;
use esp_println::println;
use esp_radio::wifi::WifiDevice;
use esp_radio::{Controller, InitializationError};
use wifi_scan::{HostedStack, Probe, Transport};

use crate::mk_static;
use crate::types::{RADIO_INIT, park_wifi, take_sta_device};

/// Open radio link: the controller returned by `esp_radio::init`.
pub type RadioHandle = &'static Controller<'static>;

/// Errors of the esp-radio transport.
#[derive(Debug)]
pub enum LinkError {
    /// `esp_radio::init` failed.
    Init(InitializationError),
}

/// Transport over esp-radio.
///
/// Opening initializes the radio controller; probing creates the Wi-Fi
/// controller and its interfaces, which only succeeds once the radio
/// answers. Both happen at most once per boot: later attempts reuse what the
/// first successful one produced.
pub struct EspRadioLink {
    device: Option<WIFI<'static>>,
    controller: Option<RadioHandle>,
    wifi_created: bool,
}

impl EspRadioLink {
    /// Takes ownership of the Wi-Fi peripheral.
    pub fn new(device: WIFI<'static>) -> Self {
        Self {
            device: Some(device),
            controller: None,
            wifi_created: false,
        }
    }
}

impl Transport for EspRadioLink {
    type Handle = RadioHandle;
    type Error = LinkError;

    async fn open(&mut self) -> Result<RadioHandle, LinkError> {
        if let Some(controller) = self.controller {
            return Ok(controller);
        }

        let radio_init = esp_radio::init().map_err(|e| {
            println!("Failed to initialize radio controller: {:?}", e);
            LinkError::Init(e)
        })?;
        let radio_init: RadioHandle = RADIO_INIT.init(radio_init);
        println!("Radio initialized!");

        self.controller = Some(radio_init);
        Ok(radio_init)
    }

    async fn probe(&mut self, handle: &mut RadioHandle) -> Result<Probe, LinkError> {
        if self.wifi_created {
            return Ok(Probe::Ready);
        }
        // esp-radio consumes the peripheral even when creation fails.
        let Some(device) = self.device.take() else {
            return Ok(Probe::NotReady);
        };

        println!("Creating WiFi controller...");
        match esp_radio::wifi::new(*handle, device, Default::default()) {
            Ok((controller, interfaces)) => {
                park_wifi(controller, interfaces.sta);
                self.wifi_created = true;
                println!("WiFi controller created!");
                Ok(Probe::Ready)
            }
            Err(e) => {
                println!("Failed to create WiFi controller: {:?}", e);
                Ok(Probe::NotReady)
            }
        }
    }
}

/// Errors of the hosted-stack bring-up.
#[derive(Debug)]
pub enum NetInitError {
    /// The station interface was never created or was already claimed.
    NoInterface,
    /// The network runner task could not be spawned.
    Spawn(SpawnError),
}

/// DHCP-configured embassy-net stack on the station interface.
pub struct EmbassyNetStack {
    spawner: Spawner,
    seed: u64,
    stack: Option<Stack<'static>>,
}

impl EmbassyNetStack {
    /// `seed` feeds the stack's sequence numbers and DHCP transaction ids.
    pub fn new(spawner: Spawner, seed: u64) -> Self {
        Self {
            spawner,
            seed,
            stack: None,
        }
    }

    /// The running stack, once initialized.
    pub fn stack(&self) -> Option<Stack<'static>> {
        self.stack
    }
}

impl HostedStack<RadioHandle> for EmbassyNetStack {
    type Error = NetInitError;

    async fn init(&mut self, _link: &mut RadioHandle) -> Result<(), NetInitError> {
        let device = take_sta_device().ok_or(NetInitError::NoInterface)?;

        println!("Initializing network stack...");
        let (stack, runner) = embassy_net::new(
            device,
            embassy_net::Config::dhcpv4(Default::default()),
            mk_static!(StackResources<3>, StackResources::<3>::new()),
            self.seed,
        );

        self.spawner.spawn(net_task(runner)).map_err(|e| {
            println!("Failed to spawn network task: {:?}", e);
            NetInitError::Spawn(e)
        })?;

        self.stack = Some(stack);
        println!("Network stack initialized!");
        Ok(())
    }
}

/// Drives the embassy-net stack.
#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
