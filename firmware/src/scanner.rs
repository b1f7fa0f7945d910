//! Radio bring-up and the periodic scan task.

use defmt::error;
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use esp_hal::gpio::Output;
use esp_hal::peripherals::WIFI;
use esp_println::{Printer, println};
use wifi_scan::format::write_scan_line;
use wifi_scan::{BringUpConfig, Error, Radio, Readiness, ScanConfiguration};

use crate::allocator::log_heap_usage;
use crate::board::RadioPower;
use crate::mk_static;
use crate::radio::{EmbassyNetStack, EspRadioLink};
use crate::station::EspStation;

/// Interval between scans in seconds
const SCAN_INTERVAL_SECS: u64 = 10;

/// Pause before a failed bring-up is attempted again, in seconds
const BRING_UP_RETRY_SECS: u64 = 5;

/// The radio as wired on this board.
pub type BoardRadio =
    Radio<RadioPower<'static>, Delay, EspRadioLink, EmbassyNetStack, EspStation>;

/// Embassy task that scans for networks forever.
///
/// Each pass makes sure the stack is up (retrying a failed bring-up on the
/// next pass), runs an owned scan and prints one line per network found.
#[embassy_executor::task]
pub async fn wifi_scan_task(radio: &'static mut BoardRadio) {
    let config = ScanConfiguration::default();

    loop {
        if let Err(e) = radio.ensure_initialized().await {
            println!("Radio bring-up failed: {}", e);
            Timer::after(Duration::from_secs(BRING_UP_RETRY_SECS)).await;
            continue;
        }

        println!("Starting Wi-Fi scan...");
        match radio.scan(&config).await {
            Ok(result) => {
                println!("Found {} networks:", result.len());
                for ap in &result {
                    if write_scan_line(&mut Printer, ap).is_err() {
                        error!("Failed to print scan line for {}", ap.bssid);
                    }
                }
                if let Some(ap) = result.strongest() {
                    println!("Strongest: {} ({} dBm)", ap.ssid, ap.rssi);
                }
            }
            Err(Error::OutOfMemory) => {
                println!("WiFi scan failed: {}", Error::OutOfMemory);
                log_heap_usage("scan");
            }
            Err(e) => {
                println!("WiFi scan failed: {}", e);
            }
        }

        println!("Waiting before next scan...");
        Timer::after(Duration::from_secs(SCAN_INTERVAL_SECS)).await;
    }
}

/// Brings the radio up, runs one diagnostic scan and spawns the periodic
/// scan task.
///
/// # Arguments
///
/// * `spawner` - Spawner for the network runner and scan tasks
/// * `device` - Wi-Fi peripheral
/// * `enable` - GPIO switching the radio module's power
/// * `seed` - Random seed for the network stack
///
/// # Errors
///
/// Returns the bring-up error if the radio cannot be brought up, the
/// diagnostic scan error if that scan fails, or [`Error::StackInit`] if the
/// scan task cannot be spawned.
pub async fn wifi_scanner(
    spawner: Spawner,
    device: WIFI<'static>,
    enable: Output<'static>,
    seed: u64,
) -> Result<(), Error> {
    let radio = mk_static!(
        BoardRadio,
        Radio::new(
            RadioPower::new(enable),
            Delay,
            EspRadioLink::new(device),
            EmbassyNetStack::new(spawner, seed),
            EspStation::new(),
            BringUpConfig::default(),
        )
    );

    if radio.ensure_initialized().await? == Readiness::NewlyReady {
        println!("Radio ready!");
    }

    println!("Running diagnostic scan...");
    let reported = radio.scan_diagnostic(&mut Printer).await?;
    println!("Diagnostic scan reported {} networks", reported);

    spawner.spawn(wifi_scan_task(radio)).map_err(|e| {
        println!("Failed to spawn WiFi scan task: {:?}", e);
        Error::StackInit
    })?;

    Ok(())
}
