#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_println::println;
use panic_rtt_target as _;
use wifi_scanner::{allocator, scanner};

esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_defmt!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    allocator::init_heap();
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    // Radio module held off until bring-up power-cycles it.
    let radio_enable = Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default());

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    match scanner::wifi_scanner(spawner, peripherals.WIFI, radio_enable, seed).await {
        Ok(()) => println!("WiFi scanner running"),
        Err(e) => {
            error!("WiFi scanner failed to start: {}", e);
            allocator::log_heap_usage("startup");
        }
    }

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
