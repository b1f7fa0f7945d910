//! ESP32 Wi-Fi scanner firmware
//!
//! Binds the `wifi_scan` bring-up and scan engine to the esp-hal ecosystem:
//! a GPIO enable line for radio power, esp-radio as the transport, an
//! embassy-net stack hosted on the station interface, and esp-radio's
//! `WifiController` as the scan backend.
//!
//! ## Example
//!
//! ```no_run
//! use wifi_scanner::{allocator, scanner};
//! use embassy_executor::Spawner;
//!
//! #[esp_rtos::main]
//! async fn main(spawner: Spawner) -> ! {
//!     allocator::init_heap();
//!
//!     // Bring the radio up and spawn the scan task
//!     // ... (see bin/main.rs for complete example)
//! }
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

/// Memory allocation configuration
pub mod allocator;

/// Radio power wiring
pub mod board;

/// esp-radio transport and hosted network stack
pub mod radio;

/// Bring-up and periodic scan task
pub mod scanner;

/// Scan backend over the Wi-Fi controller
pub mod station;

/// Static storage shared between the radio adapters
pub mod types;
