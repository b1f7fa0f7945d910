//! Heap setup for the radio driver and scan results.
//!
//! esp-radio keeps its buffers on the heap, and every owned scan allocates
//! one record per access point found. Both come out of the two regions
//! registered here.

use defmt::info;

/// RAM reclaimed from the second-stage bootloader once it has handed over.
const RECLAIMED_HEAP_SIZE: usize = 98768;

/// Main heap. Sized for the Wi-Fi driver plus a crowded scan (a few hundred
/// records of well under 100 bytes each).
const MAIN_HEAP_SIZE: usize = 96 * 1024;

/// Registers both heap regions with the global allocator.
///
/// Must run once, before the radio is initialized.
pub fn init_heap() {
    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: RECLAIMED_HEAP_SIZE);
    esp_alloc::heap_allocator!(size: MAIN_HEAP_SIZE);
}

/// Logs heap usage, e.g. after a scan failed for lack of memory.
pub fn log_heap_usage(context: &str) {
    info!(
        "heap [{}]: used={} free={}",
        context,
        esp_alloc::HEAP.used(),
        esp_alloc::HEAP.free()
    );
}
