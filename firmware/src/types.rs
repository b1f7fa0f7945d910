//! Static storage shared between the radio adapters.
//!
//! The transport probe creates the Wi-Fi controller and its interfaces, but
//! they are consumed later by other adapters: the station interface by the
//! hosted stack, the controller by the scan backend. They are parked here
//! until claimed.

use core::cell::RefCell;

use critical_section::Mutex;
use esp_radio::wifi::{WifiController, WifiDevice};
use static_cell::StaticCell;

/// Places a value in a `static` and returns a `'static` reference to it.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.init($val)
    }};
}

/// Radio controller returned by `esp_radio::init`. Initialized once per boot.
pub static RADIO_INIT: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

static WIFI_CONTROLLER: Mutex<RefCell<Option<WifiController<'static>>>> =
    Mutex::new(RefCell::new(None));

static STA_DEVICE: Mutex<RefCell<Option<WifiDevice<'static>>>> = Mutex::new(RefCell::new(None));

/// Parks a freshly created controller and station interface.
pub fn park_wifi(controller: WifiController<'static>, sta: WifiDevice<'static>) {
    critical_section::with(|cs| {
        WIFI_CONTROLLER.borrow_ref_mut(cs).replace(controller);
        STA_DEVICE.borrow_ref_mut(cs).replace(sta);
    });
}

/// Claims the parked controller.
pub fn take_controller() -> Option<WifiController<'static>> {
    critical_section::with(|cs| WIFI_CONTROLLER.borrow_ref_mut(cs).take())
}

/// Claims the parked station interface.
pub fn take_sta_device() -> Option<WifiDevice<'static>> {
    critical_section::with(|cs| STA_DEVICE.borrow_ref_mut(cs).take())
}
