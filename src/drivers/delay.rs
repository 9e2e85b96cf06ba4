//! Blocking delay used for the valve settle time.
//!
//! On ESP-IDF the FreeRTOS delay from esp-idf-hal is used directly; this
//! host implementation sleeps the thread so the simulation keeps real
//! cycle timing.

#[cfg(not(target_os = "espidf"))]
use embedded_hal::delay::DelayNs;

#[cfg(not(target_os = "espidf"))]
pub struct ThreadDelay;

#[cfg(not(target_os = "espidf"))]
impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(target_os = "espidf")]
pub use esp_idf_hal::delay::FreeRtos as ThreadDelay;
