//! Valve position indicator lamps.
//!
//! Two discrete LEDs, one for "open" and one for "closed".  The driver
//! writes whatever it is told; keeping them complementary is the alarm
//! policy's job.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives two GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct IndicatorLamps;

impl IndicatorLamps {
    pub fn new() -> Self {
        Self
    }

    pub fn set(&mut self, open: bool, closed: bool) {
        hw_init::gpio_write(pins::LED_OPEN_GPIO, open);
        hw_init::gpio_write(pins::LED_CLOSED_GPIO, closed);
    }
}

impl Default for IndicatorLamps {
    fn default() -> Self {
        Self::new()
    }
}
