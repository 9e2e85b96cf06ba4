//! Active overflow buzzer on a single GPIO.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.  On host/test: state only.

use crate::drivers::hw_init;
use crate::pins;

pub struct Buzzer {
    on: bool,
}

impl Buzzer {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        if on != self.on {
            hw_init::gpio_write(pins::BUZZER_GPIO, on);
            self.on = on;
        }
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}
