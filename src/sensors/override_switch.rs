//! Manual override toggle switch.
//!
//! Wired between the GPIO and ground with the internal pull-up enabled,
//! so the pin reads LOW while the switch is engaged.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO via hw_init.
//! On host/test: returns the value set with [`sim_set_override`]
//! (defaults to disengaged).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_OVERRIDE: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_override(active: bool) {
    SIM_OVERRIDE.store(active, Ordering::Relaxed);
}

pub struct OverrideSwitch {
    _gpio: i32,
}

impl OverrideSwitch {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// `true` while the operator holds the valve open.
    #[cfg(target_os = "espidf")]
    pub fn is_active(&self) -> bool {
        !crate::drivers::hw_init::gpio_read(self._gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_active(&self) -> bool {
        SIM_OVERRIDE.load(Ordering::Relaxed)
    }
}
