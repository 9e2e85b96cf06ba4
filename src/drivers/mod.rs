//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod buzzer;
pub mod delay;
pub mod hw_init;
pub mod indicator_led;
pub mod valve;
pub mod watchdog;
