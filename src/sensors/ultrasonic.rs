//! HC-SR04 ultrasonic distance sensor mounted above the pipe.
//!
//! A 10 µs trigger pulse makes the module emit a burst; the echo pin is
//! held HIGH for the round-trip time of flight.  Distance is half the
//! round trip at the speed of sound.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: times the echo pulse via hw_init.
//! On host/test: returns the echo time injected with [`sim_set_echo_us`]
//! (defaults to an empty 50 cm pipe).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::SensorError;

/// Speed of sound at ~20 °C in cm per microsecond.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Echo window.  Covers the 400 cm rated range with margin (~23 ms).
const ECHO_TIMEOUT_US: u32 = 30_000;

/// 50 cm round trip.
#[cfg(not(target_os = "espidf"))]
static SIM_ECHO_US: AtomicU32 = AtomicU32::new(2915);

/// Inject the echo pulse width seen by the simulated sensor.
/// `0` simulates a missing echo.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_us(us: u32) {
    SIM_ECHO_US.store(us, Ordering::Relaxed);
}

/// Convert an echo pulse width to a one-way distance.
pub fn echo_to_distance_cm(echo_us: u32) -> f32 {
    echo_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0
}

pub struct UltrasonicSensor {
    _trig_gpio: i32,
    _echo_gpio: i32,
    max_range_cm: f32,
}

impl UltrasonicSensor {
    pub fn new(trig_gpio: i32, echo_gpio: i32, max_range_cm: f32) -> Self {
        Self {
            _trig_gpio: trig_gpio,
            _echo_gpio: echo_gpio,
            max_range_cm,
        }
    }

    /// Distance from the sensor face to the fluid surface (cm).
    pub fn read_distance_cm(&mut self) -> Result<f32, SensorError> {
        let echo_us = self.measure_echo_us().ok_or(SensorError::EchoTimeout)?;
        let distance = echo_to_distance_cm(echo_us);

        if !distance.is_finite() {
            return Err(SensorError::NotANumber);
        }
        if distance > self.max_range_cm {
            return Err(SensorError::OutOfRange);
        }
        Ok(distance)
    }

    #[cfg(target_os = "espidf")]
    fn measure_echo_us(&self) -> Option<u32> {
        crate::drivers::hw_init::echo_pulse_us(self._trig_gpio, self._echo_gpio, ECHO_TIMEOUT_US)
    }

    #[cfg(not(target_os = "espidf"))]
    fn measure_echo_us(&self) -> Option<u32> {
        match SIM_ECHO_US.load(Ordering::Relaxed) {
            0 => None,
            us if us > ECHO_TIMEOUT_US => None,
            us => Some(us),
        }
    }
}
