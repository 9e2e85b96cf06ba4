//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::indicator_led::IndicatorLamps;
use crate::drivers::valve::ValveServo;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
/// `D` is the blocking delay used while the valve settles.
pub struct HardwareAdapter<D: DelayNs> {
    sensor_hub: SensorHub,
    valve: ValveServo,
    buzzer: Buzzer,
    lamps: IndicatorLamps,
    delay: D,
}

impl<D: DelayNs> HardwareAdapter<D> {
    pub fn new(
        sensor_hub: SensorHub,
        valve: ValveServo,
        buzzer: Buzzer,
        lamps: IndicatorLamps,
        delay: D,
    ) -> Self {
        Self {
            sensor_hub,
            valve,
            buzzer,
            lamps,
            delay,
        }
    }

    /// Last settled valve angle, `None` before the first move.
    pub fn valve_angle_deg(&self) -> Option<u8> {
        self.valve.angle_deg()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<D: DelayNs> SensorPort for HardwareAdapter<D> {
    fn read_level(&mut self) -> Result<f32, SensorError> {
        self.sensor_hub.read_level_cm()
    }

    fn read_override(&mut self) -> bool {
        self.sensor_hub.read_override()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<D: DelayNs> ActuatorPort for HardwareAdapter<D> {
    fn move_valve(&mut self, angle_deg: u8) -> Result<(), ActuatorError> {
        self.valve.move_to(angle_deg, &mut self.delay)
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn set_indicators(&mut self, open: bool, closed: bool) {
        self.lamps.set(open, closed);
    }
}
