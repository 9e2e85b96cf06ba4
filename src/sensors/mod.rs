//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub turns the raw ultrasonic distance into a fluid level using the
//! configured pipe height and exposes the override switch position.

pub mod override_switch;
pub mod ultrasonic;

use crate::error::SensorError;
use override_switch::OverrideSwitch;
use ultrasonic::UltrasonicSensor;

/// Convert a surface distance into a level above the pipe floor, clamped
/// at zero for echoes from below the floor.
pub fn distance_to_level_cm(pipe_height_cm: f32, distance_cm: f32) -> f32 {
    (pipe_height_cm - distance_cm).max(0.0)
}

/// Owns every sensor driver.
pub struct SensorHub {
    pub level: UltrasonicSensor,
    pub override_switch: OverrideSwitch,
    pipe_height_cm: f32,
}

impl SensorHub {
    pub fn new(level: UltrasonicSensor, override_switch: OverrideSwitch, pipe_height_cm: f32) -> Self {
        Self {
            level,
            override_switch,
            pipe_height_cm,
        }
    }

    /// Fluid level above the pipe floor (cm).
    pub fn read_level_cm(&mut self) -> Result<f32, SensorError> {
        let distance = self.level.read_distance_cm()?;
        Ok(distance_to_level_cm(self.pipe_height_cm, distance))
    }

    pub fn read_override(&mut self) -> bool {
        self.override_switch.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_height_minus_distance() {
        assert_eq!(distance_to_level_cm(50.0, 10.0), 40.0);
    }

    #[test]
    fn level_never_negative() {
        assert_eq!(distance_to_level_cm(50.0, 62.0), 0.0);
    }
}
