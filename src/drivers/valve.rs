//! Servo-actuated overflow valve driver.
//!
//! A hobby servo on LEDC CH0 rotates the valve between the configured
//! closed and open angles.  Each move blocks for the settle time so the
//! valve has physically arrived before the cycle continues.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes real LEDC duty via hw_init and delays through the
//! FreeRTOS tick.  On host/test: tracks position in-memory and delays
//! through whatever [`DelayNs`] the caller supplies.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins;

/// Servo pulse width at 0°.
const MIN_PULSE_US: u32 = 500;
/// Servo pulse width at 180°.
const MAX_PULSE_US: u32 = 2500;
/// PWM frame length at 50 Hz.
const FRAME_US: u32 = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;
const MAX_DUTY: u32 = (1 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;

/// LEDC duty value for a servo angle (0–180°).
pub fn angle_to_duty(angle_deg: u8) -> u32 {
    let pulse_us = MIN_PULSE_US + u32::from(angle_deg) * (MAX_PULSE_US - MIN_PULSE_US) / 180;
    pulse_us * (MAX_DUTY + 1) / FRAME_US
}

pub struct ValveServo {
    angle_deg: Option<u8>,
    settle_ms: u32,
}

impl ValveServo {
    pub fn new(settle_ms: u32) -> Self {
        Self {
            angle_deg: None,
            settle_ms,
        }
    }

    /// Drive to `angle_deg` and block for the settle time.
    pub fn move_to(&mut self, angle_deg: u8, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        if angle_deg > 180 {
            return Err(ActuatorError::PositionOutOfRange);
        }

        hw_init::ledc_set(hw_init::LEDC_CH_VALVE, angle_to_duty(angle_deg))
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        delay.delay_ms(self.settle_ms);

        self.angle_deg = Some(angle_deg);
        info!("Valve: settled at {}°", angle_deg);
        Ok(())
    }

    /// Last angle the servo settled at, `None` before the first move.
    pub fn angle_deg(&self) -> Option<u8> {
        self.angle_deg
    }
}
