//! System configuration parameters
//!
//! All tunable parameters for the OverflowGuard controller.  Values come
//! from [`SystemConfig::default`] or a JSON document supplied at boot; nothing
//! is persisted across power loss.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Geometry ---
    /// Distance from the sensor face to the bottom of the pipe (cm).
    pub pipe_height_cm: f32,
    /// Level at or above which the valve is opened (cm).
    pub overflow_threshold_cm: f32,

    // --- Valve ---
    /// Minimum time the valve stays open before automatic re-evaluation (ms).
    pub min_open_duration_ms: u32,
    /// Servo angle commanded for the open position (degrees).
    pub valve_open_angle_deg: u8,
    /// Servo angle commanded for the closed position (degrees).
    pub valve_closed_angle_deg: u8,
    /// Blocking settle delay after each valve move (ms).
    pub actuator_settle_ms: u32,

    // --- Sensor ---
    /// Rated range of the ultrasonic sensor; farther echoes are rejected (cm).
    pub sensor_max_range_cm: f32,

    // --- Timing ---
    /// Control loop period (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Allowed overrun of the control period before it is reported (ms).
    pub loop_jitter_tolerance_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Geometry
            pipe_height_cm: 50.0,
            overflow_threshold_cm: 45.0,

            // Valve
            min_open_duration_ms: 30_000,
            valve_open_angle_deg: 90,
            valve_closed_angle_deg: 0,
            actuator_settle_ms: 500,

            // Sensor
            sensor_max_range_cm: 400.0, // HC-SR04 datasheet

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            loop_jitter_tolerance_ms: 100,
            telemetry_interval_secs: 60, // 1/min
        }
    }
}

/// Errors from loading or validating a [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be deserialized.
    Malformed,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "config malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Malformed => Self::Config("malformed document"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document and validate it.
    ///
    /// Missing documents are the caller's concern; a present but invalid one
    /// is rejected rather than clamped.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Malformed)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pipe_height_cm > 0.0 && self.pipe_height_cm <= 400.0) {
            return Err(ConfigError::ValidationFailed(
                "pipe_height_cm must be in (0, 400]",
            ));
        }
        if !(self.overflow_threshold_cm > 0.0 && self.overflow_threshold_cm < self.pipe_height_cm) {
            return Err(ConfigError::ValidationFailed(
                "overflow_threshold_cm must be in (0, pipe_height_cm)",
            ));
        }
        if self.min_open_duration_ms > 3_600_000 {
            return Err(ConfigError::ValidationFailed(
                "min_open_duration_ms must be at most one hour",
            ));
        }
        if self.valve_open_angle_deg > 180 || self.valve_closed_angle_deg > 180 {
            return Err(ConfigError::ValidationFailed(
                "valve angles must be 0–180",
            ));
        }
        if self.valve_open_angle_deg == self.valve_closed_angle_deg {
            return Err(ConfigError::ValidationFailed(
                "valve open and closed angles must differ",
            ));
        }
        if self.actuator_settle_ms > 5000 {
            return Err(ConfigError::ValidationFailed(
                "actuator_settle_ms must be 0–5000",
            ));
        }
        if self.sensor_max_range_cm.is_nan() || self.sensor_max_range_cm < self.pipe_height_cm {
            return Err(ConfigError::ValidationFailed(
                "sensor_max_range_cm must cover pipe_height_cm",
            ));
        }
        if !(100..=10_000).contains(&self.control_loop_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be 100–10000",
            ));
        }
        if self.loop_jitter_tolerance_ms >= self.control_loop_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "loop_jitter_tolerance_ms must be below control_loop_interval_ms",
            ));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_secs must be non-zero",
            ));
        }
        Ok(())
    }

    /// Control cycles between telemetry reports (at least one).
    pub fn telemetry_interval_cycles(&self) -> u64 {
        let cycles = u64::from(self.telemetry_interval_secs) * 1000
            / u64::from(self.control_loop_interval_ms.max(1));
        cycles.max(1)
    }
}
