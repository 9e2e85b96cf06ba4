//! Outbound application events and the per-cycle status snapshot.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port and hands the snapshot to the
//! [`DisplayPort`](super::ports::DisplayPort).

use crate::error::{ActuatorError, SensorError};
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The valve state machine committed a new position.
    StateChanged {
        from: StateId,
        to: StateId,
        level_cm: f32,
    },

    /// The hold window was re-armed while the valve stayed open.
    HoldRearmed { at_ms: u64 },

    /// The override switch changed position.
    OverrideChanged { active: bool },

    /// The buzzer turned on: level is above the overflow threshold.
    AlarmRaised { level_cm: f32 },

    /// The buzzer turned off.
    AlarmCleared,

    /// The level read failed; the cycle ran with level = 0.
    SensorFallback(SensorError),

    /// A valve move was rejected by the actuator driver.
    ActuatorFault(ActuatorError),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// Everything the display and alarm sinks need for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub level_cm: f32,
    pub pressure_kpa: f32,
    pub valve: StateId,
    pub buzzer_on: bool,
    pub open_indicator: bool,
    pub closed_indicator: bool,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            level_cm: 0.0,
            pressure_kpa: 0.0,
            valve: StateId::Closed,
            buzzer_on: false,
            open_indicator: false,
            closed_indicator: true,
        }
    }
}

/// A point-in-time telemetry report suitable for logging.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub snapshot: StatusSnapshot,
    pub override_active: bool,
    pub open_timestamp_ms: Option<u64>,
    pub cycles: u64,
    pub sensor_fallbacks: u32,
    pub actuator_faults: u32,
    pub hold_rearms: u64,
    pub loop_overruns: u32,
}
