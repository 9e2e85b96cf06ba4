//! Context threaded through every FSM handler.
//!
//! `FsmContext` is the explicit hysteresis memory of the controller: the
//! inputs sampled for the current cycle, the time the hold window was last
//! armed, the actuator command the states request, and the configuration.
//! It lives for the program run and is never persisted.

use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Cycle inputs (written by the service before each tick)
// ---------------------------------------------------------------------------

/// Everything the state machine consumes for one control cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleInputs {
    /// Sanitised fluid level (cm, never negative).
    pub level_cm: f32,
    /// Manual override switch position.
    pub override_active: bool,
    /// Monotonic clock sample taken once at the start of the cycle (ms).
    pub now_ms: u64,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Command the current state requests from the valve actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Servo angle for the valve (degrees).
    pub valve_angle_deg: u8,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,

    // -- Inputs --
    pub inputs: CycleInputs,

    // -- Hysteresis memory --
    /// Clock sample at which the hold window was last armed.
    /// `None` until the valve first opens.
    pub open_timestamp_ms: Option<u64>,
    /// Number of times the hold window was re-armed while already open.
    pub hold_rearms: u64,

    // -- Actuator outputs --
    pub commands: ActuatorCommands,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            inputs: CycleInputs::default(),
            open_timestamp_ms: None,
            hold_rearms: 0,
            commands: ActuatorCommands {
                valve_angle_deg: config.valve_closed_angle_deg,
            },
            config,
        }
    }

    /// True when this cycle's level is at or above the overflow threshold.
    pub fn level_at_threshold(&self) -> bool {
        self.inputs.level_cm >= self.config.overflow_threshold_cm
    }

    /// True once the minimum open duration has elapsed since the hold
    /// window was last armed (or if it was never armed).
    pub fn hold_elapsed(&self) -> bool {
        match self.open_timestamp_ms {
            Some(armed_at) => {
                self.inputs.now_ms.saturating_sub(armed_at)
                    >= u64::from(self.config.min_open_duration_ms)
            }
            None => true,
        }
    }

    /// Arm the hold window at this cycle's clock sample.
    pub fn arm_hold(&mut self) {
        self.open_timestamp_ms = Some(self.inputs.now_ms);
    }
}
