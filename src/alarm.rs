//! Alarm and indicator policy.
//!
//! Runs **every cycle after the FSM** and derives the buzzer and the two
//! valve indicator lamps.  Stateless by construction:
//!
//! - The buzzer follows the raw level (`level > threshold`, strict).  It is
//!   not gated by the hold window or the override switch, so an operator
//!   hears a physical overflow risk even while the valve is held.
//! - The lamps follow the committed valve state and are always
//!   complementary.

use crate::fsm::StateId;

/// Output levels for the alarm and indicator sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicators {
    pub buzzer_on: bool,
    pub open_indicator: bool,
    pub closed_indicator: bool,
}

/// Derive the indicator outputs for one cycle.
pub fn indicators(level_cm: f32, valve: StateId, overflow_threshold_cm: f32) -> Indicators {
    let open_indicator = valve.is_open();
    Indicators {
        buzzer_on: level_cm > overflow_threshold_cm,
        open_indicator,
        closed_indicator: !open_indicator,
    }
}
