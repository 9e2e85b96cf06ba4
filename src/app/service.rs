//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the valve FSM and its context.  It exposes a
//! hardware-agnostic per-cycle API; all I/O flows through port traits
//! injected at call sites, so the whole controller is testable with mocks.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!    TimePort ──▶ │        AppService         │ ──▶ DisplayPort
//! ActuatorPort ◀──│ Pressure · FSM · Alarm    │
//!                 └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::alarm;
use crate::config::SystemConfig;
use crate::control::pressure::pressure_kpa;
use crate::error::SensorError;
use crate::fsm::context::{CycleInputs, FsmContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::events::{AppEvent, StatusSnapshot, TelemetryData};
use super::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort, TimePort};

/// Turn a raw level read into the value the state machine consumes.
///
/// Failed, non-finite and negative readings all collapse to `0.0`, which
/// biases the automatic branch toward Closed.  The error, if any, is
/// handed back for reporting.
pub fn sanitize_level(raw: Result<f32, SensorError>) -> (f32, Option<SensorError>) {
    match raw {
        Ok(level) if level.is_finite() => (level.max(0.0), None),
        Ok(_) => (0.0, Some(SensorError::NotANumber)),
        Err(e) => (0.0, Some(e)),
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    last_snapshot: StatusSnapshot,
    cycle_count: u64,
    sensor_fallbacks: u32,
    actuator_faults: u32,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`AppService::start`] next.
    pub fn new(config: SystemConfig) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Closed);

        Self {
            fsm,
            ctx,
            last_snapshot: StatusSnapshot::default(),
            cycle_count: 0,
            sensor_fallbacks: 0,
            actuator_faults: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Closed and bring the hardware in line with it.
    ///
    /// The valve position is unknown at power-up, so it is driven closed
    /// once and the lamps and buzzer are set to match.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_valve(hw, sink);

        let out = alarm::indicators(0.0, self.fsm.current_state(), self.ctx.config.overflow_threshold_cm);
        hw.set_buzzer(out.buzzer_on);
        hw.set_indicators(out.open_indicator, out.closed_indicator);

        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle:
    /// clock → sensors → pressure → FSM → valve → alarm → display.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl TimePort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> StatusSnapshot {
        self.cycle_count += 1;

        // 1. One clock sample for every comparison in this cycle
        let now_ms = clock.now_ms();

        // 2. Inputs via SensorPort
        let (level_cm, sensor_err) = sanitize_level(hw.read_level());
        if let Some(e) = sensor_err {
            self.sensor_fallbacks = self.sensor_fallbacks.saturating_add(1);
            warn!("Level read failed ({}), using 0.0cm", e);
            sink.emit(&AppEvent::SensorFallback(e));
        }
        let override_active = hw.read_override();
        if override_active != self.ctx.inputs.override_active {
            sink.emit(&AppEvent::OverrideChanged {
                active: override_active,
            });
        }

        // 3. Pressure model (independent of the FSM)
        let pressure = pressure_kpa(level_cm);

        // 4. FSM tick (pure state logic)
        let prev_state = self.fsm.current_state();
        let prev_rearms = self.ctx.hold_rearms;
        self.ctx.inputs = CycleInputs {
            level_cm,
            override_active,
            now_ms,
        };
        self.fsm.tick(&mut self.ctx);
        let state = self.fsm.current_state();

        // 5. Valve moves on a committed state change, and again on every
        //    hold re-arm to re-confirm the open position.  Override cycles
        //    never re-arm, so they never re-drive the servo.
        if state != prev_state {
            self.apply_valve(hw, sink);
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
                level_cm,
            });
        } else if self.ctx.hold_rearms != prev_rearms {
            self.apply_valve(hw, sink);
            sink.emit(&AppEvent::HoldRearmed { at_ms: now_ms });
        }

        // 6. Alarm / indicator policy
        let out = alarm::indicators(level_cm, state, self.ctx.config.overflow_threshold_cm);
        hw.set_buzzer(out.buzzer_on);
        hw.set_indicators(out.open_indicator, out.closed_indicator);
        if out.buzzer_on && !self.last_snapshot.buzzer_on {
            warn!("Overflow alarm: level {:.1}cm", level_cm);
            sink.emit(&AppEvent::AlarmRaised { level_cm });
        } else if !out.buzzer_on && self.last_snapshot.buzzer_on {
            sink.emit(&AppEvent::AlarmCleared);
        }

        // 7. Display
        let snapshot = StatusSnapshot {
            level_cm,
            pressure_kpa: pressure,
            valve: state,
            buzzer_on: out.buzzer_on,
            open_indicator: out.open_indicator,
            closed_indicator: out.closed_indicator,
        };
        display.render(&snapshot);
        self.last_snapshot = snapshot;

        snapshot
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry report from the current context.
    /// `loop_overruns` comes from the loop schedule owned by the caller.
    pub fn build_telemetry(&self, loop_overruns: u32) -> TelemetryData {
        TelemetryData {
            snapshot: self.last_snapshot,
            override_active: self.ctx.inputs.override_active,
            open_timestamp_ms: self.ctx.open_timestamp_ms,
            cycles: self.cycle_count,
            sensor_fallbacks: self.sensor_fallbacks,
            actuator_faults: self.actuator_faults,
            hold_rearms: self.ctx.hold_rearms,
            loop_overruns,
        }
    }

    /// Current valve state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Clock sample at which the hold window was last armed.
    pub fn open_timestamp_ms(&self) -> Option<u64> {
        self.ctx.open_timestamp_ms
    }

    /// Snapshot produced by the most recent cycle.
    pub fn last_snapshot(&self) -> StatusSnapshot {
        self.last_snapshot
    }

    /// Total control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Send the FSM's valve command to the actuator.
    ///
    /// Moves are fire-and-forget: a rejected move is reported and counted
    /// but the committed state stands.  A failed open is sent again on the
    /// next hold re-arm.
    fn apply_valve(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let angle = self.ctx.commands.valve_angle_deg;
        if let Err(e) = hw.move_valve(angle) {
            self.actuator_faults = self.actuator_faults.saturating_add(1);
            warn!("Valve move to {}° failed: {}", angle, e);
            sink.emit(&AppEvent::ActuatorFault(e));
        }
    }
}
