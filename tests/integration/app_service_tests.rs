//! Integration tests for the sensor → FSM → actuator pipeline.
//!
//! These run on the host (x86_64) and drive `AppService` cycle by cycle
//! through mock ports with a manually advanced clock.

use overflowguard::app::events::{AppEvent, StatusSnapshot};
use overflowguard::app::service::AppService;
use overflowguard::config::SystemConfig;
use overflowguard::control::pressure::pressure_kpa;
use overflowguard::error::{ActuatorError, SensorError};
use overflowguard::fsm::StateId;

use super::mock_hw::{ActuatorCall, CaptureDisplay, LogSink, ManualClock, MockHardware};

struct Rig {
    app: AppService,
    hw: MockHardware,
    clock: ManualClock,
    display: CaptureDisplay,
    sink: LogSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    fn with_config(config: SystemConfig) -> Self {
        let mut rig = Self {
            app: AppService::new(config),
            hw: MockHardware::new(),
            clock: ManualClock::new(),
            display: CaptureDisplay::new(),
            sink: LogSink::new(),
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    /// Run one cycle at `at_ms` with the sensor reporting `level_cm`.
    fn step(&mut self, at_ms: u64, level_cm: f32) -> StatusSnapshot {
        self.clock.set(at_ms);
        self.hw.level = Ok(level_cm);
        self.app
            .tick(&mut self.hw, &self.clock, &mut self.display, &mut self.sink)
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_drives_valve_closed_and_lights_closed_lamp() {
    let rig = Rig::new();

    assert_eq!(rig.app.state(), StateId::Closed);
    assert_eq!(
        rig.hw.calls,
        vec![
            ActuatorCall::MoveValve(0),
            ActuatorCall::SetBuzzer(false),
            ActuatorCall::SetIndicators {
                open: false,
                closed: true
            },
        ]
    );
    assert!(matches!(rig.sink.events[0], AppEvent::Started(StateId::Closed)));
}

// ── Hysteresis ────────────────────────────────────────────────

#[test]
fn sustained_overflow_keeps_valve_open_and_rearms_hold() {
    let mut rig = Rig::new();

    rig.step(0, 50.0);
    assert_eq!(rig.app.state(), StateId::Open);
    assert_eq!(rig.app.open_timestamp_ms(), Some(0));

    rig.step(10_000, 50.0);
    assert_eq!(rig.app.state(), StateId::Open);
    assert_eq!(rig.app.open_timestamp_ms(), Some(0), "hold not yet elapsed");

    rig.step(40_000, 50.0);
    assert_eq!(rig.app.state(), StateId::Open);
    assert_eq!(rig.app.open_timestamp_ms(), Some(40_000), "hold re-armed");

    // Closed at start, opened once, re-confirmed open on the re-arm.
    assert_eq!(rig.hw.valve_moves(), vec![0, 90, 90]);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::HoldRearmed { at_ms: 40_000 })), 1);
}

#[test]
fn cycles_inside_hold_window_do_not_move_valve() {
    let mut rig = Rig::new();
    for t in 0..30 {
        rig.step(t * 1_000, 50.0);
    }
    assert_eq!(rig.app.state(), StateId::Open);
    assert_eq!(rig.hw.valve_moves(), vec![0, 90]);

    rig.step(30_000, 50.0);
    assert_eq!(rig.hw.valve_moves(), vec![0, 90, 90]);
}

#[test]
fn level_exactly_at_threshold_opens() {
    let mut rig = Rig::new();
    rig.step(0, 45.0);
    assert_eq!(rig.app.state(), StateId::Open);
}

#[test]
fn dropping_below_threshold_closes_immediately() {
    let mut rig = Rig::new();
    rig.step(0, 47.0);
    assert_eq!(rig.app.state(), StateId::Open);

    // Well inside the 30 s hold window.
    rig.step(1_000, 44.9);
    assert_eq!(rig.app.state(), StateId::Closed);
    assert_eq!(rig.hw.valve_moves(), vec![0, 90, 0]);

    let changes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![(StateId::Closed, StateId::Open), (StateId::Open, StateId::Closed)]
    );
}

#[test]
fn below_threshold_stays_closed_without_moves() {
    let mut rig = Rig::new();
    for t in 0..10 {
        rig.step(t * 1_000, 30.0);
    }
    assert_eq!(rig.app.state(), StateId::Closed);
    assert_eq!(rig.hw.valve_moves(), vec![0]);
    assert!(rig.app.open_timestamp_ms().is_none());
}

// ── Manual override ───────────────────────────────────────────

#[test]
fn override_opens_regardless_of_level() {
    let mut rig = Rig::new();
    rig.hw.override_active = true;

    for t in 0..5 {
        rig.step(t * 1_000, 5.0);
        assert_eq!(rig.app.state(), StateId::Open);
    }
    // One open move for the whole override period.
    assert_eq!(rig.hw.valve_moves(), vec![0, 90]);
    assert_eq!(rig.app.open_timestamp_ms(), Some(0));

    rig.hw.override_active = false;
    rig.step(5_000, 5.0);
    assert_eq!(rig.app.state(), StateId::Closed);
    assert_eq!(rig.hw.valve_moves(), vec![0, 90, 0]);
}

#[test]
fn override_edges_are_reported() {
    let mut rig = Rig::new();
    rig.hw.override_active = true;
    rig.step(0, 5.0);
    rig.step(1_000, 5.0);
    rig.hw.override_active = false;
    rig.step(2_000, 5.0);

    let edges: Vec<bool> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::OverrideChanged { active } => Some(*active),
            _ => None,
        })
        .collect();
    assert_eq!(edges, vec![true, false]);
}

// ── Alarm & indicators ────────────────────────────────────────

#[test]
fn buzzer_follows_level_not_valve() {
    let mut rig = Rig::new();

    let snap = rig.step(0, 45.0);
    assert_eq!(snap.valve, StateId::Open);
    assert!(!snap.buzzer_on, "buzzer is strictly above threshold");

    let snap = rig.step(1_000, 46.0);
    assert!(snap.buzzer_on);
    assert!(rig.hw.buzzer_on());

    let snap = rig.step(2_000, 20.0);
    assert!(!snap.buzzer_on);
    assert!(!rig.hw.buzzer_on());

    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::AlarmRaised { .. })), 1);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::AlarmCleared)), 1);
}

#[test]
fn indicator_lamps_are_complementary_every_cycle() {
    let mut rig = Rig::new();
    let levels = [10.0, 50.0, 50.0, 30.0, 46.0, 0.0];

    for (i, level) in levels.into_iter().enumerate() {
        let snap = rig.step(i as u64 * 1_000, level);
        let (open, closed) = rig.hw.indicators().unwrap();
        assert_ne!(open, closed);
        assert_eq!(open, snap.valve == StateId::Open);
        assert_eq!(snap.open_indicator, open);
        assert_eq!(snap.closed_indicator, closed);
    }
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn display_renders_every_cycle_with_pressure() {
    let mut rig = Rig::new();
    rig.step(0, 20.0);
    rig.step(1_000, 45.0);

    assert_eq!(rig.display.frames.len(), 2);
    let last = rig.display.frames[1];
    assert_eq!(last.level_cm, 45.0);
    assert_eq!(last.pressure_kpa, pressure_kpa(45.0));
    assert_eq!(last.valve, StateId::Open);
    assert_eq!(rig.app.last_snapshot(), last);
}

// ── Degraded inputs ───────────────────────────────────────────

#[test]
fn sensor_failure_reads_as_empty_pipe() {
    let mut rig = Rig::new();
    rig.step(0, 50.0);
    assert_eq!(rig.app.state(), StateId::Open);

    rig.clock.set(1_000);
    rig.hw.scripted.push_back(Err(SensorError::EchoTimeout));
    let snap = rig
        .app
        .tick(&mut rig.hw, &rig.clock, &mut rig.display, &mut rig.sink);

    assert_eq!(snap.level_cm, 0.0);
    assert_eq!(snap.pressure_kpa, 0.0);
    assert_eq!(rig.app.state(), StateId::Closed);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::SensorFallback(SensorError::EchoTimeout))),
        1
    );
    assert_eq!(rig.app.build_telemetry(0).sensor_fallbacks, 1);
}

#[test]
fn negative_level_is_clamped() {
    let mut rig = Rig::new();
    let snap = rig.step(0, -4.0);
    assert_eq!(snap.level_cm, 0.0);
    assert_eq!(snap.pressure_kpa, 0.0);
}

#[test]
fn failed_open_is_resent_on_hold_rearm() {
    let mut rig = Rig::new();
    rig.hw.fail_moves = true;

    rig.step(0, 50.0);
    assert_eq!(rig.app.state(), StateId::Open);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ActuatorFault(ActuatorError::PwmWriteFailed))),
        1
    );

    // Inside the hold window the committed state stands without a retry.
    rig.step(1_000, 50.0);
    assert_eq!(rig.hw.valve_moves(), vec![0, 90]);

    // Each re-arm re-confirms the open position.
    rig.hw.fail_moves = false;
    rig.step(30_000, 50.0);
    rig.step(60_000, 50.0);
    assert_eq!(rig.app.state(), StateId::Open);
    assert_eq!(rig.app.open_timestamp_ms(), Some(60_000));
    assert_eq!(rig.hw.valve_moves(), vec![0, 90, 90, 90]);
    assert_eq!(rig.app.build_telemetry(0).actuator_faults, 1);
    assert_eq!(rig.app.build_telemetry(0).hold_rearms, 2);
}

#[test]
fn override_held_past_hold_window_never_redrives() {
    let mut rig = Rig::new();
    rig.hw.override_active = true;
    for t in [0, 30_000, 60_000, 90_000] {
        rig.step(t, 50.0);
    }
    assert_eq!(rig.hw.valve_moves(), vec![0, 90]);
    assert_eq!(rig.app.open_timestamp_ms(), Some(0));
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_reflects_counters() {
    let mut rig = Rig::new();
    rig.step(0, 50.0);
    rig.step(30_000, 50.0);
    rig.step(31_000, 10.0);

    let t = rig.app.build_telemetry(2);
    assert_eq!(t.cycles, 3);
    assert_eq!(t.hold_rearms, 1);
    assert_eq!(t.loop_overruns, 2);
    assert_eq!(t.open_timestamp_ms, Some(30_000));
    assert_eq!(t.snapshot.valve, StateId::Closed);
    assert!(!t.override_active);
}

#[test]
fn zero_hold_rearms_every_cycle_above_threshold() {
    let mut rig = Rig::with_config(SystemConfig {
        min_open_duration_ms: 0,
        ..SystemConfig::default()
    });
    rig.step(0, 50.0);
    rig.step(1_000, 50.0);
    rig.step(2_000, 50.0);
    assert_eq!(rig.app.open_timestamp_ms(), Some(2_000));
    assert_eq!(rig.app.build_telemetry(0).hold_rearms, 2);
}
