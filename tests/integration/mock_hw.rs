//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.

use std::cell::Cell;
use std::collections::VecDeque;

use overflowguard::app::events::{AppEvent, StatusSnapshot};
use overflowguard::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort, TimePort};
use overflowguard::error::{ActuatorError, SensorError};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    MoveValve(u8),
    SetBuzzer(bool),
    SetIndicators { open: bool, closed: bool },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    /// Level returned once no scripted reading is queued.
    pub level: Result<f32, SensorError>,
    /// Readings consumed one per cycle before falling back to `level`.
    pub scripted: VecDeque<Result<f32, SensorError>>,
    pub override_active: bool,
    pub fail_moves: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            level: Ok(0.0),
            scripted: VecDeque::new(),
            override_active: false,
            fail_moves: false,
        }
    }

    pub fn valve_moves(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::MoveValve(angle) => Some(*angle),
                _ => None,
            })
            .collect()
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetBuzzer(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// `(open, closed)` as last written.
    pub fn indicators(&self) -> Option<(bool, bool)> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetIndicators { open, closed } => Some((*open, *closed)),
            _ => None,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_level(&mut self) -> Result<f32, SensorError> {
        self.scripted.pop_front().unwrap_or(self.level)
    }

    fn read_override(&mut self) -> bool {
        self.override_active
    }
}

impl ActuatorPort for MockHardware {
    fn move_valve(&mut self, angle_deg: u8) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::MoveValve(angle_deg));
        if self.fail_moves {
            Err(ActuatorError::PwmWriteFailed)
        } else {
            Ok(())
        }
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetBuzzer(on));
    }

    fn set_indicators(&mut self, open: bool, closed: bool) {
        self.calls.push(ActuatorCall::SetIndicators { open, closed });
    }
}

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    now: Cell<u64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimePort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── CaptureDisplay ────────────────────────────────────────────

pub struct CaptureDisplay {
    pub frames: Vec<StatusSnapshot>,
}

impl CaptureDisplay {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }
}

impl DisplayPort for CaptureDisplay {
    fn render(&mut self, snapshot: &StatusSnapshot) {
        self.frames.push(*snapshot);
    }
}

// ── LogSink ───────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
