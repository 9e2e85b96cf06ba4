//! Fuzz target: `AppService::tick`
//!
//! Each 6-byte chunk drives one control cycle:
//! `[level f32 LE (4)] [override (1)] [clock step in 100 ms units (1)]`.
//! Arbitrary bit patterns (NaN, infinities, negatives) must never panic,
//! and every cycle must end with complementary lamps and a valve state
//! consistent with its inputs.
//!
//! cargo fuzz run fuzz_control_cycle

#![no_main]

use std::cell::Cell;

use libfuzzer_sys::fuzz_target;
use overflowguard::app::events::{AppEvent, StatusSnapshot};
use overflowguard::app::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort, TimePort};
use overflowguard::app::service::AppService;
use overflowguard::config::SystemConfig;
use overflowguard::error::{ActuatorError, SensorError};
use overflowguard::fsm::StateId;

struct Rig {
    level: f32,
    override_active: bool,
}

impl SensorPort for Rig {
    fn read_level(&mut self) -> Result<f32, SensorError> {
        Ok(self.level)
    }

    fn read_override(&mut self) -> bool {
        self.override_active
    }
}

impl ActuatorPort for Rig {
    fn move_valve(&mut self, _angle_deg: u8) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn set_buzzer(&mut self, _on: bool) {}

    fn set_indicators(&mut self, _open: bool, _closed: bool) {}
}

struct Clock(Cell<u64>);

impl TimePort for Clock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

struct Discard;

impl DisplayPort for Discard {
    fn render(&mut self, _snapshot: &StatusSnapshot) {}
}

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let cfg = SystemConfig::default();
    let threshold = cfg.overflow_threshold_cm;
    let mut app = AppService::new(cfg);
    let mut rig = Rig { level: 0.0, override_active: false };
    let clock = Clock(Cell::new(0));
    let mut display = Discard;
    let mut sink = Discard;
    app.start(&mut rig, &mut sink);

    for chunk in data.chunks_exact(6) {
        rig.level = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        rig.override_active = chunk[4] & 1 == 1;
        clock.0.set(clock.0.get() + u64::from(chunk[5]) * 100);

        let snap = app.tick(&mut rig, &clock, &mut display, &mut sink);

        assert!(snap.level_cm.is_finite() && snap.level_cm >= 0.0);
        assert_ne!(snap.open_indicator, snap.closed_indicator);
        if rig.override_active || snap.level_cm >= threshold {
            assert_eq!(snap.valve, StateId::Open);
        } else {
            assert_eq!(snap.valve, StateId::Closed);
        }
    }
});
