//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | valve={:?} | level={:.1}cm P={:.2}kPa | override={} | \
                     opened_at={:?} | cycles={} fallbacks={} faults={} rearms={} overruns={}",
                    t.snapshot.valve,
                    t.snapshot.level_cm,
                    t.snapshot.pressure_kpa,
                    if t.override_active { "ON" } else { "OFF" },
                    t.open_timestamp_ms,
                    t.cycles,
                    t.sensor_fallbacks,
                    t.actuator_faults,
                    t.hold_rearms,
                    t.loop_overruns,
                );
            }
            AppEvent::StateChanged { from, to, level_cm } => {
                info!("STATE | {:?} -> {:?} at {:.1}cm", from, to, level_cm);
            }
            AppEvent::HoldRearmed { at_ms } => {
                info!("HOLD | re-armed at {}ms", at_ms);
            }
            AppEvent::OverrideChanged { active } => {
                info!("OVERRIDE | {}", if *active { "engaged" } else { "released" });
            }
            AppEvent::AlarmRaised { level_cm } => {
                warn!("ALARM | overflow at {:.1}cm", level_cm);
            }
            AppEvent::AlarmCleared => {
                info!("ALARM | cleared");
            }
            AppEvent::SensorFallback(e) => {
                warn!("SENSOR | {}, level forced to 0", e);
            }
            AppEvent::ActuatorFault(e) => {
                warn!("VALVE | {}", e);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
