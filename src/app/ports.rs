//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (level sensor, override switch, valve servo, lamps,
//! display, clock, event sinks) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the decision engine never touches hardware directly.

use crate::error::{ActuatorError, SensorError};

use super::events::{AppEvent, StatusSnapshot};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle for each input.
pub trait SensorPort {
    /// Fluid level above the pipe floor in centimetres.
    ///
    /// Adapters should clamp to zero, but the service clamps again and
    /// treats any `Err` as an empty pipe.
    fn read_level(&mut self) -> Result<f32, SensorError>;

    /// Current position of the manual override switch.
    fn read_override(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: valve servo, buzzer and indicator lamps.
pub trait ActuatorPort {
    /// Drive the valve servo to `angle_deg` and block until it has settled.
    fn move_valve(&mut self, angle_deg: u8) -> Result<(), ActuatorError>;

    /// Switch the overflow buzzer.
    fn set_buzzer(&mut self, on: bool);

    /// Drive the open/closed indicator lamps.
    fn set_indicators(&mut self, open: bool, closed: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → status display)
// ───────────────────────────────────────────────────────────────

/// Renders the per-cycle status snapshot.  No logic lives behind this.
pub trait DisplayPort {
    fn render(&mut self, snapshot: &StatusSnapshot);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: monotonic clock → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic, non-decreasing clock.
pub trait TimePort {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, test capture, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
