//! Status display adapter.
//!
//! The device has no panel yet; the status line is formatted into a
//! fixed-capacity buffer and written to the console log, the same text a
//! character LCD would show.

use core::fmt::Write;

use heapless::String;
use log::info;

use crate::app::events::StatusSnapshot;
use crate::app::ports::DisplayPort;
use crate::fsm::StateId;

/// Capacity of one rendered status line.
pub const LINE_CAPACITY: usize = 64;

/// Format a snapshot as a single status line.
pub fn format_status(snapshot: &StatusSnapshot) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    let valve = match snapshot.valve {
        StateId::Closed => "CLOSED",
        StateId::Open => "OPEN",
    };
    // Level never exceeds the validated pipe height (≤ 400 cm), so the
    // longest line ("L=400.0cm P=39.24kPa V=CLOSED BUZZ") is 34 bytes.
    let written = write!(
        line,
        "L={:.1}cm P={:.2}kPa V={}{}",
        snapshot.level_cm,
        snapshot.pressure_kpa,
        valve,
        if snapshot.buzzer_on { " BUZZ" } else { "" },
    );
    debug_assert!(written.is_ok(), "status line exceeds {LINE_CAPACITY} bytes");
    line
}

/// Renders each snapshot to the log.
pub struct LogDisplay {
    last: String<LINE_CAPACITY>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self { last: String::new() }
    }

    /// Most recently rendered line.
    pub fn last_line(&self) -> &str {
        &self.last
    }
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for LogDisplay {
    fn render(&mut self, snapshot: &StatusSnapshot) {
        self.last = format_status(snapshot);
        info!("DISPLAY | {}", self.last);
    }
}
