//! Control-loop scheduling contract.
//!
//! The loop runs one cycle per `period_ms`, measured start to start.  The
//! blocking valve settle time is part of the cycle, so the remaining sleep
//! shrinks when the valve moves.  A cycle that runs longer than the period
//! plus `jitter_tolerance_ms` is an overrun: it is logged and counted, and
//! the next cycle starts immediately.
//!
//! ```text
//!   start        work (sense · decide · actuate · render)     sleep
//!     │◀──────────────── elapsed ──────────────────▶│◀───────────▶│
//!     │◀─────────────────────── period_ms ─────────────────────▶│
//! ```
//!
//! The schedule only does arithmetic on clock samples handed to it, so the
//! decision logic never depends on a real sleep having happened.

use log::warn;

use crate::config::SystemConfig;

/// Outcome of accounting for one finished cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTiming {
    /// Time the cycle's work took (ms).
    pub elapsed_ms: u64,
    /// Time to sleep before the next cycle starts (ms).
    pub sleep_ms: u64,
    /// True if the cycle exceeded the period plus jitter tolerance.
    pub overrun: bool,
}

/// Fixed-period polling schedule.
pub struct LoopSchedule {
    period_ms: u32,
    jitter_tolerance_ms: u32,
    overruns: u32,
}

impl LoopSchedule {
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_period(config.control_loop_interval_ms, config.loop_jitter_tolerance_ms)
    }

    pub fn with_period(period_ms: u32, jitter_tolerance_ms: u32) -> Self {
        Self {
            period_ms,
            jitter_tolerance_ms,
            overruns: 0,
        }
    }

    /// Account for a cycle that started at `started_ms` and finished at
    /// `finished_ms` (both monotonic clock samples).
    pub fn complete_cycle(&mut self, started_ms: u64, finished_ms: u64) -> CycleTiming {
        let elapsed_ms = finished_ms.saturating_sub(started_ms);
        let period = u64::from(self.period_ms);
        let overrun = elapsed_ms > period + u64::from(self.jitter_tolerance_ms);

        if overrun {
            self.overruns = self.overruns.saturating_add(1);
            warn!(
                "Control cycle overran: {}ms against a {}ms period",
                elapsed_ms, period
            );
        }

        CycleTiming {
            elapsed_ms,
            sleep_ms: period.saturating_sub(elapsed_ms),
            overrun,
        }
    }

    /// Cycles that exceeded the period plus jitter tolerance.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}
