//! Concrete state handler functions and table builder.
//!
//! ```text
//!            [override]  or  [level >= threshold]
//!  CLOSED ─────────────────────────────────────────▶ OPEN
//!    ▲                                                │ ▲
//!    │        [no override and level < threshold]     │ │ [level >= threshold,
//!    └────────────────────────────────────────────────┘ │  hold elapsed:
//!                                                       │  re-arm timestamp]
//!                                                       └─┘
//! ```
//!
//! Priority inside each handler: override first, then the threshold.
//! Entering OPEN arms the hold window; an override that finds the valve
//! already open leaves the window untouched.

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Closed
        StateDescriptor {
            id: StateId::Closed,
            name: "Closed",
            on_enter: Some(closed_enter),
            on_exit: None,
            on_update: closed_update,
        },
        // Index 1: Open
        StateDescriptor {
            id: StateId::Open,
            name: "Open",
            on_enter: Some(open_enter),
            on_exit: Some(open_exit),
            on_update: open_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED state
// ═══════════════════════════════════════════════════════════════════════════

fn closed_enter(ctx: &mut FsmContext) {
    ctx.commands.valve_angle_deg = ctx.config.valve_closed_angle_deg;
    info!(
        "CLOSED: level {:.1}cm, monitoring for overflow",
        ctx.inputs.level_cm
    );
}

fn closed_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.inputs.override_active {
        info!("CLOSED: manual override → opening");
        return Some(StateId::Open);
    }

    if ctx.level_at_threshold() {
        return Some(StateId::Open);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPEN state
// ═══════════════════════════════════════════════════════════════════════════

fn open_enter(ctx: &mut FsmContext) {
    ctx.arm_hold();
    ctx.commands.valve_angle_deg = ctx.config.valve_open_angle_deg;
    info!(
        "OPEN: level {:.1}cm, hold armed at t={}ms",
        ctx.inputs.level_cm, ctx.inputs.now_ms
    );
}

fn open_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Override keeps the valve open without touching the hold window.
    if ctx.inputs.override_active {
        return None;
    }

    if ctx.level_at_threshold() {
        if ctx.hold_elapsed() {
            ctx.arm_hold();
            ctx.hold_rearms += 1;
            info!("OPEN: hold re-armed at t={}ms", ctx.inputs.now_ms);
        }
        return None;
    }

    Some(StateId::Closed)
}

fn open_exit(ctx: &mut FsmContext) {
    info!(
        "OPEN: level {:.1}cm below threshold after {} cycles",
        ctx.inputs.level_cm, ctx.ticks_in_state
    );
}
