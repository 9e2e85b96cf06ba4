//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the control decision engine for the overflow
//! guard: per-cycle orchestration of the pressure model, the valve FSM and
//! the alarm policy.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
