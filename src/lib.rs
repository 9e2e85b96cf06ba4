//! OverflowGuard firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod scheduler;

pub mod pins;

// Hardware-facing modules compile on every target; the real register
// access inside is cfg-gated.
pub mod adapters;
pub mod control;
pub mod drivers;
pub mod sensors;
