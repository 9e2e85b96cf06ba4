//! Pure control computations that sit beside the valve state machine.

pub mod pressure;
