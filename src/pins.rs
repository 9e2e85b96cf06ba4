//! GPIO / peripheral pin assignments for the OverflowGuard main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Valve servo (SG90-class, 50 Hz PWM)
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the valve servo signal line.
pub const VALVE_SERVO_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Ultrasonic distance sensor (HC-SR04, mounted above the pipe)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs HIGH pulse starts a measurement.
pub const ULTRASONIC_TRIG_GPIO: i32 = 5;
/// Digital input: HIGH for the round-trip time of the echo.
pub const ULTRASONIC_ECHO_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Operator inputs
// ---------------------------------------------------------------------------

/// Manual override toggle switch, active-low with internal pull-up.
pub const OVERRIDE_SWITCH_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Alarm outputs
// ---------------------------------------------------------------------------

/// Active buzzer, HIGH = sounding.
pub const BUZZER_GPIO: i32 = 8;
/// Indicator lamp lit while the valve is open.
pub const LED_OPEN_GPIO: i32 = 11;
/// Indicator lamp lit while the valve is closed.
pub const LED_CLOSED_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution for the servo (bits).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
