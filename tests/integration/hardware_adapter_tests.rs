//! Host-simulation tests for the concrete hardware adapter.
//!
//! The simulated sensors read process-wide atomics, so everything that
//! touches them lives in a single test.

use embedded_hal::delay::DelayNs;

use overflowguard::adapters::hardware::HardwareAdapter;
use overflowguard::app::ports::{ActuatorPort, SensorPort};
use overflowguard::drivers::buzzer::Buzzer;
use overflowguard::drivers::indicator_led::IndicatorLamps;
use overflowguard::drivers::valve::ValveServo;
use overflowguard::error::{ActuatorError, SensorError};
use overflowguard::sensors::SensorHub;
use overflowguard::sensors::override_switch::{OverrideSwitch, sim_set_override};
use overflowguard::sensors::ultrasonic::{UltrasonicSensor, sim_set_echo_us};

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn adapter(max_range_cm: f32) -> HardwareAdapter<NoDelay> {
    let hub = SensorHub::new(
        UltrasonicSensor::new(5, 6, max_range_cm),
        OverrideSwitch::new(7),
        50.0,
    );
    HardwareAdapter::new(hub, ValveServo::new(0), Buzzer::new(), IndicatorLamps::new(), NoDelay)
}

#[test]
fn simulated_sensors_feed_the_ports() {
    let mut hw = adapter(400.0);

    // 10 cm below the sensor → 40 cm of fluid.
    sim_set_echo_us(583);
    let level = hw.read_level().unwrap();
    assert!((level - 40.0).abs() < 0.05, "level {level}");

    // Echo from beyond the pipe floor clamps at zero.
    sim_set_echo_us(3_500);
    assert_eq!(hw.read_level(), Ok(0.0));

    sim_set_echo_us(0);
    assert_eq!(hw.read_level(), Err(SensorError::EchoTimeout));

    let mut short = adapter(30.0);
    sim_set_echo_us(2_915);
    assert_eq!(short.read_level(), Err(SensorError::OutOfRange));

    sim_set_override(true);
    assert!(hw.read_override());
    sim_set_override(false);
    assert!(!hw.read_override());

    sim_set_echo_us(2_915);
}

#[test]
fn valve_moves_are_tracked() {
    let mut hw = adapter(400.0);
    assert_eq!(hw.valve_angle_deg(), None);

    hw.move_valve(90).unwrap();
    assert_eq!(hw.valve_angle_deg(), Some(90));

    assert_eq!(hw.move_valve(181), Err(ActuatorError::PositionOutOfRange));
    assert_eq!(hw.valve_angle_deg(), Some(90));
}
