//! OverflowGuard Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-period polling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   LogDisplay   Esp32Time       │
//! │  (Sensor+Actuator) (EventSink)    (Display)    (TimePort)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Pressure · Valve FSM · Alarm                          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  LoopSchedule (period + jitter) · Watchdog                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On a host build the same loop runs against the simulated sensors,
//! logging through `env_logger` (filter with `RUST_LOG`).
//! `OVERFLOWGUARD_CONFIG` may name a JSON file overriding the defaults.
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use overflowguard::adapters::display::LogDisplay;
use overflowguard::adapters::hardware::HardwareAdapter;
use overflowguard::adapters::log_sink::LogEventSink;
use overflowguard::adapters::time::Esp32TimeAdapter;
use overflowguard::app::events::AppEvent;
use overflowguard::app::ports::{EventSink, TimePort};
use overflowguard::app::service::AppService;
use overflowguard::config::SystemConfig;
use overflowguard::drivers::buzzer::Buzzer;
use overflowguard::drivers::delay::ThreadDelay;
use overflowguard::drivers::indicator_led::IndicatorLamps;
use overflowguard::drivers::valve::ValveServo;
use overflowguard::drivers::{hw_init, watchdog};
use overflowguard::error::Error;
use overflowguard::pins;
use overflowguard::scheduler::LoopSchedule;
use overflowguard::sensors::SensorHub;
use overflowguard::sensors::override_switch::OverrideSwitch;
use overflowguard::sensors::ultrasonic::UltrasonicSensor;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  OverflowGuard v{}                   ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;
    info!(
        "Config: pipe={:.1}cm threshold={:.1}cm hold={}ms period={}ms",
        config.pipe_height_cm,
        config.overflow_threshold_cm,
        config.min_open_duration_ms,
        config.control_loop_interval_ms,
    );

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;
    let watchdog = watchdog::Watchdog::new(watchdog::timeout_for(&config));

    // ── 4. Construct adapters ─────────────────────────────────
    let sensor_hub = SensorHub::new(
        UltrasonicSensor::new(
            pins::ULTRASONIC_TRIG_GPIO,
            pins::ULTRASONIC_ECHO_GPIO,
            config.sensor_max_range_cm,
        ),
        OverrideSwitch::new(pins::OVERRIDE_SWITCH_GPIO),
        config.pipe_height_cm,
    );

    let mut hw = HardwareAdapter::new(
        sensor_hub,
        ValveServo::new(config.actuator_settle_ms),
        Buzzer::new(),
        IndicatorLamps::new(),
        ThreadDelay,
    );
    let clock = Esp32TimeAdapter::new();
    let mut display = LogDisplay::new();
    let mut log_sink = LogEventSink::new();
    let mut schedule = LoopSchedule::new(&config);
    let telemetry_every = config.telemetry_interval_cycles();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = AppService::new(config);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        let started_ms = clock.now_ms();

        app.tick(&mut hw, &clock, &mut display, &mut log_sink);

        if app.cycle_count() % telemetry_every == 0 {
            let t = app.build_telemetry(schedule.overruns());
            log_sink.emit(&AppEvent::Telemetry(t));
        }

        watchdog.feed();

        let timing = schedule.complete_cycle(started_ms, clock.now_ms());
        sleep_ms(timing.sleep_ms);
    }
}

/// Defaults, or the JSON file named by `OVERFLOWGUARD_CONFIG` on host.
fn load_config() -> Result<SystemConfig> {
    #[cfg(not(target_os = "espidf"))]
    if let Ok(path) = std::env::var("OVERFLOWGUARD_CONFIG") {
        let raw = std::fs::read(&path)?;
        let cfg = SystemConfig::from_json(&raw).map_err(Error::from)?;
        info!("Config loaded from {}", path);
        return Ok(cfg);
    }

    let cfg = SystemConfig::default();
    cfg.validate().map_err(Error::from)?;
    Ok(cfg)
}

#[cfg(target_os = "espidf")]
fn sleep_ms(ms: u64) {
    esp_idf_hal::delay::FreeRtos::delay_ms(ms as u32);
}

#[cfg(not(target_os = "espidf"))]
fn sleep_ms(ms: u64) {
    std::thread::sleep(std::time::Duration::from_millis(ms));
}
