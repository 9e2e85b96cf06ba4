//! Fuzz target: `SystemConfig::from_json`
//!
//! Arbitrary bytes must either be rejected or produce a configuration
//! that passes validation.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use overflowguard::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(cfg) = SystemConfig::from_json(data) {
        assert!(cfg.validate().is_ok());
        assert!(cfg.overflow_threshold_cm < cfg.pipe_height_cm);
        assert!(cfg.telemetry_interval_cycles() >= 1);
    }
});
