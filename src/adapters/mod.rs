//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                 |
//! |-------------|--------------|-----------------------------|
//! | `hardware`  | SensorPort   | HC-SR04, override switch    |
//! |             | ActuatorPort | Servo PWM, buzzer, lamps    |
//! | `display`   | DisplayPort  | Status line on the console  |
//! | `log_sink`  | EventSink    | Serial log output           |
//! | `time`      | TimePort     | ESP32 system timer          |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
