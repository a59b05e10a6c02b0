//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                     |
//! |----------------|--------------------|---------------------------------|
//! | `hardware`     | LevelSensorPort    | any level sensor driver         |
//! |                | GateActuatorPort   | servo PWM (embedded-hal)        |
//! |                | AlarmPort          | buzzer GPIO + delay             |
//! | `simulation`   | LevelSensorPort    | in-memory `LevelModel`          |
//! |                | GateActuatorPort   | recorded angles                 |
//! |                | AlarmPort          | alarm counter                   |
//! | `log_sink`     | EventSink          | serial / stdout log             |
//! | `lcd_sink`     | EventSink          | 16×2 character display          |
//! | `config_file`  | ConfigPort         | JSON file                       |
//! | `console_log`  | log::Log           | stdout (host builds)            |

pub mod config_file;
pub mod console_log;
pub mod hardware;
pub mod lcd_sink;
pub mod log_sink;
pub mod simulation;
