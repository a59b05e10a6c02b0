//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (level sensor, gate servos, buzzer, status sinks, config
//! file) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the control core never touches hardware
//! directly.

use crate::config::SystemConfig;
use crate::control::gate_bank::GateId;
use crate::error::{ActuatorError, SensorError};

// ───────────────────────────────────────────────────────────────
// Level sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one water-level reading per cycle.
pub trait LevelSensorPort {
    /// Current level in cm.  An `Err` skips the cycle: no decision is
    /// taken and the gates hold their previous state.
    fn read_level(&mut self) -> Result<f32, SensorError>;

    /// Called once at the end of every completed cycle.
    ///
    /// Simulated sources evolve their level here and return it so the
    /// cycle reports the post-advance value.  Physical sensors keep the
    /// default and the cycle reports the reading it decided on.
    fn advance(&mut self, _gates_open: bool) -> Option<f32> {
        None
    }
}

// ───────────────────────────────────────────────────────────────
// Gate actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the gate servos.
///
/// Called once per gate on each transition edge, never every cycle.
pub trait GateActuatorPort {
    /// Drive gate `gate` to `degrees` (0 = shut).
    fn set_gate_angle(&mut self, gate: GateId, degrees: u8) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Alarm port (driven adapter: domain → buzzer)
// ───────────────────────────────────────────────────────────────

pub trait AlarmPort {
    /// Fire-and-forget: start the alarm sequence.
    fn sound_alarm(&mut self);

    /// Called at the start of every cycle so scheduled alarms can play
    /// one pulse per tick.
    fn service_alarm(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// character LCD, ...).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Fan out to two sinks.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: config source → domain)
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations MUST run [`SystemConfig::validate`] before returning.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for ConfigError {}
