//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial or render on the LCD.

use serde::Serialize;

use crate::control::direction::Direction;
use crate::control::gate_bank::GateId;
use crate::error::{ActuatorError, SensorError};
use crate::fsm::GateState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Serialize)]
pub enum AppEvent {
    /// Per-cycle status snapshot.
    Status(StatusSnapshot),

    /// The gate bank moved.
    GatesChanged {
        from: GateState,
        to: GateState,
        level_cm: f32,
    },

    /// The alarm was triggered by an opening edge.
    AlarmRaised { level_cm: f32 },

    /// No usable reading this cycle; the cycle was skipped.
    ReadingMissed { cycle: u64, error: SensorError },

    /// A gate command was rejected by the actuator.
    ActuatorFault { gate: GateId, error: ActuatorError },

    /// The application service has started (carries initial state).
    Started(GateState),
}

/// A read-only snapshot consumed by status sinks every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub cycle: u64,
    pub level_cm: f32,
    pub state: GateState,
    pub gate_count: u8,
    pub gates_open: bool,
    pub flow_estimate: f32,
    pub direction: Direction,
}
