//! Collaborator error types for the flood-gate controller.
//!
//! The control core itself is total: hysteresis, level evolution and flow
//! estimation cannot fail.  What can fail are the collaborators around it
//! (a sensor that returns no echo, a servo PWM write that is rejected).
//! Those failures are reported through the small `Copy` enums below so they
//! can be carried inside [`AppEvent`](crate::app::events::AppEvent)s without
//! allocation.

use core::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SensorError {
    /// The ultrasonic ping timed out or the echo was beyond range.
    NoEcho,
    /// The reading was NaN or infinite.
    InvalidReading,
    /// The source is not connected or not ready yet.
    Unavailable,
}

impl core::error::Error for SensorError {}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEcho => write!(f, "no echo"),
            Self::InvalidReading => write!(f, "invalid reading"),
            Self::Unavailable => write!(f, "sensor unavailable"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
    /// The gate index is not wired on this board.
    UnknownGate,
}

impl core::error::Error for ActuatorError {}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::UnknownGate => write!(f, "unknown gate"),
        }
    }
}
