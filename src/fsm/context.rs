//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` replaces what would otherwise be free-floating globals: the
//! latest level reading, the hysteresis thresholds and the gate bank all
//! live here and are only touched by state handlers.

use crate::config::SystemConfig;
use crate::control::gate_bank::GateBank;

// ---------------------------------------------------------------------------
// Thresholds (immutable after construction)
// ---------------------------------------------------------------------------

/// Hysteresis thresholds.  `close_cm < open_cm` is guaranteed by
/// [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Gates open when the level is strictly above this value.
    pub open_cm: f32,
    /// Gates close when the level is at or below this value.
    pub close_cm: f32,
}

impl Thresholds {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            open_cm: config.open_threshold_cm,
            close_cm: config.close_threshold_cm,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
#[derive(Debug, Clone)]
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Input --
    /// Level reading the current tick decides on (cm).
    pub level_cm: f32,
    pub thresholds: Thresholds,

    // -- Outputs --
    /// Logical gate bank; written only by `on_enter` handlers.
    pub gates: GateBank,
    /// Set when entering `Open`; the owner takes it and fires the alarm.
    pub alarm_requested: bool,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            level_cm: config.initial_level_cm,
            thresholds: Thresholds::from_config(config),
            gates: GateBank::new(config.gate_count),
            alarm_requested: false,
        }
    }

    /// `true` once the level has risen strictly past the open threshold.
    pub fn above_open_threshold(&self) -> bool {
        self.level_cm > self.thresholds.open_cm
    }

    /// `true` once the level has fallen to or below the close threshold.
    pub fn at_or_below_close_threshold(&self) -> bool {
        self.level_cm <= self.thresholds.close_cm
    }
}
