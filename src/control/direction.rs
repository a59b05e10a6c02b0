//! Level trend indicator for status sinks.
//!
//! In [`DirectionMode::GateState`] the trend is inferred from the gates:
//! open means falling, closed means rising.  This is what the status
//! display has always shown, but it is a proxy, not a derivative.
//! [`DirectionMode::LevelDelta`] compares consecutive reported levels
//! instead and can also report `Steady` (e.g. pinned at a clamp bound).

use serde::Serialize;

use crate::config::DirectionMode;

/// Changes smaller than this are reported as `Steady`.
const STEADY_EPSILON_CM: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Rising,
    Falling,
    Steady,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "RISING",
            Self::Falling => "FALLING",
            Self::Steady => "STEADY",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectionTracker {
    mode: DirectionMode,
    last_level_cm: Option<f32>,
}

impl DirectionTracker {
    pub fn new(mode: DirectionMode) -> Self {
        Self {
            mode,
            last_level_cm: None,
        }
    }

    /// Record this cycle's reported level and derive the trend.
    pub fn update(&mut self, gates_open: bool, level_cm: f32) -> Direction {
        let previous = self.last_level_cm.replace(level_cm);
        match (self.mode, previous) {
            (DirectionMode::LevelDelta, Some(prev)) => {
                let delta = level_cm - prev;
                if delta > STEADY_EPSILON_CM {
                    Direction::Rising
                } else if delta < -STEADY_EPSILON_CM {
                    Direction::Falling
                } else {
                    Direction::Steady
                }
            }
            // No history yet: fall back to the gate proxy.
            _ => from_gates(gates_open),
        }
    }
}

fn from_gates(gates_open: bool) -> Direction {
    if gates_open {
        Direction::Falling
    } else {
        Direction::Rising
    }
}
