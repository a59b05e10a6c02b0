//! Water-level evolution model.
//!
//! Stands in for the channel hydraulics: with every gate shut the level
//! rises by the inflow rate each cycle, with the gates open it falls by the
//! outflow rate.  The result is always clamped into the measuring range.
//! A physical installation swaps the increment rule for a sensor, but keeps
//! the same contract through [`LevelBounds::accept`]: one reading per cycle,
//! already clamped.

use crate::config::SystemConfig;
use crate::error::SensorError;

// ---------------------------------------------------------------------------
// LevelBounds
// ---------------------------------------------------------------------------

/// Closed measuring interval `[min_cm, max_cm]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBounds {
    pub min_cm: f32,
    pub max_cm: f32,
}

impl LevelBounds {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            min_cm: config.min_level_cm,
            max_cm: config.max_level_cm,
        }
    }

    pub fn clamp(&self, level_cm: f32) -> f32 {
        level_cm.clamp(self.min_cm, self.max_cm)
    }

    /// Validate and clamp an external reading.
    pub fn accept(&self, raw_cm: f32) -> Result<f32, SensorError> {
        if raw_cm.is_finite() {
            Ok(self.clamp(raw_cm))
        } else {
            Err(SensorError::InvalidReading)
        }
    }

    pub fn contains(&self, level_cm: f32) -> bool {
        level_cm >= self.min_cm && level_cm <= self.max_cm
    }
}

// ---------------------------------------------------------------------------
// LevelModel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LevelModel {
    level_cm: f32,
    bounds: LevelBounds,
    inflow_rate_cm: f32,
    outflow_rate_cm: f32,
}

impl LevelModel {
    pub fn new(config: &SystemConfig) -> Self {
        let bounds = LevelBounds::from_config(config);
        Self {
            level_cm: bounds.clamp(config.initial_level_cm),
            bounds,
            inflow_rate_cm: config.inflow_rate_cm,
            outflow_rate_cm: config.outflow_rate_cm,
        }
    }

    /// Current level (cm).
    pub fn level(&self) -> f32 {
        self.level_cm
    }

    pub fn bounds(&self) -> LevelBounds {
        self.bounds
    }

    /// Move the level one cycle forward and return the new value.
    pub fn advance(&mut self, gates_open: bool) -> f32 {
        let next = if gates_open {
            self.level_cm - self.outflow_rate_cm
        } else {
            self.level_cm + self.inflow_rate_cm
        };
        self.level_cm = self.bounds.clamp(next);
        self.level_cm
    }

    /// Overwrite the level, e.g. to replay a recorded scenario.  Clamped.
    pub fn set_level(&mut self, level_cm: f32) -> Result<f32, SensorError> {
        self.level_cm = self.bounds.accept(level_cm)?;
        Ok(self.level_cm)
    }
}
