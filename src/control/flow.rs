//! Outflow estimate for status reporting.
//!
//! Each open gate contributes `angle × coefficient × √level`; closed gates
//! contribute nothing.  The figure is illustrative only and never feeds back
//! into gate decisions.

use crate::config::SystemConfig;

use super::gate_bank::GateBank;

#[derive(Debug, Clone, Copy)]
pub struct FlowEstimator {
    open_angle_deg: f32,
    discharge_coefficient: f32,
}

impl FlowEstimator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            open_angle_deg: config.gate_open_angle_deg as f32,
            discharge_coefficient: config.discharge_coefficient,
        }
    }

    /// Estimated outflow for the bank at `level_cm`.
    pub fn estimate_outflow(&self, gates: &GateBank, level_cm: f32) -> f32 {
        // Level is non-negative by the model's clamp; floor anyway so sqrt stays real.
        let head = level_cm.max(0.0).sqrt();
        let per_gate = self.open_angle_deg * self.discharge_coefficient * head;
        gates
            .ids()
            .filter(|&id| gates.is_gate_open(id))
            .map(|_| per_gate)
            .sum()
    }
}
