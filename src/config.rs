//! System configuration parameters
//!
//! All tunable parameters for the flood-gate controller.  The defaults
//! reproduce the reference installation: three gates, open above 20 cm,
//! close at or below 8 cm, a 0–25 cm measuring range and a 300 ms cycle.
//! Values can be overridden from a JSON file (see
//! [`JsonConfigFile`](crate::adapters::config_file::JsonConfigFile)).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Maximum number of gates a single bank can drive.
pub const MAX_GATES: usize = 3;

/// How the reported level direction is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionMode {
    /// Falling while the gates are open, rising otherwise.
    GateState,
    /// Sign of the change between consecutive reported levels.
    LevelDelta,
}

/// How the alarm pulses are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmMode {
    /// Play every pulse before returning (stalls the cycle ~900 ms).
    Blocking,
    /// Queue the pulses and play one per control cycle.
    Scheduled,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Thresholds ---
    /// Level (cm) strictly above which the gates open
    pub open_threshold_cm: f32,
    /// Level (cm) at or below which the gates close
    pub close_threshold_cm: f32,

    // --- Level model ---
    /// Lower bound of the measuring range (cm)
    pub min_level_cm: f32,
    /// Upper bound of the measuring range (cm)
    pub max_level_cm: f32,
    /// Level at power-on (cm)
    pub initial_level_cm: f32,
    /// Rise per cycle while every gate is closed (cm)
    pub inflow_rate_cm: f32,
    /// Fall per cycle while the gates are open (cm)
    pub outflow_rate_cm: f32,

    // --- Gates ---
    /// Number of gates in the bank (1..=MAX_GATES)
    pub gate_count: u8,
    /// Servo angle for a fully open gate (degrees)
    pub gate_open_angle_deg: u8,
    /// Servo angle for a closed gate (degrees)
    pub gate_closed_angle_deg: u8,
    /// Outflow per degree of opening per sqrt(cm) of head
    pub discharge_coefficient: f32,

    // --- Alarm ---
    /// Buzzer pulses per open transition
    pub alarm_pulse_count: u8,
    /// Buzzer on-time per pulse (milliseconds)
    pub alarm_on_ms: u32,
    /// Buzzer off-time between pulses (milliseconds)
    pub alarm_off_ms: u32,
    pub alarm_mode: AlarmMode,

    // --- Reporting ---
    pub direction_mode: DirectionMode,

    // --- Sensor ---
    /// Distance from the ultrasonic transducer down to the channel floor (cm)
    pub sensor_mount_height_cm: f32,
    /// Echoes beyond this distance are treated as lost (cm)
    pub sensor_max_range_cm: f32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub cycle_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            open_threshold_cm: 20.0,
            close_threshold_cm: 8.0,

            // Level model
            min_level_cm: 0.0,
            max_level_cm: 25.0,
            initial_level_cm: 5.0,
            inflow_rate_cm: 0.3,
            outflow_rate_cm: 0.5,

            // Gates
            gate_count: MAX_GATES as u8,
            gate_open_angle_deg: 90,
            gate_closed_angle_deg: 0,
            discharge_coefficient: 0.02,

            // Alarm
            alarm_pulse_count: 3,
            alarm_on_ms: 200,
            alarm_off_ms: 100,
            alarm_mode: AlarmMode::Scheduled,

            // Reporting
            direction_mode: DirectionMode::GateState,

            // Sensor
            sensor_mount_height_cm: 30.0,
            sensor_max_range_cm: 200.0,

            // Timing
            cycle_interval_ms: 300,
        }
    }
}

impl SystemConfig {
    /// Reject parameter sets the controller cannot run safely with.
    ///
    /// Invalid values are rejected rather than clamped: a collapsed
    /// hysteresis band would make the gates chatter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            self.open_threshold_cm,
            self.close_threshold_cm,
            self.min_level_cm,
            self.max_level_cm,
            self.initial_level_cm,
            self.inflow_rate_cm,
            self.outflow_rate_cm,
            self.discharge_coefficient,
            self.sensor_mount_height_cm,
            self.sensor_max_range_cm,
        ];
        if floats.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValidationFailed("non-finite value"));
        }
        if self.min_level_cm >= self.max_level_cm {
            return Err(ConfigError::ValidationFailed(
                "min_level_cm must be below max_level_cm",
            ));
        }
        if self.min_level_cm < 0.0 {
            return Err(ConfigError::ValidationFailed("min_level_cm must not be negative"));
        }
        if self.close_threshold_cm >= self.open_threshold_cm {
            return Err(ConfigError::ValidationFailed(
                "close_threshold_cm must be below open_threshold_cm",
            ));
        }
        let in_range = |v: f32| v >= self.min_level_cm && v <= self.max_level_cm;
        if !in_range(self.open_threshold_cm) || !in_range(self.close_threshold_cm) {
            return Err(ConfigError::ValidationFailed("thresholds outside level range"));
        }
        if !in_range(self.initial_level_cm) {
            return Err(ConfigError::ValidationFailed("initial level outside level range"));
        }
        if self.inflow_rate_cm <= 0.0 || self.outflow_rate_cm <= 0.0 {
            return Err(ConfigError::ValidationFailed("rates must be positive"));
        }
        if self.gate_count == 0 || self.gate_count as usize > MAX_GATES {
            return Err(ConfigError::ValidationFailed("gate_count must be 1..=3"));
        }
        if self.gate_open_angle_deg > 180 || self.gate_closed_angle_deg > 180 {
            return Err(ConfigError::ValidationFailed("servo angles must be 0..=180"));
        }
        if self.discharge_coefficient < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "discharge_coefficient must not be negative",
            ));
        }
        if self.sensor_max_range_cm <= 0.0 {
            return Err(ConfigError::ValidationFailed("sensor_max_range_cm must be positive"));
        }
        if self.cycle_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("cycle_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Width of the hysteresis dead band (cm).
    pub fn hysteresis_band_cm(&self) -> f32 {
        self.open_threshold_cm - self.close_threshold_cm
    }
}
