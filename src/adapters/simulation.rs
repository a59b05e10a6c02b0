//! Simulated hardware adapter.
//!
//! Stands in for the sensor, the servos and the buzzer on a host.  The
//! level comes from a [`LevelModel`]: reading returns the current value,
//! `advance` moves it by the inflow/outflow rate.  Gate angles and alarm
//! triggers are recorded so runs can be inspected afterwards.

use log::info;

use crate::app::ports::{AlarmPort, GateActuatorPort, LevelSensorPort};
use crate::config::{MAX_GATES, SystemConfig};
use crate::control::gate_bank::GateId;
use crate::control::level_model::LevelModel;
use crate::error::{ActuatorError, SensorError};

pub struct SimulatedHardware {
    model: LevelModel,
    gate_count: u8,
    gate_angles: [u8; MAX_GATES],
    alarm_count: u32,
    /// Readings to drop before the sensor answers again.
    dropouts: u32,
}

impl SimulatedHardware {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            model: LevelModel::new(config),
            gate_count: config.gate_count,
            gate_angles: [config.gate_closed_angle_deg; MAX_GATES],
            alarm_count: 0,
            dropouts: 0,
        }
    }

    pub fn level(&self) -> f32 {
        self.model.level()
    }

    /// Jump the simulated level, clamped to the measuring range.
    pub fn set_level(&mut self, level_cm: f32) -> Result<f32, SensorError> {
        self.model.set_level(level_cm)
    }

    /// Make the next `count` readings fail with [`SensorError::Unavailable`].
    pub fn drop_readings(&mut self, count: u32) {
        self.dropouts = count;
    }

    pub fn gate_angle(&self, gate: GateId) -> Option<u8> {
        (gate < self.gate_count).then(|| self.gate_angles[gate as usize])
    }

    pub fn alarm_count(&self) -> u32 {
        self.alarm_count
    }
}

impl LevelSensorPort for SimulatedHardware {
    fn read_level(&mut self) -> Result<f32, SensorError> {
        if self.dropouts > 0 {
            self.dropouts -= 1;
            return Err(SensorError::Unavailable);
        }
        Ok(self.model.level())
    }

    fn advance(&mut self, gates_open: bool) -> Option<f32> {
        Some(self.model.advance(gates_open))
    }
}

impl GateActuatorPort for SimulatedHardware {
    fn set_gate_angle(&mut self, gate: GateId, degrees: u8) -> Result<(), ActuatorError> {
        if gate >= self.gate_count {
            return Err(ActuatorError::UnknownGate);
        }
        self.gate_angles[gate as usize] = degrees;
        Ok(())
    }
}

impl AlarmPort for SimulatedHardware {
    fn sound_alarm(&mut self) {
        self.alarm_count += 1;
        info!("ALARM | buzzer triggered (#{})", self.alarm_count);
    }
}
