//! Mock hardware adapter for integration tests.
//!
//! Plays back a scripted list of level readings and records every
//! actuator call so tests can assert on the full command history without
//! touching real GPIO/PWM registers.

use std::collections::VecDeque;

use floodgate::app::events::{AppEvent, StatusSnapshot};
use floodgate::app::ports::{AlarmPort, EventSink, GateActuatorPort, LevelSensorPort};
use floodgate::control::gate_bank::GateId;
use floodgate::error::{ActuatorError, SensorError};

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    SetGate { gate: GateId, degrees: u8 },
    SoundAlarm,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    readings: VecDeque<Result<f32, SensorError>>,
    /// Gate whose servo rejects every command.
    pub failing_gate: Option<GateId>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            readings: VecDeque::new(),
            failing_gate: None,
        }
    }

    pub fn with_readings(readings: impl IntoIterator<Item = Result<f32, SensorError>>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            ..Self::new()
        }
    }

    pub fn push_reading(&mut self, reading: Result<f32, SensorError>) {
        self.readings.push_back(reading);
    }

    pub fn gate_commands(&self) -> Vec<(GateId, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetGate { gate, degrees } => Some((*gate, *degrees)),
                HwCall::SoundAlarm => None,
            })
            .collect()
    }

    pub fn alarm_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == HwCall::SoundAlarm).count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelSensorPort for MockHardware {
    /// An exhausted script reads as a dead sensor.
    fn read_level(&mut self) -> Result<f32, SensorError> {
        self.readings
            .pop_front()
            .unwrap_or(Err(SensorError::Unavailable))
    }
}

impl GateActuatorPort for MockHardware {
    fn set_gate_angle(&mut self, gate: GateId, degrees: u8) -> Result<(), ActuatorError> {
        if self.failing_gate == Some(gate) {
            return Err(ActuatorError::PwmWriteFailed);
        }
        self.calls.push(HwCall::SetGate { gate, degrees });
        Ok(())
    }
}

impl AlarmPort for MockHardware {
    fn sound_alarm(&mut self) {
        self.calls.push(HwCall::SoundAlarm);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn statuses(&self) -> Vec<StatusSnapshot> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Status(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn status_for(&self, cycle: u64) -> Option<StatusSnapshot> {
        self.statuses().into_iter().find(|s| s.cycle == cycle)
    }

    pub fn alarms(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::AlarmRaised { .. }))
            .count()
    }

    pub fn transitions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::GatesChanged { .. }))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
