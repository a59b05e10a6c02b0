//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the level sensor, the gate servos and the buzzer, exposing them
//! through [`LevelSensorPort`], [`GateActuatorPort`] and [`AlarmPort`].
//! Everything is generic over `embedded-hal` traits, so the same adapter
//! runs on any board that provides PWM channels, an output pin and a
//! blocking delay.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use heapless::Vec;
use log::{error, warn};

use crate::app::ports::{AlarmPort, GateActuatorPort, LevelSensorPort};
use crate::config::{AlarmMode, MAX_GATES, SystemConfig};
use crate::control::gate_bank::GateId;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::servo::GateServo;
use crate::error::{ActuatorError, SensorError};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, P, B, D>
where
    S: LevelSensorPort,
    P: SetDutyCycle,
    B: OutputPin,
    D: DelayNs,
{
    sensor: S,
    gates: Vec<GateServo<P>, MAX_GATES>,
    buzzer: Buzzer<B>,
    delay: D,
    alarm_mode: AlarmMode,
}

impl<S, P, B, D> HardwareAdapter<S, P, B, D>
where
    S: LevelSensorPort,
    P: SetDutyCycle,
    B: OutputPin,
    D: DelayNs,
{
    /// Build the adapter.  At most `config.gate_count` PWM channels are
    /// used; extra channels are dropped with a warning.
    pub fn new(
        sensor: S,
        gate_pwms: impl IntoIterator<Item = P>,
        buzzer_pin: B,
        delay: D,
        config: &SystemConfig,
    ) -> Self {
        let mut gates = Vec::new();
        for (i, pwm) in gate_pwms.into_iter().enumerate() {
            if i >= config.gate_count as usize || gates.push(GateServo::new(pwm)).is_err() {
                warn!("Ignoring PWM channel {}: bank holds {} gate(s)", i, config.gate_count);
                break;
            }
        }
        if gates.len() < config.gate_count as usize {
            warn!(
                "Only {} of {} gate servo(s) wired",
                gates.len(),
                config.gate_count
            );
        }

        Self {
            sensor,
            gates,
            buzzer: Buzzer::new(buzzer_pin, config),
            delay,
            alarm_mode: config.alarm_mode,
        }
    }

    /// Number of servos actually wired.
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Last angle written to `gate`, if any.
    pub fn gate_angle(&self, gate: GateId) -> Option<u8> {
        self.gates.get(gate as usize).and_then(GateServo::angle)
    }

    pub fn alarm_active(&self) -> bool {
        self.buzzer.is_sounding()
    }
}

// ── LevelSensorPort implementation ────────────────────────────

impl<S, P, B, D> LevelSensorPort for HardwareAdapter<S, P, B, D>
where
    S: LevelSensorPort,
    P: SetDutyCycle,
    B: OutputPin,
    D: DelayNs,
{
    fn read_level(&mut self) -> Result<f32, SensorError> {
        self.sensor.read_level()
    }

    fn advance(&mut self, gates_open: bool) -> Option<f32> {
        self.sensor.advance(gates_open)
    }
}

// ── GateActuatorPort implementation ───────────────────────────

impl<S, P, B, D> GateActuatorPort for HardwareAdapter<S, P, B, D>
where
    S: LevelSensorPort,
    P: SetDutyCycle,
    B: OutputPin,
    D: DelayNs,
{
    fn set_gate_angle(&mut self, gate: GateId, degrees: u8) -> Result<(), ActuatorError> {
        self.gates
            .get_mut(gate as usize)
            .ok_or(ActuatorError::UnknownGate)?
            .write_angle(degrees)
    }
}

// ── AlarmPort implementation ──────────────────────────────────

impl<S, P, B, D> AlarmPort for HardwareAdapter<S, P, B, D>
where
    S: LevelSensorPort,
    P: SetDutyCycle,
    B: OutputPin,
    D: DelayNs,
{
    fn sound_alarm(&mut self) {
        match self.alarm_mode {
            AlarmMode::Blocking => {
                if let Err(e) = self.buzzer.beep_blocking(&mut self.delay) {
                    error!("Alarm sequence aborted: {}", e);
                }
            }
            AlarmMode::Scheduled => self.buzzer.arm(),
        }
    }

    fn service_alarm(&mut self) {
        if let Err(e) = self.buzzer.service() {
            error!("Alarm pulse failed: {}", e);
        }
    }
}
