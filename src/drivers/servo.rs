//! SG-90 hobby servo driving one gate.
//!
//! The servo expects a 50 Hz frame (20 ms) with a 544–2400 µs high pulse
//! mapping linearly onto 0–180°.  The PWM channel must already be
//! configured for 50 Hz; this driver only writes duty cycles through
//! [`embedded_hal::pwm::SetDutyCycle`].
//!
//! ## Safety contract
//!
//! The servo is a dumb actuator.  It is only commanded on controller
//! transitions, never re-written every cycle.

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::error::ActuatorError;

/// PWM frame length at 50 Hz.
const FRAME_US: u32 = 20_000;
/// Pulse width at 0°.
const MIN_PULSE_US: u32 = 544;
/// Pulse width at 180°.
const MAX_PULSE_US: u32 = 2_400;
const MAX_ANGLE_DEG: u8 = 180;

pub struct GateServo<P: SetDutyCycle> {
    pwm: P,
    angle_deg: Option<u8>,
}

impl<P: SetDutyCycle> GateServo<P> {
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            angle_deg: None,
        }
    }

    /// Move to `degrees` (clamped to 0–180).
    pub fn write_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        let degrees = degrees.min(MAX_ANGLE_DEG);
        let duty = Self::duty_for(degrees, self.pwm.max_duty_cycle());
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        debug!("Servo -> {}° (duty {})", degrees, duty);
        self.angle_deg = Some(degrees);
        Ok(())
    }

    /// Last angle successfully written, `None` before the first write.
    pub fn angle(&self) -> Option<u8> {
        self.angle_deg
    }

    /// Pulse width in µs for `degrees`.
    pub fn pulse_us(degrees: u8) -> u32 {
        let degrees = degrees.min(MAX_ANGLE_DEG) as u32;
        MIN_PULSE_US + (MAX_PULSE_US - MIN_PULSE_US) * degrees / MAX_ANGLE_DEG as u32
    }

    fn duty_for(degrees: u8, max_duty: u16) -> u16 {
        (Self::pulse_us(degrees) * max_duty as u32 / FRAME_US) as u16
    }

    /// Release the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}
