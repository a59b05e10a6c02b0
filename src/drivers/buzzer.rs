//! Piezo buzzer alarm.
//!
//! Two ways to play the alarm:
//!
//! - [`Buzzer::beep_blocking`] plays every pulse back-to-back with fixed
//!   delays (3 × (200 ms on + 100 ms off) by default).  The control cycle
//!   stalls for the whole sequence.
//! - [`Buzzer::arm`] queues the pulses in a [`PulseTrain`];
//!   [`Buzzer::service`] is called once per control cycle and plays at most
//!   one pulse edge per call, so the loop never blocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::debug;

use crate::config::SystemConfig;
use crate::error::ActuatorError;

// ═══════════════════════════════════════════════════════════════
//  PulseTrain — non-blocking pulse scheduler
// ═══════════════════════════════════════════════════════════════

/// What the buzzer pin should do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseStep {
    /// Nothing pending; leave the pin low.
    Idle,
    /// Start of a pulse: drive high.
    On,
    /// End of a pulse: drive low.
    Off,
}

/// Counts pending pulses and hands them out one tick at a time.
#[derive(Debug, Clone, Default)]
pub struct PulseTrain {
    pending: u8,
    high: bool,
}

impl PulseTrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `count` pulses.  Re-arming tops the queue back up to `count`;
    /// overlapping alarms do not stack.
    pub fn arm(&mut self, count: u8) {
        self.pending = self.pending.max(count);
    }

    /// Consume one step.  A pulse spans two ticks: `On` then `Off`.
    pub fn tick(&mut self) -> PulseStep {
        if self.high {
            self.high = false;
            PulseStep::Off
        } else if self.pending > 0 {
            self.pending -= 1;
            self.high = true;
            PulseStep::On
        } else {
            PulseStep::Idle
        }
    }

    /// Pulses still to be started.
    pub fn pending(&self) -> u8 {
        self.pending
    }

    /// `true` while a pulse is playing or queued.
    pub fn is_active(&self) -> bool {
        self.high || self.pending > 0
    }
}

// ═══════════════════════════════════════════════════════════════
//  Buzzer driver
// ═══════════════════════════════════════════════════════════════

pub struct Buzzer<P: OutputPin> {
    pin: P,
    train: PulseTrain,
    pulse_count: u8,
    on_ms: u32,
    off_ms: u32,
}

impl<P: OutputPin> Buzzer<P> {
    pub fn new(pin: P, config: &SystemConfig) -> Self {
        Self {
            pin,
            train: PulseTrain::new(),
            pulse_count: config.alarm_pulse_count,
            on_ms: config.alarm_on_ms,
            off_ms: config.alarm_off_ms,
        }
    }

    /// Play the full sequence before returning.
    pub fn beep_blocking(&mut self, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        for _ in 0..self.pulse_count {
            self.set(true)?;
            delay.delay_ms(self.on_ms);
            self.set(false)?;
            delay.delay_ms(self.off_ms);
        }
        Ok(())
    }

    /// Queue the sequence for [`service`](Self::service).
    pub fn arm(&mut self) {
        self.train.arm(self.pulse_count);
        debug!("Buzzer armed: {} pulse(s) pending", self.train.pending());
    }

    /// Play one scheduled step.  Call once per control cycle.
    pub fn service(&mut self) -> Result<PulseStep, ActuatorError> {
        let step = self.train.tick();
        match step {
            PulseStep::On => self.set(true)?,
            PulseStep::Off => self.set(false)?,
            PulseStep::Idle => {}
        }
        Ok(step)
    }

    pub fn is_sounding(&self) -> bool {
        self.train.is_active()
    }

    fn set(&mut self, high: bool) -> Result<(), ActuatorError> {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::GpioWriteFailed)
    }
}
