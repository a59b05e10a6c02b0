//! Integration tests for [`HardwareAdapter`] wired to fake `embedded-hal`
//! peripherals: servo PWM channels, the buzzer pin, a delay provider and
//! an ultrasonic echo timer.
//!
//! Every fake shares its state through `Rc` handles so the test can
//! inspect it after the adapter has taken ownership.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use floodgate::adapters::hardware::HardwareAdapter;
use floodgate::app::events::AppEvent;
use floodgate::app::service::AppService;
use floodgate::config::{AlarmMode, SystemConfig};
use floodgate::error::ActuatorError;
use floodgate::fsm::GateState;
use floodgate::sensors::ultrasonic::{EchoTimer, UltrasonicLevelSensor};

use super::mock_hw::RecordingSink;

// ── Fake peripherals ──────────────────────────────────────────

#[derive(Clone, Default)]
struct SharedPwm(Rc<Cell<Option<u16>>>);

impl embedded_hal::pwm::ErrorType for SharedPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SharedPwm {
    fn max_duty_cycle(&self) -> u16 {
        20_000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.0.set(Some(duty));
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedPin(Rc<RefCell<Vec<bool>>>);

impl embedded_hal::digital::ErrorType for SharedPin {
    type Error = Infallible;
}

impl OutputPin for SharedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedDelay(Rc<Cell<u64>>);

impl DelayNs for SharedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}

#[derive(Clone, Default)]
struct SharedEcho(Rc<Cell<Option<u32>>>);

impl EchoTimer for SharedEcho {
    fn ping_us(&mut self) -> Option<u32> {
        self.0.get()
    }
}

/// Echo time for a given water level under the default 30 cm mount.
fn echo_for_level(level_cm: u32) -> u32 {
    (30 - level_cm) * 57
}

// ── Rig ───────────────────────────────────────────────────────

type Adapter = HardwareAdapter<UltrasonicLevelSensor<SharedEcho>, SharedPwm, SharedPin, SharedDelay>;

struct Rig {
    adapter: Adapter,
    pwms: Vec<SharedPwm>,
    echo: SharedEcho,
    pin: SharedPin,
    delay: SharedDelay,
}

fn rig(config: &SystemConfig, channels: usize) -> Rig {
    let pwms: Vec<SharedPwm> = (0..channels).map(|_| SharedPwm::default()).collect();
    let echo = SharedEcho::default();
    let pin = SharedPin::default();
    let delay = SharedDelay::default();
    let adapter = HardwareAdapter::new(
        UltrasonicLevelSensor::new(echo.clone(), config),
        pwms.clone(),
        pin.clone(),
        delay.clone(),
        config,
    );
    Rig {
        adapter,
        pwms,
        echo,
        pin,
        delay,
    }
}

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn servos_follow_gate_edges() {
    let config = SystemConfig::default();
    let mut r = rig(&config, 3);
    let mut app = AppService::new(&config);
    let mut sink = RecordingSink::new();

    app.start(&mut r.adapter, &mut sink);
    for pwm in &r.pwms {
        assert_eq!(pwm.0.get(), Some(544), "0° is a 544 µs pulse");
    }

    r.echo.0.set(Some(echo_for_level(21)));
    app.tick(&mut r.adapter, &mut sink);
    assert_eq!(app.state(), GateState::Open);
    for (id, pwm) in r.pwms.iter().enumerate() {
        assert_eq!(pwm.0.get(), Some(1472), "90° is a 1472 µs pulse");
        assert_eq!(r.adapter.gate_angle(id as u8), Some(90));
    }

    let status = app.last_status().unwrap();
    assert!((status.level_cm - 21.0).abs() < 1e-3);
}

#[test]
fn scheduled_alarm_plays_across_cycles() {
    let config = SystemConfig::default();
    assert_eq!(config.alarm_mode, AlarmMode::Scheduled);
    let mut r = rig(&config, 3);
    let mut app = AppService::new(&config);
    let mut sink = RecordingSink::new();
    app.start(&mut r.adapter, &mut sink);

    r.echo.0.set(Some(echo_for_level(22)));
    app.tick(&mut r.adapter, &mut sink);
    assert!(r.adapter.alarm_active());
    assert!(r.pin.0.borrow().is_empty(), "pulses start on the next cycle");

    for _ in 0..6 {
        app.tick(&mut r.adapter, &mut sink);
    }
    assert_eq!(*r.pin.0.borrow(), [true, false, true, false, true, false]);
    assert!(!r.adapter.alarm_active());
    assert_eq!(r.delay.0.get(), 0, "scheduled mode never blocks");
    assert_eq!(sink.alarms(), 1);
}

#[test]
fn blocking_alarm_runs_whole_sequence() {
    let config = SystemConfig {
        alarm_mode: AlarmMode::Blocking,
        ..SystemConfig::default()
    };
    let mut r = rig(&config, 3);
    let mut app = AppService::new(&config);
    let mut sink = RecordingSink::new();
    app.start(&mut r.adapter, &mut sink);

    r.echo.0.set(Some(echo_for_level(23)));
    app.tick(&mut r.adapter, &mut sink);
    assert_eq!(*r.pin.0.borrow(), [true, false, true, false, true, false]);
    assert_eq!(r.delay.0.get(), 900_000_000);
    assert!(!r.adapter.alarm_active());
}

#[test]
fn lost_echo_skips_cycle() {
    let config = SystemConfig::default();
    let mut r = rig(&config, 3);
    let mut app = AppService::new(&config);
    let mut sink = RecordingSink::new();
    app.start(&mut r.adapter, &mut sink);

    app.tick(&mut r.adapter, &mut sink);
    assert_eq!(app.missed_readings(), 1);
    assert!(app.last_status().is_none());
}

#[test]
fn missing_servo_reports_unknown_gate() {
    let config = SystemConfig::default();
    let mut r = rig(&config, 2);
    assert_eq!(r.adapter.gate_count(), 2);
    let mut app = AppService::new(&config);
    let mut sink = RecordingSink::new();
    app.start(&mut r.adapter, &mut sink);

    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ActuatorFault {
            gate: 2,
            error: ActuatorError::UnknownGate
        }
    )));
    assert_eq!(r.adapter.gate_angle(2), None);
}

#[test]
fn surplus_pwm_channels_are_ignored() {
    let config = SystemConfig {
        gate_count: 2,
        ..SystemConfig::default()
    };
    let r = rig(&config, 3);
    assert_eq!(r.adapter.gate_count(), 2);
}
