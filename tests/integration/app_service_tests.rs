//! Integration tests for the AppService → controller → actuators pipeline.
//!
//! The end-to-end runs use [`SimulatedHardware`] so the level evolves the
//! way the bench rig does; the rest script readings through
//! [`MockHardware`] to hit specific edges.

use floodgate::adapters::simulation::SimulatedHardware;
use floodgate::app::events::AppEvent;
use floodgate::app::ports::LevelSensorPort;
use floodgate::app::service::AppService;
use floodgate::config::{DirectionMode, SystemConfig};
use floodgate::control::direction::Direction;
use floodgate::error::{ActuatorError, SensorError};
use floodgate::fsm::GateState;

use super::mock_hw::{HwCall, MockHardware, RecordingSink};

const EPS: f32 = 1e-3;

fn make_sim(config: &SystemConfig) -> (AppService, SimulatedHardware, RecordingSink) {
    let mut app = AppService::new(config);
    let mut hw = SimulatedHardware::new(config);
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

fn run(app: &mut AppService, hw: &mut SimulatedHardware, sink: &mut RecordingSink, cycles: u32) {
    for _ in 0..cycles {
        app.tick(hw, sink);
    }
}

// ── End-to-end simulation ─────────────────────────────────────

#[test]
fn gates_stay_shut_until_level_exceeds_open_threshold() {
    let (mut app, mut hw, mut sink) = make_sim(&SystemConfig::default());
    run(&mut app, &mut hw, &mut sink, 51);

    let s50 = sink.status_for(50).unwrap();
    assert!((s50.level_cm - 20.0).abs() < EPS, "cycle 50 level {}", s50.level_cm);
    assert!(!s50.gates_open);

    // Decision at 51 saw ~20.0, which is not strictly above the threshold.
    let s51 = sink.status_for(51).unwrap();
    assert!((s51.level_cm - 20.3).abs() < EPS);
    assert!(!s51.gates_open);
    assert_eq!(app.state(), GateState::Closed);
    assert_eq!(hw.alarm_count(), 0);
}

#[test]
fn gates_open_with_single_alarm_then_drain() {
    let (mut app, mut hw, mut sink) = make_sim(&SystemConfig::default());
    run(&mut app, &mut hw, &mut sink, 52);

    assert_eq!(app.state(), GateState::Open);
    assert_eq!(hw.alarm_count(), 1);
    assert_eq!(sink.alarms(), 1);
    for gate in 0..3 {
        assert_eq!(hw.gate_angle(gate), Some(90));
    }

    let s52 = sink.status_for(52).unwrap();
    assert!(s52.gates_open);
    assert!((s52.level_cm - 19.8).abs() < EPS);
    assert_eq!(s52.direction, Direction::Falling);
    // 3 gates × 90° × 0.02 × √19.8
    assert!((s52.flow_estimate - 24.028).abs() < 0.01, "flow {}", s52.flow_estimate);

    let opened_at = sink.events.iter().find_map(|e| match e {
        AppEvent::GatesChanged { from, to, level_cm } => Some((*from, *to, *level_cm)),
        _ => None,
    });
    let (from, to, level) = opened_at.unwrap();
    assert_eq!((from, to), (GateState::Closed, GateState::Open));
    assert!((level - 20.3).abs() < EPS);
}

#[test]
fn gates_close_at_lower_threshold_without_new_alarm() {
    let (mut app, mut hw, mut sink) = make_sim(&SystemConfig::default());
    run(&mut app, &mut hw, &mut sink, 76);
    assert_eq!(app.state(), GateState::Open, "8.3 cm is still above the close threshold");

    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Closed);
    let closed = sink.events.iter().rev().find_map(|e| match e {
        AppEvent::GatesChanged { to: GateState::Closed, level_cm, .. } => Some(*level_cm),
        _ => None,
    });
    assert!((closed.unwrap() - 7.8).abs() < EPS);

    let s77 = sink.status_for(77).unwrap();
    assert!(!s77.gates_open);
    assert_eq!(s77.flow_estimate, 0.0);
    assert!((s77.level_cm - 8.1).abs() < EPS);

    assert_eq!(hw.alarm_count(), 1);
    for gate in 0..3 {
        assert_eq!(hw.gate_angle(gate), Some(0));
    }
}

#[test]
fn one_command_per_gate_per_edge() {
    let config = SystemConfig::default();
    let mut app = AppService::new(&config);
    let mut sim = SimulatedHardware::new(&config);
    let mut sink = RecordingSink::new();
    let mut hw = MockHardware::new();
    app.start(&mut hw, &mut sink);

    // Feed the simulated level through the recording mock.
    for _ in 0..100 {
        hw.push_reading(Ok(sim.level()));
        app.tick(&mut hw, &mut sink);
        let gates_open = app.last_status().unwrap().gates_open;
        sim.advance(gates_open);
    }

    // start (shut) + open edge + close edge
    let commands = hw.gate_commands();
    assert_eq!(commands.len(), 9);
    assert_eq!(&commands[3..6], &[(0, 90), (1, 90), (2, 90)]);
    assert_eq!(&commands[6..9], &[(0, 0), (1, 0), (2, 0)]);
    assert_eq!(hw.alarm_count(), 1);
    assert_eq!(sink.transitions(), 2);
}

#[test]
fn status_emitted_every_cycle() {
    let (mut app, mut hw, mut sink) = make_sim(&SystemConfig::default());
    run(&mut app, &mut hw, &mut sink, 10);
    let cycles: Vec<u64> = sink.statuses().iter().map(|s| s.cycle).collect();
    assert_eq!(cycles, (1..=10).collect::<Vec<_>>());
    assert_eq!(app.cycle_count(), 10);
}

// ── Scripted readings ─────────────────────────────────────────

#[test]
fn missed_reading_holds_gates() {
    let mut hw = MockHardware::with_readings([Ok(21.0), Err(SensorError::NoEcho), Ok(14.0)]);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(&SystemConfig::default());
    app.start(&mut hw, &mut sink);

    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Open);
    let commands_after_open = hw.gate_commands().len();

    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Open);
    assert_eq!(app.missed_readings(), 1);
    assert_eq!(hw.gate_commands().len(), commands_after_open);
    assert_eq!(app.last_status().unwrap().cycle, 1);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::ReadingMissed {
            cycle: 2,
            error: SensorError::NoEcho
        })
    ));

    // Inside the dead band: still open, nothing re-commanded.
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Open);
    assert_eq!(hw.gate_commands().len(), commands_after_open);
    assert_eq!(app.last_status().unwrap().cycle, 3);
}

#[test]
fn simulated_dropout_skips_advance() {
    let (mut app, mut hw, mut sink) = make_sim(&SystemConfig::default());
    hw.drop_readings(3);
    run(&mut app, &mut hw, &mut sink, 3);
    assert_eq!(hw.level(), 5.0);
    assert_eq!(app.missed_readings(), 3);
    assert!(sink.statuses().is_empty());

    app.tick(&mut hw, &mut sink);
    assert!((sink.status_for(4).unwrap().level_cm - 5.3).abs() < EPS);
}

#[test]
fn exact_thresholds_respect_strict_and_inclusive_edges() {
    let mut hw = MockHardware::with_readings([Ok(20.0), Ok(20.01), Ok(8.01), Ok(8.0)]);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(&SystemConfig::default());
    app.start(&mut hw, &mut sink);

    let mut states = Vec::new();
    for _ in 0..4 {
        app.tick(&mut hw, &mut sink);
        states.push(app.state());
    }
    assert_eq!(
        states,
        [GateState::Closed, GateState::Open, GateState::Open, GateState::Closed]
    );
    assert_eq!(hw.alarm_count(), 1);
}

#[test]
fn each_opening_edge_raises_one_alarm() {
    let mut hw = MockHardware::with_readings(
        [21.0, 22.0, 5.0, 4.0, 23.0, 24.0, 25.0].map(Ok),
    );
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(&SystemConfig::default());
    app.start(&mut hw, &mut sink);
    for _ in 0..7 {
        app.tick(&mut hw, &mut sink);
    }
    assert_eq!(hw.alarm_count(), 2);
    assert_eq!(sink.alarms(), 2);
    assert_eq!(sink.transitions(), 3);
}

#[test]
fn actuator_fault_is_reported_and_state_follows_controller() {
    let mut hw = MockHardware::with_readings([Ok(21.0)]);
    hw.failing_gate = Some(1);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(&SystemConfig::default());
    app.start(&mut hw, &mut sink);

    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::ActuatorFault {
            gate: 1,
            error: ActuatorError::PwmWriteFailed
        }
    )));

    app.tick(&mut hw, &mut sink);
    assert_eq!(app.state(), GateState::Open);
    assert_eq!(hw.gate_commands(), vec![(0, 0), (2, 0), (0, 90), (2, 90)]);
    assert!(hw.calls.contains(&HwCall::SoundAlarm));
}

#[test]
fn level_delta_direction_tracks_trend() {
    let config = SystemConfig {
        direction_mode: DirectionMode::LevelDelta,
        ..SystemConfig::default()
    };
    let mut hw = MockHardware::with_readings([10.0, 10.0, 9.0, 9.5].map(Ok));
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(&config);
    app.start(&mut hw, &mut sink);
    for _ in 0..4 {
        app.tick(&mut hw, &mut sink);
    }
    let directions: Vec<Direction> = sink.statuses().iter().map(|s| s.direction).collect();
    assert_eq!(
        directions,
        [Direction::Rising, Direction::Steady, Direction::Falling, Direction::Rising]
    );
}

#[test]
fn gate_count_is_configurable() {
    let config = SystemConfig {
        gate_count: 1,
        ..SystemConfig::default()
    };
    let mut hw = MockHardware::with_readings([Ok(16.0)]);
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(&config);
    app.start(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    assert_eq!(hw.gate_commands(), vec![(0, 0)]);
    let status = app.last_status().unwrap();
    assert_eq!(status.gate_count, 1);
    assert_eq!(status.flow_estimate, 0.0);
}
