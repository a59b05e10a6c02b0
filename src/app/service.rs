//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the gate controller, flow estimator and direction
//! tracker.  It exposes a clean, hardware-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  LevelSensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                      │         AppService         │
//! GateActuatorPort ◀── │  GateController · Flow     │
//!        AlarmPort ◀── └────────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::direction::DirectionTracker;
use crate::control::flow::FlowEstimator;
use crate::control::gate_controller::{GateController, GateTransition};
use crate::control::level_model::LevelBounds;
use crate::fsm::GateState;

use super::events::{AppEvent, StatusSnapshot};
use super::ports::{AlarmPort, EventSink, GateActuatorPort, LevelSensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    controller: GateController,
    flow: FlowEstimator,
    direction: DirectionTracker,
    bounds: LevelBounds,
    open_angle_deg: u8,
    closed_angle_deg: u8,
    cycle_count: u64,
    missed_readings: u64,
    last_status: Option<StatusSnapshot>,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** command the gates; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            controller: GateController::new(config),
            flow: FlowEstimator::new(config),
            direction: DirectionTracker::new(config.direction_mode),
            bounds: LevelBounds::from_config(config),
            open_angle_deg: config.gate_open_angle_deg,
            closed_angle_deg: config.gate_closed_angle_deg,
            cycle_count: 0,
            missed_readings: 0,
            last_status: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial state and drive every gate shut.
    pub fn start(&mut self, hw: &mut impl GateActuatorPort, sink: &mut impl EventSink) {
        self.controller.start();
        self.command_gates(hw, sink);
        sink.emit(&AppEvent::Started(self.controller.state()));
        info!(
            "AppService started in {:?} with {} gate(s)",
            self.controller.state(),
            self.controller.gates().count()
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: read → decide → actuate → advance → report.
    ///
    /// The `hw` parameter satisfies every hardware port at once.  This
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl LevelSensorPort + GateActuatorPort + AlarmPort),
        sink: &mut impl EventSink,
    ) {
        self.cycle_count += 1;

        // 0. Scheduled alarm pulses play regardless of the reading.
        hw.service_alarm();

        // 1. Read the level; a missing reading holds the gates and skips the cycle.
        let level = match hw.read_level().and_then(|raw| self.bounds.accept(raw)) {
            Ok(level) => level,
            Err(error) => {
                self.missed_readings += 1;
                warn!(
                    "Cycle {} skipped: {} (gates held {:?})",
                    self.cycle_count,
                    error,
                    self.controller.state()
                );
                sink.emit(&AppEvent::ReadingMissed {
                    cycle: self.cycle_count,
                    error,
                });
                return;
            }
        };

        // 2. Hysteresis decision
        if let Some(transition) = self.controller.decide(level) {
            self.apply_transition(transition, level, hw, sink);
        }

        // 3. Advance the level source
        let gates_open = self.controller.gates().is_open();
        let reported = hw
            .advance(gates_open)
            .map_or(level, |next| self.bounds.clamp(next));

        // 4. Report
        let status = StatusSnapshot {
            cycle: self.cycle_count,
            level_cm: reported,
            state: self.controller.state(),
            gate_count: self.controller.gates().count(),
            gates_open,
            flow_estimate: self.flow.estimate_outflow(self.controller.gates(), reported),
            direction: self.direction.update(gates_open, reported),
        };
        debug!(
            "Cycle {}: decided on {:.2} cm, reporting {:.2} cm",
            self.cycle_count, level, reported
        );
        self.last_status = Some(status);
        sink.emit(&AppEvent::Status(status));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current bank-wide gate state.
    pub fn state(&self) -> GateState {
        self.controller.state()
    }

    /// Total control cycles executed since startup, skipped ones included.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Cycles skipped for lack of a usable reading.
    pub fn missed_readings(&self) -> u64 {
        self.missed_readings
    }

    /// Snapshot from the most recent completed cycle.
    pub fn last_status(&self) -> Option<&StatusSnapshot> {
        self.last_status.as_ref()
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_transition(
        &self,
        transition: GateTransition,
        level_cm: f32,
        hw: &mut (impl GateActuatorPort + AlarmPort),
        sink: &mut impl EventSink,
    ) {
        self.command_gates(hw, sink);
        if transition.sound_alarm {
            hw.sound_alarm();
            sink.emit(&AppEvent::AlarmRaised { level_cm });
        }
        sink.emit(&AppEvent::GatesChanged {
            from: transition.from,
            to: transition.to,
            level_cm,
        });
    }

    /// Translate the bank state into one servo command per gate.
    fn command_gates(&self, hw: &mut impl GateActuatorPort, sink: &mut impl EventSink) {
        let gates = self.controller.gates();
        for id in gates.ids() {
            let angle = if gates.is_gate_open(id) {
                self.open_angle_deg
            } else {
                self.closed_angle_deg
            };
            if let Err(error) = hw.set_gate_angle(id, angle) {
                warn!("Gate {} rejected {}°: {}", id + 1, angle, error);
                sink.emit(&AppEvent::ActuatorFault { gate: id, error });
            }
        }
    }
}
