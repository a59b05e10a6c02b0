//! Hysteresis gate controller.
//!
//! Wraps the two-state [`Fsm`] and its [`FsmContext`] behind a single
//! `decide(level)` call.  The controller never talks to hardware; it hands
//! back a [`GateTransition`] on each edge and the caller turns that into
//! actuator and alarm commands.

use crate::config::SystemConfig;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, GateState};

use super::gate_bank::GateBank;

/// A state change produced by [`GateController::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTransition {
    pub from: GateState,
    pub to: GateState,
    /// Set only on `Closed → Open`.
    pub sound_alarm: bool,
}

pub struct GateController {
    fsm: Fsm,
    ctx: FsmContext,
}

impl GateController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), GateState::Closed),
            ctx: FsmContext::new(config),
        }
    }

    /// Enter the initial state; leaves the bank closed.
    pub fn start(&mut self) {
        self.fsm.start(&mut self.ctx);
        self.ctx.alarm_requested = false;
    }

    /// Evaluate one level reading.  Returns `Some` only on an edge.
    pub fn decide(&mut self, level_cm: f32) -> Option<GateTransition> {
        let from = self.fsm.current_state();
        self.ctx.level_cm = level_cm;
        let to = self.fsm.tick(&mut self.ctx)?;
        let sound_alarm = core::mem::take(&mut self.ctx.alarm_requested);
        Some(GateTransition {
            from,
            to,
            sound_alarm,
        })
    }

    pub fn state(&self) -> GateState {
        self.fsm.current_state()
    }

    pub fn gates(&self) -> &GateBank {
        &self.ctx.gates
    }

    /// Decisions taken since the last transition.
    pub fn ticks_in_state(&self) -> u64 {
        self.fsm.ticks_in_current_state()
    }
}
