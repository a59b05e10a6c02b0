//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!            [level > open]
//!  CLOSED ─────────────────────▶ OPEN  (alarm once)
//!    ▲                            │
//!    └──────[level <= close]──────┘
//!
//!  close < level <= open : dead band, no transition
//! ```

use super::context::FsmContext;
use super::{GateState, StateDescriptor};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; GateState::COUNT] {
    [
        // Index 0 — Closed
        StateDescriptor {
            id: GateState::Closed,
            name: "Closed",
            on_enter: Some(closed_enter),
            on_exit: None,
            on_update: closed_update,
        },
        // Index 1 — Open
        StateDescriptor {
            id: GateState::Open,
            name: "Open",
            on_enter: Some(open_enter),
            on_exit: None,
            on_update: open_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  CLOSED state — water accumulating behind the gates
// ═══════════════════════════════════════════════════════════════════════════

fn closed_enter(ctx: &mut FsmContext) {
    ctx.gates.close_all();
    info!(
        "CLOSED: {} gate(s) shut at {:.1} cm",
        ctx.gates.count(),
        ctx.level_cm
    );
}

fn closed_update(ctx: &mut FsmContext) -> Option<GateState> {
    // Strict `>`: a level sitting exactly on the threshold keeps the gates shut.
    if ctx.above_open_threshold() {
        info!(
            "CLOSED: level {:.1} cm > {:.1} cm → opening",
            ctx.level_cm, ctx.thresholds.open_cm
        );
        return Some(GateState::Open);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  OPEN state — discharging
// ═══════════════════════════════════════════════════════════════════════════

fn open_enter(ctx: &mut FsmContext) {
    ctx.gates.open_all();
    ctx.alarm_requested = true;
    info!(
        "OPEN: {} gate(s) released at {:.1} cm",
        ctx.gates.count(),
        ctx.level_cm
    );
}

fn open_update(ctx: &mut FsmContext) -> Option<GateState> {
    if ctx.at_or_below_close_threshold() {
        info!(
            "OPEN: level {:.1} cm <= {:.1} cm → closing",
            ctx.level_cm, ctx.thresholds.close_cm
        );
        return Some(GateState::Closed);
    }
    None
}
