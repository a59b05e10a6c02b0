//! Logical gate bank.
//!
//! Every gate in the bank moves in lock-step, so the bank is a gate count
//! plus a single open flag.  A partially open bank is unrepresentable.

use serde::Serialize;

use crate::config::MAX_GATES;

/// Zero-based gate index within the bank.
pub type GateId = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateBank {
    count: u8,
    open: bool,
}

impl GateBank {
    /// A closed bank of `count` gates, capped at [`MAX_GATES`].
    pub fn new(count: u8) -> Self {
        Self {
            count: count.min(MAX_GATES as u8),
            open: false,
        }
    }

    pub fn open_all(&mut self) {
        self.open = true;
    }

    pub fn close_all(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// Whether gate `id` is open.  Unknown gates read as closed.
    pub fn is_gate_open(&self, id: GateId) -> bool {
        self.open && id < self.count
    }

    pub fn open_count(&self) -> u8 {
        if self.open { self.count } else { 0 }
    }

    /// Every gate index in the bank.
    pub fn ids(&self) -> impl Iterator<Item = GateId> + use<> {
        0..self.count
    }
}
