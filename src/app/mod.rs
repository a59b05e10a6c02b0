//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the per-cycle orchestration for the flood-gate
//! controller: hysteresis decisions, gate commands, alarm triggering and
//! status reporting.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
