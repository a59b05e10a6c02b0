//! Control core: hysteresis gate controller, level model and flow estimate.
//!
//! Pure numeric logic with no I/O.  [`AppService`](crate::app::service::AppService)
//! wires these together each cycle.

pub mod direction;
pub mod flow;
pub mod gate_bank;
pub mod gate_controller;
pub mod level_model;
