//! Flood-gate controller library.
//!
//! Exposes the control core and its adapters for the host binary and for
//! integration testing.  The core (`control`, `fsm`, `app`) is pure logic;
//! everything that touches hardware sits behind the port traits in
//! [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod sensors;
