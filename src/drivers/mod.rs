//! Actuator drivers for the gate servos and the alarm buzzer.

pub mod buzzer;
pub mod servo;
