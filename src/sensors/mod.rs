//! Level sensor drivers.
//!
//! Each driver implements [`LevelSensorPort`](crate::app::ports::LevelSensorPort)
//! directly so it can be plugged into the
//! [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter).

pub mod ultrasonic;
