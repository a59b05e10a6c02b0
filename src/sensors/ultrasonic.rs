//! HC-SR04 ultrasonic water-level sensor.
//!
//! The transducer is mounted above the channel looking down.  The echo
//! round-trip time gives the distance to the water surface, and the level
//! is the mount height minus that distance.
//!
//! Echo timing is board-specific (input capture, busy-wait on the echo pin,
//! RMT...), so it is abstracted behind [`EchoTimer`].

use log::debug;

use crate::app::ports::LevelSensorPort;
use crate::config::SystemConfig;
use crate::control::level_model::LevelBounds;
use crate::error::SensorError;

/// Echo round-trip microseconds per centimetre of distance.
const US_ROUNDTRIP_CM: f32 = 57.0;

/// Triggers a ping and measures the echo.
pub trait EchoTimer {
    /// Round-trip time in µs, or `None` if the echo timed out.
    fn ping_us(&mut self) -> Option<u32>;
}

pub struct UltrasonicLevelSensor<T: EchoTimer> {
    timer: T,
    mount_height_cm: f32,
    max_range_cm: f32,
    bounds: LevelBounds,
}

impl<T: EchoTimer> UltrasonicLevelSensor<T> {
    pub fn new(timer: T, config: &SystemConfig) -> Self {
        Self {
            timer,
            mount_height_cm: config.sensor_mount_height_cm,
            max_range_cm: config.sensor_max_range_cm,
            bounds: LevelBounds::from_config(config),
        }
    }

    /// Distance from the transducer to the surface (cm).
    pub fn distance_cm(&mut self) -> Result<f32, SensorError> {
        let us = match self.timer.ping_us() {
            Some(us) if us > 0 => us,
            _ => return Err(SensorError::NoEcho),
        };
        let distance = us as f32 / US_ROUNDTRIP_CM;
        if distance > self.max_range_cm {
            return Err(SensorError::NoEcho);
        }
        Ok(distance)
    }

    /// Water level (cm), clamped to the measuring range.
    pub fn read(&mut self) -> Result<f32, SensorError> {
        let distance = self.distance_cm()?;
        let level = self.bounds.accept(self.mount_height_cm - distance)?;
        debug!("Ultrasonic: distance {:.1} cm -> level {:.1} cm", distance, level);
        Ok(level)
    }
}

impl<T: EchoTimer> LevelSensorPort for UltrasonicLevelSensor<T> {
    fn read_level(&mut self) -> Result<f32, SensorError> {
        self.read()
    }
}
