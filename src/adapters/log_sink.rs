//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade (serial console in the field, stdout on the host).  Two line
//! formats: human-readable text, or one JSON object per event for
//! machine consumption.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink {
    format: LogFormat,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::with_format(LogFormat::Text)
    }

    pub fn with_format(format: LogFormat) -> Self {
        Self { format }
    }

    fn emit_json(&self, event: &AppEvent) {
        match serde_json::to_string(event) {
            Ok(line) => info!("{}", line),
            Err(e) => warn!("EVENT | unserialisable {:?}: {}", event, e),
        }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if self.format == LogFormat::Json {
            self.emit_json(event);
            return;
        }
        match event {
            AppEvent::Status(s) => {
                info!(
                    "STATUS | cycle={} | level={:.1}cm | dir={} | gates={}x{} | \
                     outflow={:.2}cm/s",
                    s.cycle,
                    s.level_cm,
                    s.direction.as_str(),
                    s.gate_count,
                    if s.gates_open { "OPEN" } else { "SHUT" },
                    s.flow_estimate,
                );
            }
            AppEvent::GatesChanged { from, to, level_cm } => {
                info!("GATES | {:?} -> {:?} at {:.1}cm", from, to, level_cm);
            }
            AppEvent::AlarmRaised { level_cm } => {
                info!("ALARM | raised at {:.1}cm", level_cm);
            }
            AppEvent::ReadingMissed { cycle, error } => {
                warn!("SENSOR | cycle {} skipped: {}", cycle, error);
            }
            AppEvent::ActuatorFault { gate, error } => {
                warn!("ACTUATOR | gate {}: {}", gate + 1, error);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
