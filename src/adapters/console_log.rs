//! Host console logger.
//!
//! Backend for the `log` facade when running off-target: every record is
//! written to stdout as `LEVEL target: message`.  The level filter comes
//! from the `FLOODGATE_LOG` environment variable (`info` if unset).

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const LOG_ENV: &str = "FLOODGATE_LOG";

pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut out = std::io::stdout().lock();
        let _ = writeln!(
            out,
            "{:<5} {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Parse a level filter, falling back to `Info` on junk.
pub fn parse_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the console logger.  Fails if a logger is already set.
pub fn init() -> Result<(), SetLoggerError> {
    let filter = parse_filter(std::env::var(LOG_ENV).ok().as_deref());
    log::set_logger(&LOGGER)?;
    log::set_max_level(filter);
    Ok(())
}
