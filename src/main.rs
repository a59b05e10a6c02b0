//! Flood-gate controller, host entry point.
//!
//! Runs the control core against simulated hardware at the configured
//! cycle rate.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedHardware        LogEventSink      LcdEventSink       │
//! │  (Level+Gate+Alarm)       (EventSink)       (EventSink)        │
//! │  JsonConfigFile           ConsoleLogger                        │
//! │  (ConfigPort)             (log backend)                        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  GateController (FSM) · FlowEstimator · Direction      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `floodgate [CONFIG_JSON] [MAX_CYCLES]`.  Set `FLOODGATE_LOG` to
//! choose the log level and `FLOODGATE_LOG_FORMAT=json` for JSON lines.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::info;

use floodgate::adapters::config_file::JsonConfigFile;
use floodgate::adapters::console_log;
use floodgate::adapters::lcd_sink::{LcdEventSink, LogDisplay};
use floodgate::adapters::log_sink::{LogEventSink, LogFormat};
use floodgate::adapters::simulation::SimulatedHardware;
use floodgate::app::ports::ConfigPort;
use floodgate::app::service::AppService;
use floodgate::config::SystemConfig;

const LOG_FORMAT_ENV: &str = "FLOODGATE_LOG_FORMAT";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    console_log::init().map_err(|e| anyhow!("logger init failed: {e}"))?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Floodgate v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Arguments + config ─────────────────────────────────
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => JsonConfigFile::new(&path)
            .load()
            .with_context(|| format!("loading config from {path}"))?,
        None => SystemConfig::default(),
    };
    let max_cycles: Option<u64> = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("MAX_CYCLES must be a non-negative integer")?;

    info!("Configuration:");
    info!("- Open above         : {:.1} cm", config.open_threshold_cm);
    info!("- Close at or below  : {:.1} cm", config.close_threshold_cm);
    info!("- Measuring range    : {:.1}..{:.1} cm", config.min_level_cm, config.max_level_cm);
    info!("- Gates              : {}", config.gate_count);
    info!("- Cycle interval     : {} ms", config.cycle_interval_ms);

    // ── 3. Adapters ───────────────────────────────────────────
    let mut hw = SimulatedHardware::new(&config);
    let format = match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Text,
    };
    let mut sink = (
        LogEventSink::with_format(format),
        LcdEventSink::new(LogDisplay::new()),
    );

    // ── 4. Control loop ───────────────────────────────────────
    let mut app = AppService::new(&config);
    app.start(&mut hw, &mut sink);

    let interval = Duration::from_millis(config.cycle_interval_ms.into());
    while max_cycles.is_none_or(|max| app.cycle_count() < max) {
        app.tick(&mut hw, &mut sink);
        std::thread::sleep(interval);
    }

    info!(
        "Stopped after {} cycle(s), {} reading(s) missed, {} alarm(s)",
        app.cycle_count(),
        app.missed_readings(),
        hw.alarm_count()
    );
    Ok(())
}
