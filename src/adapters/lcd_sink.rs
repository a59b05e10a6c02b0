//! 16×2 character LCD status sink.
//!
//! Renders each status snapshot as two fixed-width lines:
//!
//! ```text
//! ┌────────────────┐
//! │Level 12.3 cm   │
//! │SHUT SHUT SHUT  │
//! └────────────────┘
//! ```
//!
//! The panel itself (HD44780 over an I²C backpack, or anything else) sits
//! behind [`TextDisplay`].  Lines are built in `heapless::String`s and
//! truncated to the panel width.

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::app::events::{AppEvent, StatusSnapshot};
use crate::app::ports::EventSink;

pub const LCD_COLS: usize = 16;

/// One rendered display line.
pub type LcdLine = String<LCD_COLS>;

/// Minimal character display interface.
pub trait TextDisplay {
    fn clear(&mut self);
    fn write_line(&mut self, row: u8, text: &str);
}

/// Render a snapshot onto the two display rows.
pub fn render_status(status: &StatusSnapshot) -> [LcdLine; 2] {
    let mut top = LcdLine::new();
    // "Level 25.0 cm" is 13 columns, always fits.
    let _ = write!(top, "Level {:.1} cm", status.level_cm);

    let mut bottom = LcdLine::new();
    let label = if status.gates_open { "OPEN" } else { "SHUT" };
    for gate in 0..status.gate_count {
        if gate > 0 {
            push_truncated(&mut bottom, " ");
        }
        push_truncated(&mut bottom, label);
    }
    [top, bottom]
}

fn render_banner(top: &str, bottom: &str) -> [LcdLine; 2] {
    let mut lines = [LcdLine::new(), LcdLine::new()];
    push_truncated(&mut lines[0], top);
    push_truncated(&mut lines[1], bottom);
    lines
}

fn push_truncated(line: &mut LcdLine, text: &str) {
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}

/// Adapter that keeps a character LCD in sync with the controller.
pub struct LcdEventSink<D: TextDisplay> {
    display: D,
}

impl<D: TextDisplay> LcdEventSink<D> {
    pub fn new(display: D) -> Self {
        Self { display }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn show(&mut self, lines: &[LcdLine; 2]) {
        self.display.clear();
        self.display.write_line(0, &lines[0]);
        self.display.write_line(1, &lines[1]);
    }
}

impl<D: TextDisplay> EventSink for LcdEventSink<D> {
    fn emit(&mut self, event: &AppEvent) {
        let lines = match event {
            AppEvent::Status(status) => render_status(status),
            AppEvent::Started(_) => render_banner("Flood gate ctrl", "Automatic mode"),
            AppEvent::ReadingMissed { .. } => render_banner("Level --.- cm", "Sensor fault"),
            // Transitions show up in the next status frame.
            _ => return,
        };
        self.show(&lines);
    }
}

// ───────────────────────────────────────────────────────────────
// Host display
// ───────────────────────────────────────────────────────────────

/// Display that mirrors the panel into the debug log.
#[derive(Debug, Default)]
pub struct LogDisplay {
    rows: [LcdLine; 2],
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, row: u8) -> &str {
        self.rows.get(row as usize).map_or("", |l| l.as_str())
    }
}

impl TextDisplay for LogDisplay {
    fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    fn write_line(&mut self, row: u8, text: &str) {
        if let Some(line) = self.rows.get_mut(row as usize) {
            line.clear();
            push_truncated(line, text);
            debug!("LCD[{}] |{:<16}|", row, line.as_str());
        }
    }
}
