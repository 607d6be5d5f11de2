//! ANSI terminal painter.
//!
//! Wraps a [`BufferSurface`] and repaints the whole dashboard frame after
//! every mutation. Plain escape codes, no TUI framework.

use std::io::Write;

use parking_lot::Mutex;

use crate::ui::surface::{BufferSurface, LogRow, Slot, Surface, Tone};

const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

fn color(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "\x1b[0m",
        Tone::Safe | Tone::Good => "\x1b[32m",
        Tone::Warning | Tone::Pending => "\x1b[33m",
        Tone::Danger | Tone::Bad => "\x1b[31m",
    }
}

pub struct TerminalSurface {
    buffer: BufferSurface,
    out: Mutex<std::io::Stdout>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            buffer: BufferSurface::new(),
            out: Mutex::new(std::io::stdout()),
        }
    }

    fn toned(&self, slot: Slot) -> String {
        let text = self.buffer.text(slot).unwrap_or_default();
        let tone = self.buffer.tone(slot).unwrap_or_default();
        format!("{}{}{}", color(tone), text, RESET)
    }

    fn paint(&self) {
        let mut frame = String::with_capacity(2048);

        frame.push_str(&format!(
            "IDS LIVE MONITOR        {}        [{}]\n",
            self.buffer.text(Slot::Clock).unwrap_or_default(),
            self.toned(Slot::Connection),
        ));
        frame.push_str(&format!(
            "Status: {} {}    Monitoring: {}\n",
            self.buffer.text(Slot::StatusIcon).unwrap_or_default(),
            self.toned(Slot::StatusText),
            self.toned(Slot::MonitoringState),
        ));
        frame.push_str(&format!(
            "Packets: {}    Attacks: {}    Detection rate: {}\n\n",
            self.toned(Slot::TotalPackets),
            self.toned(Slot::TotalAttacks),
            self.toned(Slot::DetectionRate),
        ));

        frame.push_str("Last threat\n");
        for line in self.buffer.text(Slot::ThreatPanel).unwrap_or_default().lines() {
            frame.push_str(&format!("  {}\n", line));
        }
        frame.push('\n');

        frame.push_str("Traffic distribution\n");
        let chart = self.buffer.text(Slot::Chart).unwrap_or_default();
        if chart.is_empty() {
            frame.push_str("  (chart unavailable)\n");
        } else {
            for line in chart.lines() {
                frame.push_str(&format!("  {}\n", line));
            }
        }
        frame.push('\n');

        frame.push_str(&format!(
            "{:<10} {:<10} {:<8} {:<14} {:<10} {}\n",
            "Time", "Prediction", "Conf", "Threat", "Protocol", "Service"
        ));
        for row in self.buffer.rows() {
            frame.push_str(&self.row_line(&row));
        }
        frame.push('\n');

        let upload = self.buffer.text(Slot::UploadStatus).unwrap_or_default();
        if !upload.is_empty() {
            frame.push_str(&format!("Upload: {}\n", self.toned(Slot::UploadStatus)));
        }
        let notice = self.buffer.text(Slot::Notice).unwrap_or_default();
        if !notice.is_empty() {
            frame.push_str(&format!("Notice: {}\n", self.toned(Slot::Notice)));
        }

        frame.push_str("> commands: start | stop | upload <path> | refresh | pause | resume | quit\n");

        let mut out = self.out.lock();
        let _ = write!(out, "{}{}", CLEAR_AND_HOME, frame);
        let _ = out.flush();
    }

    fn row_line(&self, row: &LogRow) -> String {
        format!(
            "{:<10} {}{:<10}{} {:<8} {:<14} {:<10} {}\n",
            row.timestamp,
            color(row.tone),
            row.prediction,
            RESET,
            row.confidence,
            row.threat_type,
            row.protocol,
            row.service,
        )
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn has_slot(&self, slot: Slot) -> bool {
        self.buffer.has_slot(slot)
    }

    fn set_text(&self, slot: Slot, text: &str) {
        self.buffer.set_text(slot, text);
        self.paint();
    }

    fn text(&self, slot: Slot) -> Option<String> {
        self.buffer.text(slot)
    }

    fn set_tone(&self, slot: Slot, tone: Tone) {
        self.buffer.set_tone(slot, tone);
    }

    fn tone(&self, slot: Slot) -> Option<Tone> {
        self.buffer.tone(slot)
    }

    fn replace_rows(&self, rows: Vec<LogRow>) {
        self.buffer.replace_rows(rows);
        self.paint();
    }

    fn rows(&self) -> Vec<LogRow> {
        self.buffer.rows()
    }
}
