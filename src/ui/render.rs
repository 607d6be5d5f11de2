//! View renderer - projection of server payloads onto the surface.
//!
//! Every render operation is idempotent given the same input and tolerates
//! missing optional fields by substituting placeholders. Unknown enum values
//! degrade to a neutral rendering, never a panic.

use chrono::{DateTime, Local};

use crate::api::types::{LogEntry, Prediction, StatusSnapshot, ThreatEvent, ThreatLevel};
use crate::ui::animate::{Counter, CounterAnimator};
use crate::ui::format;
use crate::ui::surface::{Bindings, LogRow, Slot, Tone};

pub struct Renderer {
    bindings: Bindings,
    animator: CounterAnimator,
}

impl Renderer {
    pub fn new(bindings: Bindings) -> Self {
        let animator = CounterAnimator::new(std::sync::Arc::clone(bindings.surface()));
        Self { bindings, animator }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Initial display before the first poll cycle resolves.
    pub fn render_startup(&self) {
        let surface = self.bindings.surface();
        surface.set_text(Slot::Connection, "Connecting...");
        surface.set_tone(Slot::Connection, Tone::Pending);
        surface.set_text(Slot::TotalPackets, "0");
        surface.set_text(Slot::TotalAttacks, "0");
        surface.set_text(Slot::DetectionRate, "0.0%");
        surface.set_text(Slot::ThreatPanel, "No threats detected yet");
        surface.set_text(Slot::MonitoringState, "Unknown");
        surface.replace_rows(vec![LogRow::placeholder()]);
    }

    /// Apply a status snapshot: badge, counters, detection rate, last threat,
    /// distribution chart, monitoring state.
    pub fn render_status(&self, snapshot: &StatusSnapshot) {
        let surface = self.bindings.surface();

        let (icon, tone) = match snapshot.status {
            ThreatLevel::Safe => ("🔒", Tone::Safe),
            ThreatLevel::Warning => ("⚠️", Tone::Warning),
            ThreatLevel::Danger => ("🚨", Tone::Danger),
            ThreatLevel::Unknown => ("🛡️", Tone::Neutral),
        };
        surface.set_text(Slot::StatusIcon, icon);
        surface.set_text(Slot::StatusText, snapshot.status.label());
        surface.set_tone(Slot::StatusText, tone);

        self.animator.animate(Counter::Packets, snapshot.total_packets);
        self.animator.animate(Counter::Attacks, snapshot.total_attacks);

        surface.set_text(Slot::DetectionRate, &format::format_rate(snapshot.detection_rate));

        self.render_last_threat(snapshot.last_threat.as_ref());

        if let Some(chart) = self.bindings.chart() {
            chart.render(&snapshot.distribution);
        }

        let (state, state_tone) = if snapshot.monitoring_active {
            ("Active", Tone::Good)
        } else {
            ("Stopped", Tone::Bad)
        };
        surface.set_text(Slot::MonitoringState, state);
        surface.set_tone(Slot::MonitoringState, state_tone);
    }

    fn render_last_threat(&self, threat: Option<&ThreatEvent>) {
        let surface = self.bindings.surface();

        let Some(threat) = threat else {
            surface.set_text(Slot::ThreatPanel, "No threats detected yet");
            surface.set_tone(Slot::ThreatPanel, Tone::Neutral);
            return;
        };

        let text = format!(
            "Time: {}\nType: {}\nConfidence: {}\nProtocol: {}\nService: {}",
            format::format_timestamp(threat.timestamp.as_deref()),
            threat.threat_type.as_deref().unwrap_or("Unknown"),
            format::format_confidence(threat.confidence),
            threat.protocol.as_deref().unwrap_or("N/A"),
            threat.service.as_deref().unwrap_or("N/A"),
        );
        surface.set_text(Slot::ThreatPanel, &text);
        surface.set_tone(Slot::ThreatPanel, Tone::Danger);
    }

    /// Replace the log table body with one row per entry, order preserved.
    /// An empty batch renders exactly one placeholder row.
    pub fn render_logs(&self, entries: &[LogEntry]) {
        let rows = if entries.is_empty() {
            vec![LogRow::placeholder()]
        } else {
            entries.iter().map(Self::log_row).collect()
        };
        self.bindings.surface().replace_rows(rows);
    }

    fn log_row(entry: &LogEntry) -> LogRow {
        let tone = match entry.prediction {
            Prediction::Attack => Tone::Danger,
            Prediction::Normal | Prediction::Unknown => Tone::Safe,
        };

        LogRow {
            timestamp: format::format_timestamp(entry.timestamp.as_deref()),
            prediction: entry.prediction.label().to_string(),
            tone,
            confidence: format::format_confidence(entry.confidence),
            threat_type: entry.threat_type.clone().unwrap_or_else(|| "-".to_string()),
            protocol: entry.protocol_type.clone().unwrap_or_else(|| "-".to_string()),
            service: entry.service.clone().unwrap_or_else(|| "-".to_string()),
        }
    }

    pub fn render_connection(&self, connected: bool) {
        let surface = self.bindings.surface();
        if connected {
            surface.set_text(Slot::Connection, "Connected");
            surface.set_tone(Slot::Connection, Tone::Good);
        } else {
            surface.set_text(Slot::Connection, "Disconnected");
            surface.set_tone(Slot::Connection, Tone::Bad);
        }
    }

    pub fn render_upload_status(&self, text: &str, tone: Tone) {
        let surface = self.bindings.surface();
        surface.set_text(Slot::UploadStatus, text);
        surface.set_tone(Slot::UploadStatus, tone);
    }

    pub fn render_clock(&self, now: DateTime<Local>) {
        self.bindings
            .surface()
            .set_text(Slot::Clock, &now.format("%H:%M:%S").to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Distribution;
    use crate::ui::chart::BarChart;
    use crate::ui::surface::{BufferSurface, Surface};
    use std::sync::Arc;
    use std::time::Duration;

    fn renderer_with_surface() -> (Arc<BufferSurface>, Renderer) {
        let buffer = Arc::new(BufferSurface::new());
        let surface: Arc<dyn Surface> = Arc::clone(&buffer) as Arc<dyn Surface>;
        let chart = Arc::new(BarChart::new(Arc::clone(&surface)));
        let bindings = Bindings::bind(surface, Some(chart)).unwrap();
        (buffer, Renderer::new(bindings))
    }

    fn snapshot(status: ThreatLevel, packets: u64, attacks: u64) -> StatusSnapshot {
        StatusSnapshot {
            status,
            monitoring_active: true,
            total_packets: packets,
            total_attacks: attacks,
            detection_rate: 1.5,
            last_threat: None,
            distribution: Distribution {
                normal: packets - attacks,
                attack: attacks,
            },
        }
    }

    fn entry(prediction: Prediction) -> LogEntry {
        LogEntry {
            timestamp: Some("2026-08-27 10:00:00".to_string()),
            prediction,
            confidence: 0.8,
            threat_type: None,
            protocol_type: Some("tcp".to_string()),
            service: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn render_status_populates_all_targets() {
        let (surface, renderer) = renderer_with_surface();
        let snap = snapshot(ThreatLevel::Danger, 100, 8);
        renderer.render_status(&snap);
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(surface.text(Slot::StatusText).as_deref(), Some("DANGER"));
        assert_eq!(surface.tone(Slot::StatusText), Some(Tone::Danger));
        assert_eq!(surface.text(Slot::TotalPackets).as_deref(), Some("100"));
        assert_eq!(surface.text(Slot::TotalAttacks).as_deref(), Some("8"));
        assert_eq!(surface.text(Slot::DetectionRate).as_deref(), Some("1.5%"));
        assert_eq!(surface.text(Slot::MonitoringState).as_deref(), Some("Active"));
        assert!(surface.text(Slot::Chart).unwrap().contains("92"));
    }

    #[tokio::test(start_paused = true)]
    async fn rendering_same_snapshot_twice_is_idempotent() {
        let (surface, renderer) = renderer_with_surface();
        let snap = snapshot(ThreatLevel::Warning, 250, 12);

        renderer.render_status(&snap);
        tokio::time::sleep(Duration::from_millis(600)).await;
        let first = surface.snapshot();

        renderer.render_status(&snap);
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(first, surface.snapshot());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_status_falls_back_to_neutral() {
        let (surface, renderer) = renderer_with_surface();
        renderer.render_status(&snapshot(ThreatLevel::Unknown, 5, 0));
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(surface.text(Slot::StatusText).as_deref(), Some("UNKNOWN"));
        assert_eq!(surface.tone(Slot::StatusText), Some(Tone::Neutral));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_threat_fields_render_placeholders() {
        let (surface, renderer) = renderer_with_surface();
        let mut snap = snapshot(ThreatLevel::Danger, 10, 1);
        snap.last_threat = Some(ThreatEvent {
            timestamp: None,
            threat_type: None,
            confidence: 0.5,
            protocol: None,
            service: None,
        });
        renderer.render_status(&snap);

        let panel = surface.text(Slot::ThreatPanel).unwrap();
        assert!(panel.contains("Time: -"), "{}", panel);
        assert!(panel.contains("Type: Unknown"), "{}", panel);
        assert!(panel.contains("Protocol: N/A"), "{}", panel);
        assert!(panel.contains("Service: N/A"), "{}", panel);
    }

    #[test]
    fn empty_log_batch_renders_single_placeholder_row() {
        let (surface, renderer) = renderer_with_surface();
        renderer.render_logs(&[]);

        let rows = surface.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], LogRow::placeholder());
    }

    #[test]
    fn log_batch_renders_one_row_per_entry_in_order() {
        let (surface, renderer) = renderer_with_surface();
        let entries = vec![
            entry(Prediction::Attack),
            entry(Prediction::Normal),
            entry(Prediction::Attack),
        ];
        renderer.render_logs(&entries);

        let rows = surface.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].prediction, "attack");
        assert_eq!(rows[0].tone, Tone::Danger);
        assert_eq!(rows[1].prediction, "normal");
        assert_eq!(rows[1].tone, Tone::Safe);
        assert_eq!(rows[2].prediction, "attack");
        assert_eq!(rows[0].threat_type, "-");
        assert_eq!(rows[0].protocol, "tcp");
    }

    #[test]
    fn log_batch_fully_replaces_previous_rows() {
        let (surface, renderer) = renderer_with_surface();
        renderer.render_logs(&[entry(Prediction::Attack), entry(Prediction::Normal)]);
        renderer.render_logs(&[entry(Prediction::Normal)]);
        assert_eq!(surface.rows().len(), 1);
    }

    #[test]
    fn render_connection_toggles_label_and_tone() {
        let (surface, renderer) = renderer_with_surface();

        renderer.render_connection(true);
        assert_eq!(surface.text(Slot::Connection).as_deref(), Some("Connected"));
        assert_eq!(surface.tone(Slot::Connection), Some(Tone::Good));

        renderer.render_connection(false);
        assert_eq!(surface.text(Slot::Connection).as_deref(), Some("Disconnected"));
        assert_eq!(surface.tone(Slot::Connection), Some(Tone::Bad));
    }

    #[tokio::test(start_paused = true)]
    async fn render_without_chart_is_a_no_op_not_a_crash() {
        let buffer = Arc::new(BufferSurface::new());
        let bindings = Bindings::bind(Arc::clone(&buffer) as Arc<dyn Surface>, None).unwrap();
        let renderer = Renderer::new(bindings);

        renderer.render_status(&snapshot(ThreatLevel::Safe, 10, 0));
        assert_eq!(buffer.text(Slot::Chart).as_deref(), Some(""));
    }
}
