//! Render surface abstraction.
//!
//! The dashboard never touches a concrete display directly. All output goes
//! through a [`Surface`]: a set of named text slots plus one log table. The
//! terminal painter wraps a [`BufferSurface`]; tests read one back directly.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{DashboardError, DashboardResult};
use crate::ui::chart::DistributionChart;

/// Identity of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    StatusIcon,
    StatusText,
    Connection,
    TotalPackets,
    TotalAttacks,
    DetectionRate,
    ThreatPanel,
    MonitoringState,
    UploadStatus,
    Notice,
    Clock,
    Chart,
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::StatusIcon => "status icon",
            Slot::StatusText => "status text",
            Slot::Connection => "connection indicator",
            Slot::TotalPackets => "total packets counter",
            Slot::TotalAttacks => "total attacks counter",
            Slot::DetectionRate => "detection rate",
            Slot::ThreatPanel => "threat panel",
            Slot::MonitoringState => "monitoring state",
            Slot::UploadStatus => "upload status",
            Slot::Notice => "notice line",
            Slot::Clock => "clock",
            Slot::Chart => "traffic chart",
        }
    }

    /// Slots that must exist for the dashboard to operate. The chart is the
    /// one optional widget; its absence degrades to a no-op.
    pub const REQUIRED: &'static [Slot] = &[
        Slot::StatusIcon,
        Slot::StatusText,
        Slot::Connection,
        Slot::TotalPackets,
        Slot::TotalAttacks,
        Slot::DetectionRate,
        Slot::ThreatPanel,
        Slot::MonitoringState,
        Slot::UploadStatus,
        Slot::Notice,
        Slot::Clock,
    ];
}

/// Display tone of a slot, mapped to a color by the painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Safe,
    Warning,
    Danger,
    Good,
    Bad,
    Pending,
}

/// One rendered row of the detection log table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub timestamp: String,
    pub prediction: String,
    pub tone: Tone,
    pub confidence: String,
    pub threat_type: String,
    pub protocol: String,
    pub service: String,
}

impl LogRow {
    /// Single placeholder row used when the server reports no logs.
    pub fn placeholder() -> Self {
        Self {
            timestamp: "-".to_string(),
            prediction: "No logs available".to_string(),
            tone: Tone::Neutral,
            confidence: "-".to_string(),
            threat_type: "-".to_string(),
            protocol: "-".to_string(),
            service: "-".to_string(),
        }
    }
}

/// Abstract display the renderer writes into.
pub trait Surface: Send + Sync {
    fn has_slot(&self, slot: Slot) -> bool;
    fn set_text(&self, slot: Slot, text: &str);
    fn text(&self, slot: Slot) -> Option<String>;
    fn set_tone(&self, slot: Slot, tone: Tone);
    fn tone(&self, slot: Slot) -> Option<Tone>;
    /// Wholesale replacement of the log table body.
    fn replace_rows(&self, rows: Vec<LogRow>);
    fn rows(&self) -> Vec<LogRow>;
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SlotState {
    text: String,
    tone: Tone,
}

#[derive(Default)]
struct BufferState {
    slots: HashMap<Slot, SlotState>,
    rows: Vec<LogRow>,
}

/// In-memory surface holding the current state of every slot. Serves as the
/// state model behind the terminal painter and as the observable display in
/// tests.
pub struct BufferSurface {
    state: Mutex<BufferState>,
}

impl BufferSurface {
    /// Surface providing every slot.
    pub fn new() -> Self {
        Self::with_slots(Slot::REQUIRED.iter().copied().chain([Slot::Chart]))
    }

    /// Surface providing only the given slots, for exercising degraded
    /// displays.
    pub fn with_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        let mut state = BufferState::default();
        for slot in slots {
            state.slots.insert(slot, SlotState::default());
        }
        Self {
            state: Mutex::new(state),
        }
    }

    /// Snapshot of all slot text/tones plus the log rows, for comparing
    /// display states.
    pub fn snapshot(&self) -> (Vec<(Slot, String, Tone)>, Vec<LogRow>) {
        let state = self.state.lock();
        let mut slots: Vec<(Slot, String, Tone)> = state
            .slots
            .iter()
            .map(|(slot, s)| (*slot, s.text.clone(), s.tone))
            .collect();
        slots.sort_by_key(|(slot, _, _)| slot.name());
        (slots, state.rows.clone())
    }
}

impl Default for BufferSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for BufferSurface {
    fn has_slot(&self, slot: Slot) -> bool {
        self.state.lock().slots.contains_key(&slot)
    }

    fn set_text(&self, slot: Slot, text: &str) {
        if let Some(state) = self.state.lock().slots.get_mut(&slot) {
            state.text = text.to_string();
        }
    }

    fn text(&self, slot: Slot) -> Option<String> {
        self.state.lock().slots.get(&slot).map(|s| s.text.clone())
    }

    fn set_tone(&self, slot: Slot, tone: Tone) {
        if let Some(state) = self.state.lock().slots.get_mut(&slot) {
            state.tone = tone;
        }
    }

    fn tone(&self, slot: Slot) -> Option<Tone> {
        self.state.lock().slots.get(&slot).map(|s| s.tone)
    }

    fn replace_rows(&self, rows: Vec<LogRow>) {
        self.state.lock().rows = rows;
    }

    fn rows(&self) -> Vec<LogRow> {
        self.state.lock().rows.clone()
    }
}

/// Typed handle set produced by the explicit binding step. Verifies the
/// required slots once, up front, and carries the chart collaborator as an
/// `Option` so a missing chart is a no-op rather than a failure.
#[derive(Clone)]
pub struct Bindings {
    surface: Arc<dyn Surface>,
    chart: Option<Arc<dyn DistributionChart>>,
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field("chart", &self.chart.is_some())
            .finish()
    }
}

impl Bindings {
    pub fn bind(
        surface: Arc<dyn Surface>,
        chart: Option<Arc<dyn DistributionChart>>,
    ) -> DashboardResult<Self> {
        let missing: Vec<&str> = Slot::REQUIRED
            .iter()
            .filter(|slot| !surface.has_slot(**slot))
            .map(|slot| slot.name())
            .collect();

        if !missing.is_empty() {
            return Err(DashboardError::RenderTargets(missing.join(", ")));
        }

        if chart.is_none() || !surface.has_slot(Slot::Chart) {
            log::warn!("Chart target not available, distribution rendering disabled");
        }

        Ok(Self { surface, chart })
    }

    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    pub fn chart(&self) -> Option<&Arc<dyn DistributionChart>> {
        self.chart.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::chart::BarChart;

    #[test]
    fn bind_succeeds_with_full_surface() {
        let surface: Arc<dyn Surface> = Arc::new(BufferSurface::new());
        let chart = Arc::new(BarChart::new(Arc::clone(&surface)));
        assert!(Bindings::bind(surface, Some(chart)).is_ok());
    }

    #[test]
    fn bind_aggregates_all_missing_slots_into_one_error() {
        let surface: Arc<dyn Surface> = Arc::new(BufferSurface::with_slots(
            Slot::REQUIRED.iter().copied().filter(|s| {
                !matches!(s, Slot::Clock | Slot::ThreatPanel)
            }),
        ));

        let err = Bindings::bind(surface, None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("clock"), "{}", msg);
        assert!(msg.contains("threat panel"), "{}", msg);
    }

    #[test]
    fn bind_without_chart_is_not_an_error() {
        let surface: Arc<dyn Surface> = Arc::new(BufferSurface::new());
        let bindings = Bindings::bind(surface, None).unwrap();
        assert!(bindings.chart().is_none());
    }

    #[test]
    fn writes_to_absent_slots_are_dropped() {
        let surface = BufferSurface::with_slots([Slot::Clock]);
        surface.set_text(Slot::StatusText, "SAFE");
        assert!(surface.text(Slot::StatusText).is_none());

        surface.set_text(Slot::Clock, "12:00:00");
        assert_eq!(surface.text(Slot::Clock).as_deref(), Some("12:00:00"));
    }
}
