//! Wire model for the IDS backend API.
//!
//! Every payload is produced fresh per poll cycle and replaces prior state
//! wholesale; nothing here is merged or mutated in place.

use serde::{Deserialize, Serialize};

/// Aggregate status as reported by `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub status: ThreatLevel,
    #[serde(default)]
    pub monitoring_active: bool,
    #[serde(default)]
    pub total_packets: u64,
    #[serde(default)]
    pub total_attacks: u64,
    /// Percentage in [0, 100]; out-of-range values are clamped at display
    /// time, not here.
    #[serde(default)]
    pub detection_rate: f64,
    #[serde(default)]
    pub last_threat: Option<ThreatEvent>,
    #[serde(default)]
    pub distribution: Distribution,
}

/// Overall threat level. Values the server may add later deserialize to
/// `Unknown` rather than failing the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    #[default]
    Safe,
    Warning,
    Danger,
    #[serde(other)]
    Unknown,
}

impl ThreatLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "SAFE",
            ThreatLevel::Warning => "WARNING",
            ThreatLevel::Danger => "DANGER",
            ThreatLevel::Unknown => "UNKNOWN",
        }
    }
}

/// The most recent attack classification, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatEvent {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub threat_type: Option<String>,
    /// Ratio in [0, 1]; clamped at display time.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

/// Normal/attack counts for the traffic distribution chart. May be a subset
/// window, so the sum need not equal `total_packets`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default)]
    pub normal: u64,
    #[serde(default)]
    pub attack: u64,
}

impl Distribution {
    pub fn total(&self) -> u64 {
        self.normal + self.attack
    }
}

/// Response body of `GET /api/logs?limit=N`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogBatch {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// One classified packet, most-recent-first within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub prediction: Prediction,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub threat_type: Option<String>,
    #[serde(default)]
    pub protocol_type: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    #[default]
    Normal,
    Attack,
    #[serde(other)]
    Unknown,
}

impl Prediction {
    pub fn label(&self) -> &'static str {
        match self {
            Prediction::Normal => "normal",
            Prediction::Attack => "attack",
            Prediction::Unknown => "unknown",
        }
    }
}

/// Action carried by `POST /api/control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Start,
    Stop,
}

impl std::fmt::Display for ControlAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlAction::Start => write!(f, "start"),
            ControlAction::Stop => write!(f, "stop"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ControlRequest {
    pub action: ControlAction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControlResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Response body of `POST /api/upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Option<UploadCounts>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UploadCounts {
    pub total: u64,
    pub normal: u64,
    pub attack: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub database_connected: bool,
    #[serde(default)]
    pub monitoring_available: bool,
}
