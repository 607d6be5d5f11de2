//! Display formatting helpers. Pure functions, no state.

use chrono::{DateTime, NaiveDateTime};

/// Render a server timestamp as `HH:MM:SS`. Accepts RFC 3339 or the
/// backend's `YYYY-MM-DD HH:MM:SS` form; anything absent or unparseable
/// renders as `-`.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp else {
        return "-".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%H:%M:%S").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.format("%H:%M:%S").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%H:%M:%S").to_string();
    }

    "-".to_string()
}

/// Confidence ratio in [0, 1] as a one-decimal percentage. The server does
/// not guard its ranges, so out-of-range values are clamped here; the raw
/// payload value stays untouched upstream.
pub fn format_confidence(ratio: f64) -> String {
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("{:.1}%", ratio * 100.0)
}

/// Detection rate percentage in [0, 100], clamped the same way.
pub fn format_rate(percent: f64) -> String {
    let percent = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("{:.1}%", percent)
}
