//! Traffic distribution chart collaborator.

use std::sync::Arc;

use crate::api::types::Distribution;
use crate::ui::surface::{Slot, Surface, Tone};

/// Chart collaborator contract: callable repeatedly with monotonically
/// updated counts. The renderer holds it as an `Option`, so an absent chart
/// is a no-op.
pub trait DistributionChart: Send + Sync {
    fn render(&self, distribution: &Distribution);
}

const BAR_WIDTH: usize = 24;

/// Two-bar normal/attack chart written into the chart slot.
pub struct BarChart {
    surface: Arc<dyn Surface>,
}

impl BarChart {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface }
    }

    fn bar_line(label: &str, count: u64, total: u64) -> String {
        let share = if total > 0 {
            count as f64 / total as f64
        } else {
            0.0
        };
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);

        format!(
            "{:<7} {}{} {} ({:.1}%)",
            label,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            count,
            share * 100.0
        )
    }
}

impl DistributionChart for BarChart {
    fn render(&self, distribution: &Distribution) {
        let total = distribution.total();
        let text = format!(
            "{}\n{}",
            Self::bar_line("Normal", distribution.normal, total),
            Self::bar_line("Attack", distribution.attack, total),
        );

        self.surface.set_text(Slot::Chart, &text);
        self.surface.set_tone(
            Slot::Chart,
            if distribution.attack > 0 {
                Tone::Warning
            } else {
                Tone::Neutral
            },
        );
    }
}
