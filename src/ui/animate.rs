//! Counter animation.
//!
//! Each animated counter is a short-lived task keyed by counter identity.
//! Starting a new animation for the same counter aborts the active task and
//! restarts from whatever value is currently displayed - last write wins,
//! nothing queues.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::constants::{ANIMATION_DURATION, ANIMATION_STEPS};
use crate::ui::surface::{Slot, Surface};

/// Identity of an animated counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Packets,
    Attacks,
}

impl Counter {
    fn slot(self) -> Slot {
        match self {
            Counter::Packets => Slot::TotalPackets,
            Counter::Attacks => Slot::TotalAttacks,
        }
    }
}

pub struct CounterAnimator {
    surface: Arc<dyn Surface>,
    tasks: Mutex<HashMap<Counter, JoinHandle<()>>>,
}

impl CounterAnimator {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            surface,
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Animate `counter` from its currently displayed value to `target`:
    /// 20 linear steps over 500 ms, snapping exactly to `target` on the
    /// final step. No-op when the display already shows `target`.
    pub fn animate(&self, counter: Counter, target: u64) {
        let slot = counter.slot();
        let current = self
            .surface
            .text(slot)
            .and_then(|t| t.trim().parse::<i64>().ok())
            .unwrap_or(0);

        if current == target as i64 {
            return;
        }

        let mut tasks = self.tasks.lock();
        if let Some(active) = tasks.remove(&counter) {
            active.abort();
        }

        let surface = Arc::clone(&self.surface);
        let step_duration = ANIMATION_DURATION / ANIMATION_STEPS;
        let increment = (target as f64 - current as f64) / ANIMATION_STEPS as f64;

        let handle = tokio::spawn(async move {
            for step in 1..=ANIMATION_STEPS {
                tokio::time::sleep(step_duration).await;
                if step == ANIMATION_STEPS {
                    surface.set_text(slot, &target.to_string());
                } else {
                    let value = (current as f64 + increment * step as f64).round() as i64;
                    surface.set_text(slot, &value.to_string());
                }
            }
        });

        tasks.insert(counter, handle);
    }

    /// Abort every active animation, leaving the displays at whatever value
    /// was last written.
    pub fn cancel_all(&self) {
        for (_, handle) in self.tasks.lock().drain() {
            handle.abort();
        }
    }
}

impl Drop for CounterAnimator {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Surface wrapper that records every write to a single slot.
    struct RecordingSurface {
        inner: crate::ui::surface::BufferSurface,
        writes: Mutex<Vec<String>>,
        watched: Slot,
    }

    impl RecordingSurface {
        fn new(watched: Slot) -> Self {
            Self {
                inner: crate::ui::surface::BufferSurface::new(),
                writes: Mutex::new(Vec::new()),
                watched,
            }
        }
    }

    impl Surface for RecordingSurface {
        fn has_slot(&self, slot: Slot) -> bool {
            self.inner.has_slot(slot)
        }
        fn set_text(&self, slot: Slot, text: &str) {
            if slot == self.watched {
                self.writes.lock().push(text.to_string());
            }
            self.inner.set_text(slot, text);
        }
        fn text(&self, slot: Slot) -> Option<String> {
            self.inner.text(slot)
        }
        fn set_tone(&self, slot: Slot, tone: crate::ui::surface::Tone) {
            self.inner.set_tone(slot, tone);
        }
        fn tone(&self, slot: Slot) -> Option<crate::ui::surface::Tone> {
            self.inner.tone(slot)
        }
        fn replace_rows(&self, rows: Vec<crate::ui::surface::LogRow>) {
            self.inner.replace_rows(rows);
        }
        fn rows(&self) -> Vec<crate::ui::surface::LogRow> {
            self.inner.rows()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn animation_is_monotonic_and_snaps_to_target() {
        let surface = Arc::new(RecordingSurface::new(Slot::TotalPackets));
        surface.set_text(Slot::TotalPackets, "0");
        surface.writes.lock().clear();

        let animator = CounterAnimator::new(Arc::clone(&surface) as Arc<dyn Surface>);
        animator.animate(Counter::Packets, 137);

        tokio::time::sleep(Duration::from_millis(600)).await;

        let writes = surface.writes.lock().clone();
        assert!(!writes.is_empty());
        assert!(writes.len() <= 20, "expected <= 20 updates, got {}", writes.len());
        assert_eq!(writes.last().unwrap(), "137");

        let values: Vec<i64> = writes.iter().map(|w| w.parse().unwrap()).collect();
        for pair in values.windows(2) {
            assert!(pair[1] >= pair[0], "sequence not monotonic: {:?}", values);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn downward_animation_reaches_target_exactly() {
        let surface = Arc::new(RecordingSurface::new(Slot::TotalAttacks));
        surface.set_text(Slot::TotalAttacks, "500");
        surface.writes.lock().clear();

        let animator = CounterAnimator::new(Arc::clone(&surface) as Arc<dyn Surface>);
        animator.animate(Counter::Attacks, 13);

        tokio::time::sleep(Duration::from_millis(600)).await;

        let writes = surface.writes.lock().clone();
        assert_eq!(writes.last().unwrap(), "13");
        let values: Vec<i64> = writes.iter().map(|w| w.parse().unwrap()).collect();
        for pair in values.windows(2) {
            assert!(pair[1] <= pair[0], "sequence not monotonic: {:?}", values);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn equal_target_is_a_no_op() {
        let surface = Arc::new(RecordingSurface::new(Slot::TotalPackets));
        surface.set_text(Slot::TotalPackets, "42");
        surface.writes.lock().clear();

        let animator = CounterAnimator::new(Arc::clone(&surface) as Arc<dyn Surface>);
        animator.animate(Counter::Packets, 42);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(surface.writes.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn new_target_supersedes_running_animation() {
        let surface = Arc::new(RecordingSurface::new(Slot::TotalPackets));
        surface.set_text(Slot::TotalPackets, "0");

        let animator = CounterAnimator::new(Arc::clone(&surface) as Arc<dyn Surface>);
        animator.animate(Counter::Packets, 1000);

        // Halfway through, a fresh snapshot arrives with a new total.
        tokio::time::sleep(Duration::from_millis(250)).await;
        animator.animate(Counter::Packets, 200);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(
            surface.text(Slot::TotalPackets).as_deref(),
            Some("200"),
            "last-write-wins target must be the final value"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn independent_counters_animate_concurrently() {
        let surface = Arc::new(crate::ui::surface::BufferSurface::new());
        surface.set_text(Slot::TotalPackets, "0");
        surface.set_text(Slot::TotalAttacks, "0");

        let animator = CounterAnimator::new(Arc::clone(&surface) as Arc<dyn Surface>);
        animator.animate(Counter::Packets, 100);
        animator.animate(Counter::Attacks, 9);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(surface.text(Slot::TotalPackets).as_deref(), Some("100"));
        assert_eq!(surface.text(Slot::TotalAttacks).as_deref(), Some("9"));
    }
}
