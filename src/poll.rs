//! Polling engine - the repeating status+logs refresh cycle.
//!
//! The poller owns the schedule and the connection state, nothing else.
//! Every cycle is an independent spawned task: overlapping cycles are
//! allowed, results apply as they resolve (last resolved wins), and a
//! failing retrieval never stops the schedule or blocks its sibling.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::client::Backend;
use crate::config::DashboardConfig;
use crate::ui::render::Renderer;

/// Connected/disconnected state, driven solely by status retrieval
/// outcomes. No hysteresis: the state after a cycle reflects only that
/// cycle's outcome. `None` until the first poll resolves.
pub struct ConnectionTracker {
    state: Mutex<Option<bool>>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    pub fn record(&self, connected: bool) {
        *self.state.lock() = Some(connected);
    }

    pub fn connected(&self) -> Option<bool> {
        *self.state.lock()
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct Poller {
    inner: Arc<PollerInner>,
}

struct PollerInner {
    backend: Arc<dyn Backend>,
    renderer: Arc<Renderer>,
    tracker: ConnectionTracker,
    poll_interval: Duration,
    log_limit: usize,
    schedule: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    pub fn new(backend: Arc<dyn Backend>, renderer: Arc<Renderer>, config: &DashboardConfig) -> Self {
        Self {
            inner: Arc::new(PollerInner {
                backend,
                renderer,
                tracker: ConnectionTracker::new(),
                poll_interval: config.poll_interval,
                log_limit: config.log_limit,
                schedule: Mutex::new(None),
            }),
        }
    }

    /// Start the recurring schedule. Idempotent: calling while already
    /// running is a no-op. The first cycle runs immediately; subsequent
    /// cycles follow at a fixed rate measured from cycle start, so a slow
    /// cycle may overlap the next one.
    pub fn start(&self) {
        let mut schedule = self.inner.schedule.lock();
        if schedule.as_ref().map(|h| !h.is_finished()).unwrap_or(false) {
            log::debug!("Polling already running");
            return;
        }

        log::info!(
            "Starting polling ({} ms interval)",
            self.inner.poll_interval.as_millis()
        );

        let inner = Arc::clone(&self.inner);
        *schedule = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.poll_interval);
            loop {
                ticker.tick().await;
                let cycle = Arc::clone(&inner);
                tokio::spawn(async move {
                    cycle.run_cycle().await;
                });
            }
        }));
    }

    /// Cancel the recurring schedule. Idempotent. In-flight cycles are
    /// independent tasks and still apply their results when they resolve.
    pub fn stop(&self) {
        if let Some(handle) = self.inner.schedule.lock().take() {
            handle.abort();
            log::info!("Polling stopped");
        } else {
            log::debug!("Polling not running");
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .schedule
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Run exactly one status+logs retrieval pair, outside the schedule.
    /// Used by the command dispatcher to resync after a control action.
    pub async fn run_once(&self) {
        self.inner.run_cycle().await;
    }

    pub fn connected(&self) -> Option<bool> {
        self.inner.tracker.connected()
    }
}

impl PollerInner {
    /// One poll cycle. The two retrievals are independent: each applies its
    /// result as soon as it resolves, and one failing never blocks the
    /// other.
    async fn run_cycle(&self) {
        let status = async {
            match self.backend.fetch_status().await {
                Ok(snapshot) => {
                    self.tracker.record(true);
                    self.renderer.render_connection(true);
                    self.renderer.render_status(&snapshot);
                }
                Err(e) => {
                    log::warn!("Status fetch failed: {}", e);
                    self.tracker.record(false);
                    self.renderer.render_connection(false);
                }
            }
        };

        let logs = async {
            match self.backend.fetch_logs(self.log_limit).await {
                Ok(batch) => self.renderer.render_logs(&batch.logs),
                // Absorbed: the table simply does not update this cycle.
                Err(e) => log::debug!("Log fetch failed: {}", e),
            }
        };

        tokio::join!(status, logs);
    }
}
