//! Command dispatcher - user-initiated control and upload commands.
//!
//! Outcomes surface through the notifier and the upload status line; errors
//! are caught here and never reach the caller. After a successful command
//! the dispatcher asks the poller for one immediate out-of-band refresh.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::client::Backend;
use crate::api::types::ControlAction;
use crate::constants::UPLOAD_STATUS_CLEAR_DELAY;
use crate::notify::{NoticeLevel, Notifier};
use crate::poll::Poller;
use crate::ui::render::Renderer;
use crate::ui::surface::Tone;

pub struct CommandDispatcher {
    backend: Arc<dyn Backend>,
    renderer: Arc<Renderer>,
    poller: Poller,
    notifier: Arc<dyn Notifier>,
    /// Pending upload-status clear task; a new upload supersedes it.
    clear_task: Mutex<Option<JoinHandle<()>>>,
}

impl CommandDispatcher {
    pub fn new(
        backend: Arc<dyn Backend>,
        renderer: Arc<Renderer>,
        poller: Poller,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            renderer,
            poller,
            notifier,
            clear_task: Mutex::new(None),
        }
    }

    /// Start or stop server-side monitoring. The response message is
    /// surfaced whether or not the server reports success, then the poller
    /// resyncs immediately.
    pub async fn send_control(&self, action: ControlAction) {
        match self.backend.send_control(action).await {
            Ok(response) => {
                log::info!("Monitoring {}: {}", action, response.message);
                let level = if response.success {
                    NoticeLevel::Success
                } else {
                    NoticeLevel::Error
                };
                self.notifier.notify(level, &response.message);
                self.poller.run_once().await;
            }
            Err(e) => {
                log::error!("Control request failed: {}", e);
                self.notifier
                    .notify(NoticeLevel::Error, "Failed to control monitoring");
            }
        }
    }

    /// Upload a capture file for batch classification and report the
    /// per-class counts. The status line clears itself after a fixed delay;
    /// a second upload replaces the pending clear rather than queueing
    /// behind it.
    pub async fn upload_file(&self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "capture.csv".to_string());

        self.renderer.render_upload_status("Uploading...", Tone::Pending);

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Cannot read {}: {}", path.display(), e);
                self.renderer.render_upload_status("Upload error", Tone::Bad);
                self.notifier.notify(NoticeLevel::Error, "Upload error");
                self.schedule_status_clear();
                return;
            }
        };

        match self.backend.upload_capture(&file_name, bytes).await {
            Ok(response) if response.success => {
                let message = match response.results {
                    Some(counts) => format!(
                        "Processed {} packets: {} normal, {} attacks",
                        counts.total, counts.normal, counts.attack
                    ),
                    None => "Upload complete".to_string(),
                };
                self.renderer.render_upload_status(&message, Tone::Good);
                self.notifier
                    .notify(NoticeLevel::Success, "File uploaded successfully");
                self.poller.run_once().await;
            }
            Ok(response) => {
                let reason = response.error.unwrap_or_else(|| "Upload failed".to_string());
                log::warn!("Upload rejected: {}", reason);
                self.renderer.render_upload_status("Upload failed", Tone::Bad);
                self.notifier.notify(NoticeLevel::Error, &reason);
            }
            Err(e) => {
                log::error!("Upload request failed: {}", e);
                self.renderer.render_upload_status("Upload error", Tone::Bad);
                self.notifier.notify(NoticeLevel::Error, "Upload error");
            }
        }

        self.schedule_status_clear();
    }

    fn schedule_status_clear(&self) {
        let mut clear_task = self.clear_task.lock();
        if let Some(pending) = clear_task.take() {
            pending.abort();
        }

        let renderer = Arc::clone(&self.renderer);
        *clear_task = Some(tokio::spawn(async move {
            tokio::time::sleep(UPLOAD_STATUS_CLEAR_DELAY).await;
            renderer.render_upload_status("", Tone::Neutral);
        }));
    }
}
