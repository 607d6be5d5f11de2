//! Notification side-channel.
//!
//! Command outcomes surface through a [`Notifier`] instead of bubbling
//! errors to the caller. Delivery never fails the sender.

use std::sync::Arc;

use crate::ui::surface::{Slot, Surface, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Log-only notifier.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => log::info!("[notice] {}", message),
            NoticeLevel::Error => log::error!("[notice] {}", message),
        }
    }
}

/// Notifier that writes the notice line on the surface and mirrors it to the
/// log.
pub struct SurfaceNotifier {
    surface: Arc<dyn Surface>,
}

impl SurfaceNotifier {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface }
    }
}

impl Notifier for SurfaceNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let tone = match level {
            NoticeLevel::Info => Tone::Neutral,
            NoticeLevel::Success => Tone::Good,
            NoticeLevel::Error => Tone::Bad,
        };
        self.surface.set_tone(Slot::Notice, tone);
        self.surface.set_text(Slot::Notice, message);
        LogNotifier.notify(level, message);
    }
}
