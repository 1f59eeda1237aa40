// src/progress.rs

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{Sender, SyncSender, TrySendError};
use tracing::warn;

/// One-way receiver of human-readable status lines.
///
/// Notifications are fire-and-forget: whatever an implementation does with a
/// message, the conversion carries on.
pub trait Progress {
    fn notify(&self, status: &str);
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn notify(&self, _status: &str) {}
}

impl<F: Fn(&str)> Progress for F {
    fn notify(&self, status: &str) {
        self(status)
    }
}

impl Progress for Sender<String> {
    fn notify(&self, status: &str) {
        // receiver gone: nobody is listening any more
        let _ = self.send(status.to_string());
    }
}

impl Progress for SyncSender<String> {
    fn notify(&self, status: &str) {
        match self.try_send(status.to_string()) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => warn!(status, "progress channel full; dropping"),
        }
    }
}

/// Deliver `status` to `sink`, containing any panic it raises.
pub(crate) fn emit(sink: &dyn Progress, status: &str) {
    if catch_unwind(AssertUnwindSafe(|| sink.notify(status))).is_err() {
        warn!(status, "progress sink panicked; continuing");
    }
}
