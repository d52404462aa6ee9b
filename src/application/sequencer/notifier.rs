//! Single-slot toast notifications with auto-dismiss.

use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::utils::scheduled::ScheduledTask;
use tokio::sync::Mutex;
use tracing::debug;

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<(u64, Toast)>,
    next_id: u64,
    timer: Option<ScheduledTask>,
}

/// Shows at most one toast at a time.
///
/// A new toast replaces the visible one and restarts the auto-dismiss timer.
/// Dismissing, by timer or by hand, clears the slot completely, so the same
/// message can be shown again afterwards. Clones share the slot.
#[derive(Debug, Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    duration: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl Notifier {
    /// Creates a notifier whose toasts auto-dismiss after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            duration,
        }
    }

    /// Shows a toast, replacing any visible one.
    pub async fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let toast = Toast {
            message: message.into(),
            kind,
        };
        debug!(message = %toast.message, ?kind, "Toast shown");

        let mut slot = self.slot.lock().await;
        slot.next_id += 1;
        let id = slot.next_id;
        slot.current = Some((id, toast));

        // Replacing the timer drops, and so cancels, the previous one.
        let weak = Arc::downgrade(&self.slot);
        slot.timer = Some(ScheduledTask::after(self.duration, expire(weak, id)));
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error).await;
    }

    /// The visible toast, if any.
    pub async fn current(&self) -> Option<Toast> {
        self.slot
            .lock()
            .await
            .current
            .as_ref()
            .map(|(_, toast)| toast.clone())
    }

    /// Hides the visible toast and stops its timer.
    pub async fn dismiss(&self) {
        let mut slot = self.slot.lock().await;
        slot.current = None;
        if let Some(mut timer) = slot.timer.take() {
            timer.cancel();
        }
    }
}

/// Clears toast `id` unless a newer toast has taken its place.
async fn expire(slot: Weak<Mutex<Slot>>, id: u64) {
    let Some(slot) = slot.upgrade() else {
        return;
    };

    let mut slot = slot.lock().await;
    if slot.current.as_ref().is_some_and(|(current, _)| *current == id) {
        debug!("Toast expired");
        slot.current = None;
    }
}
