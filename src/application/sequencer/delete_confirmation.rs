//! Confirm-then-delete workflow.

use std::sync::Arc;

use super::notifier::{Notifier, ToastKind};
use crate::application::services::LinkSynchronizer;
use crate::domain::repositories::{DeleteOutcome, LinkRepository};
use tokio::sync::Mutex;
use tracing::debug;

pub const DELETED_TOAST: &str = "Link deleted successfully";
pub const ALREADY_GONE_TOAST: &str = "Link not found or already deleted";
pub const DELETE_FAILED_TOAST: &str = "Failed to delete link. Please try again.";

/// A confirmation currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub code: String,
    /// The delete request is in flight.
    pub busy: bool,
}

impl PendingConfirmation {
    /// Prompt text for the confirmation dialog.
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete the link \"{}\"? This action cannot be undone.",
            self.code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Deleted,
    AlreadyGone,
    Failed(String),
    /// No confirmation for this code was being shown; nothing was sent.
    NotRequested,
    /// A delete for this confirmation is already in flight.
    Busy,
}

/// Guards deletes behind an explicit confirmation of the same code.
///
/// `remove` is only ever called from [`DeleteConfirmation::confirm`], and only
/// when the code being confirmed is the one that was shown. While the
/// request is in flight the dialog is busy: it cannot be cancelled or
/// confirmed again. When the request completes the dialog closes and a
/// single toast reports the result.
pub struct DeleteConfirmation<R: LinkRepository> {
    synchronizer: LinkSynchronizer<R>,
    notifier: Notifier,
    pending: Arc<Mutex<Option<PendingConfirmation>>>,
}

impl<R: LinkRepository> DeleteConfirmation<R> {
    pub fn new(synchronizer: LinkSynchronizer<R>, notifier: Notifier) -> Self {
        Self {
            synchronizer,
            notifier,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn pending(&self) -> Option<PendingConfirmation> {
        self.pending.lock().await.clone()
    }

    /// Asks the user to confirm deleting `code`.
    ///
    /// Returns false, leaving the dialog alone, if another delete is in flight.
    pub async fn request(&self, code: impl Into<String>) -> bool {
        let mut pending = self.pending.lock().await;
        if pending.as_ref().is_some_and(|p| p.busy) {
            return false;
        }
        *pending = Some(PendingConfirmation {
            code: code.into(),
            busy: false,
        });
        true
    }

    /// Closes the dialog without deleting.
    ///
    /// Returns false if the delete is already in flight.
    pub async fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().await;
        if pending.as_ref().is_some_and(|p| p.busy) {
            return false;
        }
        *pending = None;
        true
    }

    /// Deletes `code` if it is the code awaiting confirmation.
    pub async fn confirm(&self, code: &str) -> ConfirmOutcome {
        {
            let mut pending = self.pending.lock().await;
            match pending.as_mut() {
                Some(p) if p.busy => return ConfirmOutcome::Busy,
                Some(p) if p.code == code => p.busy = true,
                _ => {
                    debug!(code, "Delete refused: not awaiting confirmation");
                    return ConfirmOutcome::NotRequested;
                }
            }
        }

        let result = self.synchronizer.remove(code).await;

        *self.pending.lock().await = None;

        let (outcome, message, kind) = match result {
            Ok(DeleteOutcome::Deleted) => (ConfirmOutcome::Deleted, DELETED_TOAST, ToastKind::Success),
            Ok(DeleteOutcome::AlreadyGone) => {
                (ConfirmOutcome::AlreadyGone, ALREADY_GONE_TOAST, ToastKind::Neutral)
            }
            Err(e) => (
                ConfirmOutcome::Failed(e.to_string()),
                DELETE_FAILED_TOAST,
                ToastKind::Error,
            ),
        };
        self.notifier.show(message, kind).await;

        outcome
    }
}
