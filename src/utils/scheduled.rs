//! Cancelable delayed tasks.
//!
//! Timers that change user-visible state (toast auto-dismiss, redirect
//! hand-off, form auto-close) are owned values: cancelling or dropping the
//! [`ScheduledTask`] guarantees the action never runs if it has not started.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// A future scheduled to run after a delay on the tokio runtime.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawns `task` to run once `delay` has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Cancels the task. No-op if it already ran.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            trace!("Cancelling scheduled task");
            handle.abort();
        }
    }

    /// Returns true once the task has run, or has been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the task.
    ///
    /// Returns `true` if it ran to completion, `false` if it was cancelled.
    pub async fn wait(mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
