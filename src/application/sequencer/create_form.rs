//! Create-link form workflow.

use std::sync::{Arc, Weak};
use std::time::Duration;

use super::notifier::Notifier;
use crate::application::services::LinkSynchronizer;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::{CreateError, FetchError};
use crate::utils::scheduled::ScheduledTask;
use tokio::sync::Mutex;
use tracing::debug;

/// Default time the success message stays up before the form closes.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_secs(1);

pub const CONFLICT_MESSAGE: &str = "This code is already taken. Please choose another.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to create link. Please try again.";
pub const NETWORK_FAILURE_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const CREATED_TOAST: &str = "Short link created successfully!";

/// What the form currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub open: bool,
    pub target_url: String,
    pub code: String,
    pub error: Option<String>,
    pub in_flight: bool,
    pub succeeded: bool,
}

/// The single outcome surfaced for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Link),
    /// The custom code is taken; the form keeps the input.
    Conflict,
    /// Local validation failed or the service rejected the input.
    Invalid(String),
    /// Network or unexplained service failure.
    Failed(String),
    /// The form was closed or a submission was already in flight.
    Ignored,
}

#[derive(Debug, Default)]
struct Inner {
    state: FormState,
    close_timer: Option<ScheduledTask>,
}

impl Inner {
    fn cancel_close(&mut self) {
        if let Some(mut timer) = self.close_timer.take() {
            timer.cancel();
        }
    }
}

/// Drives one create form instance.
///
/// Only one submission is in flight at a time; submitting again meanwhile is
/// a no-op and the inputs are frozen. Every submission ends with exactly one
/// visible result: the success toast, or a message in the form's error slot.
pub struct CreateForm<R: LinkRepository> {
    synchronizer: LinkSynchronizer<R>,
    notifier: Notifier,
    inner: Arc<Mutex<Inner>>,
    close_delay: Duration,
}

impl<R: LinkRepository> CreateForm<R> {
    pub fn new(synchronizer: LinkSynchronizer<R>, notifier: Notifier) -> Self {
        Self {
            synchronizer,
            notifier,
            inner: Arc::new(Mutex::new(Inner::default())),
            close_delay: DEFAULT_CLOSE_DELAY,
        }
    }

    /// Overrides how long the success message stays before auto-close.
    pub fn with_close_delay(mut self, close_delay: Duration) -> Self {
        self.close_delay = close_delay;
        self
    }

    pub async fn state(&self) -> FormState {
        self.inner.lock().await.state.clone()
    }

    pub async fn open(&self) {
        let mut inner = self.inner.lock().await;
        inner.cancel_close();
        inner.state.open = true;
        inner.state.error = None;
        inner.state.succeeded = false;
    }

    /// Closes the form, clearing messages but keeping the draft.
    ///
    /// Returns false, leaving the form open, while a submission is in
    /// flight; its outcome is reported in the form.
    pub async fn close(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.state.in_flight {
            debug!("Close refused: submission in flight");
            return false;
        }
        inner.cancel_close();
        inner.state.open = false;
        inner.state.error = None;
        inner.state.succeeded = false;
        true
    }

    /// Updates the target URL. Ignored while a submission is in flight.
    pub async fn set_target_url(&self, target_url: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        if !inner.state.in_flight {
            inner.state.target_url = target_url.into();
        }
    }

    /// Updates the custom code. Ignored while a submission is in flight.
    pub async fn set_code(&self, code: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        if !inner.state.in_flight {
            inner.state.code = code.into();
        }
    }

    /// Submits the current draft.
    pub async fn submit(&self) -> SubmitOutcome {
        let (target_url, code) = {
            let mut inner = self.inner.lock().await;
            if !inner.state.open || inner.state.in_flight {
                debug!("Submit ignored");
                return SubmitOutcome::Ignored;
            }
            inner.cancel_close();
            inner.state.error = None;
            inner.state.succeeded = false;
            inner.state.in_flight = true;
            (inner.state.target_url.clone(), inner.state.code.clone())
        };

        let result = self.synchronizer.create(&target_url, Some(code.as_str())).await;

        let mut inner = self.inner.lock().await;
        inner.state.in_flight = false;

        let outcome = match result {
            Ok(link) => {
                inner.state.succeeded = true;
                inner.state.target_url.clear();
                inner.state.code.clear();
                inner.close_timer = Some(ScheduledTask::after(
                    self.close_delay,
                    auto_close(Arc::downgrade(&self.inner)),
                ));
                SubmitOutcome::Created(link)
            }
            Err(CreateError::Validation(e)) => SubmitOutcome::Invalid(e.to_string()),
            Err(CreateError::CodeConflict) => SubmitOutcome::Conflict,
            Err(CreateError::Rejected(message)) => SubmitOutcome::Invalid(message),
            Err(CreateError::Fetch(e)) => SubmitOutcome::Failed(failure_message(&e).to_string()),
        };

        inner.state.error = match &outcome {
            SubmitOutcome::Conflict => Some(CONFLICT_MESSAGE.to_string()),
            SubmitOutcome::Invalid(message) | SubmitOutcome::Failed(message) => Some(message.clone()),
            SubmitOutcome::Created(_) | SubmitOutcome::Ignored => None,
        };
        drop(inner);

        if matches!(outcome, SubmitOutcome::Created(_)) {
            self.notifier.success(CREATED_TOAST).await;
        }

        outcome
    }
}

fn failure_message(error: &FetchError) -> &'static str {
    match error {
        FetchError::Status { .. } => GENERIC_FAILURE_MESSAGE,
        FetchError::Network(_) | FetchError::Decode(_) => NETWORK_FAILURE_MESSAGE,
    }
}

/// Closes the form after a success, unless something reopened it meanwhile.
async fn auto_close(inner: Weak<Mutex<Inner>>) {
    let Some(inner) = inner.upgrade() else {
        return;
    };

    let mut inner = inner.lock().await;
    if inner.state.succeeded {
        debug!("Create form auto-closed");
        inner.state.open = false;
        inner.state.succeeded = false;
    }
}
