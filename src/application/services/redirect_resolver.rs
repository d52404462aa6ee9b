//! Two-phase redirect resolution: confirm the code exists, then hand off.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::navigator::Navigator;
use crate::domain::repositories::{LinkRepository, Lookup};
use crate::utils::scheduled::ScheduledTask;
use tracing::{debug, info, warn};
use url::Url;

/// Default pause between confirming a link and navigating to it.
pub const DEFAULT_GRACE_DELAY: Duration = Duration::from_millis(800);

/// State of one resolution attempt.
///
/// `Resolving` moves to exactly one of the other three, which are terminal.
/// `Redirecting` is terminal here because the navigator takes over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveState {
    Resolving,
    Redirecting { target: Url },
    NotFound,
    /// The lookup failed for a reason other than absence.
    Failed { reason: String },
}

impl ResolveState {
    /// True for both `NotFound` and `Failed`; the user sees the same
    /// not-found surface for either.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotFound | Self::Failed { .. })
    }
}

/// Ways out of the not-found surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundAction {
    Dashboard,
    Back,
}

impl NotFoundAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Go to Dashboard",
            Self::Back => "Go Back",
        }
    }
}

/// What the not-found surface offers, in display order.
pub const NOT_FOUND_ACTIONS: [NotFoundAction; 2] = [NotFoundAction::Dashboard, NotFoundAction::Back];

/// Resolves short codes and hands confirmed ones to a [`Navigator`].
///
/// # Protocol
///
/// 1. Look the code up (one attempt, no retry)
/// 2. 404 → [`ResolveState::NotFound`]
/// 3. Found → [`ResolveState::Redirecting`], then after the grace delay
///    navigate to `{redirect_base}/{code}`, which the service serves as the
///    real HTTP redirect and counts as a click
/// 4. Any other failure → [`ResolveState::Failed`]
///
/// The grace delay only gives a "redirecting" indicator time to show. It is
/// not a retry or a poll.
pub struct RedirectResolver<R: LinkRepository, N: Navigator> {
    repository: Arc<R>,
    navigator: Arc<N>,
    redirect_base: Url,
    grace_delay: Duration,
}

impl<R: LinkRepository, N: Navigator + 'static> RedirectResolver<R, N> {
    /// Creates a resolver with the default grace delay.
    pub fn new(repository: Arc<R>, navigator: Arc<N>, redirect_base: Url) -> Self {
        Self {
            repository,
            navigator,
            redirect_base,
            grace_delay: DEFAULT_GRACE_DELAY,
        }
    }

    /// Overrides the pause before navigation.
    pub fn with_grace_delay(mut self, grace_delay: Duration) -> Self {
        self.grace_delay = grace_delay;
        self
    }

    /// Where a confirmed `code` is handed off to.
    pub fn redirect_target(&self, code: &str) -> Url {
        let mut target = self.redirect_base.clone();
        if let Ok(mut segments) = target.path_segments_mut() {
            segments.pop_if_empty().push(code);
        }
        target
    }

    /// Runs one resolution attempt for `code`.
    ///
    /// The returned [`Resolution`] owns any pending navigation: drop it (or
    /// call [`Resolution::cancel`]) when the page goes away and the hand-off
    /// will not happen.
    pub async fn resolve(&self, code: &str) -> Resolution {
        debug!(code, "Resolving short code");

        let state = match self.repository.get(code).await {
            Ok(Lookup::Found(_)) => ResolveState::Redirecting {
                target: self.redirect_target(code),
            },
            Ok(Lookup::NotFound) => {
                info!(code, "Short code not found");
                ResolveState::NotFound
            }
            Err(e) => {
                warn!(code, error = %e, "Could not confirm short code");
                ResolveState::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let pending = match &state {
            ResolveState::Redirecting { target } => {
                let navigator = self.navigator.clone();
                let target = target.clone();
                info!(code, %target, delay_ms = self.grace_delay.as_millis() as u64, "Redirecting");
                Some(ScheduledTask::after(self.grace_delay, async move {
                    navigator.navigate(&target);
                }))
            }
            _ => None,
        };

        Resolution {
            code: code.to_string(),
            state,
            pending,
        }
    }
}

/// Outcome of [`RedirectResolver::resolve`].
#[derive(Debug)]
pub struct Resolution {
    code: String,
    state: ResolveState,
    pending: Option<ScheduledTask>,
}

impl Resolution {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> &ResolveState {
        &self.state
    }

    /// Where navigation will go, if the code was confirmed.
    pub fn target(&self) -> Option<&Url> {
        match &self.state {
            ResolveState::Redirecting { target } => Some(target),
            _ => None,
        }
    }

    /// Stops a navigation that has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(mut pending) = self.pending.take() {
            debug!(code = %self.code, "Pending redirect cancelled");
            pending.cancel();
        }
    }

    /// Waits for the hand-off.
    ///
    /// Returns true if navigation happened; false if there was nothing to
    /// navigate to or it was cancelled.
    pub async fn wait(mut self) -> bool {
        match self.pending.take() {
            Some(pending) => pending.wait().await,
            None => false,
        }
    }
}
