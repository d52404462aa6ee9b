//! Dashboard state: the collection, its views and the workflows acting on it.

use std::sync::Arc;
use std::time::Duration;

use super::create_form::{CreateForm, DEFAULT_CLOSE_DELAY};
use super::delete_confirmation::DeleteConfirmation;
use super::notifier::{DEFAULT_TOAST_DURATION, Notifier};
use crate::application::services::{LinkSynchronizer, short_url};
use crate::domain::entities::{Link, LinkSummary};
use crate::domain::repositories::LinkRepository;
use tracing::debug;
use url::Url;

pub const LOAD_FAILED_TOAST: &str = "Failed to load links";
pub const COPIED_TOAST: &str = "Link copied to clipboard!";

/// Delays used by the dashboard's timed UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub toast_duration: Duration,
    pub form_close_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            toast_duration: DEFAULT_TOAST_DURATION,
            form_close_delay: DEFAULT_CLOSE_DELAY,
        }
    }
}

/// Why the visible list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The search matched nothing.
    NoMatches,
    /// There are no links at all.
    NoLinks,
}

impl EmptyState {
    pub fn title(self) -> &'static str {
        match self {
            Self::NoMatches => "No links found",
            Self::NoLinks => "No links yet",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::NoMatches => "Try adjusting your search",
            Self::NoLinks => "Create your first short link to get started",
        }
    }
}

/// Everything the link dashboard shows, owned in one place.
///
/// The create form and the delete confirmation share the dashboard's
/// collection and toast slot.
pub struct Dashboard<R: LinkRepository> {
    synchronizer: LinkSynchronizer<R>,
    notifier: Notifier,
    form: CreateForm<R>,
    deletion: DeleteConfirmation<R>,
    app_base: Url,
    query: String,
}

impl<R: LinkRepository> Dashboard<R> {
    /// Creates a dashboard; short URLs are built on `app_base`.
    pub fn new(repository: Arc<R>, app_base: Url, timings: Timings) -> Self {
        let synchronizer = LinkSynchronizer::new(repository);
        let notifier = Notifier::new(timings.toast_duration);
        let form = CreateForm::new(synchronizer.clone(), notifier.clone())
            .with_close_delay(timings.form_close_delay);
        let deletion = DeleteConfirmation::new(synchronizer.clone(), notifier.clone());

        Self {
            synchronizer,
            notifier,
            form,
            deletion,
            app_base,
            query: String::new(),
        }
    }

    pub fn synchronizer(&self) -> &LinkSynchronizer<R> {
        &self.synchronizer
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn form(&self) -> &CreateForm<R> {
        &self.form
    }

    pub fn deletion(&self) -> &DeleteConfirmation<R> {
        &self.deletion
    }

    /// Loads the collection from the service.
    ///
    /// Returns false on failure; the previous links stay listed and one
    /// error toast is shown.
    pub async fn load(&self) -> bool {
        match self.synchronizer.refresh().await {
            Ok(_) => true,
            Err(_) => {
                self.notifier.error(LOAD_FAILED_TOAST).await;
                false
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        debug!(query = %self.query, "Search updated");
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Links matching the current search.
    pub async fn visible_links(&self) -> Vec<Link> {
        self.synchronizer.filtered(&self.query).await
    }

    /// Why nothing is listed, or `None` if something is.
    pub async fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible_links().await.is_empty() {
            return None;
        }
        if self.query.is_empty() {
            Some(EmptyState::NoLinks)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    /// Totals over all links, regardless of the search.
    pub async fn summary(&self) -> LinkSummary {
        self.synchronizer.aggregate().await
    }

    pub fn short_url(&self, code: &str) -> Url {
        short_url(&self.app_base, code)
    }

    /// Returns the short URL for sharing and confirms it with a toast.
    pub async fn copy_link(&self, code: &str) -> Url {
        let url = self.short_url(code);
        self.notifier.success(COPIED_TOAST).await;
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sequencer::notifier::ToastKind;
    use crate::domain::repositories::{CreateOutcome, DeleteOutcome, MockLinkRepository};
    use crate::error::FetchError;
    use chrono::Utc;
    use mockall::Sequence;

    fn link(code: &str, url: &str, clicks: u64) -> Link {
        let mut link = Link::new(code, url, Utc::now());
        link.total_clicks = clicks;
        link
    }

    fn dashboard(mock_repo: MockLinkRepository) -> Dashboard<MockLinkRepository> {
        Dashboard::new(
            Arc::new(mock_repo),
            Url::parse("https://s.example.com").unwrap(),
            Timings::default(),
        )
    }

    #[tokio::test]
    async fn test_load_and_views() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_list().times(1).returning(|| {
            Ok(vec![
                link("abc123", "https://rust-lang.org", 5),
                link("def456", "https://example.com", 10),
            ])
        });

        let mut dashboard = dashboard(mock_repo);
        assert!(dashboard.load().await);

        assert_eq!(dashboard.visible_links().await.len(), 2);
        assert_eq!(dashboard.summary().await.total_clicks, 15);
        assert_eq!(dashboard.empty_state().await, None);

        dashboard.set_query("RUST");
        let visible = dashboard.visible_links().await;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].code, "abc123");
        // Totals ignore the search.
        assert_eq!(dashboard.summary().await.count, 2);

        dashboard.set_query("nothing-here");
        assert_eq!(dashboard.empty_state().await, Some(EmptyState::NoMatches));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_links_and_toasts_once() {
        let mut seq = Sequence::new();
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![link("abc123", "https://x.com", 5)]));
        mock_repo
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(FetchError::Network("offline".to_string())));

        let dashboard = dashboard(mock_repo);
        assert!(dashboard.load().await);
        assert!(!dashboard.load().await);

        assert_eq!(dashboard.visible_links().await.len(), 1);
        let toast = dashboard.notifier().current().await.unwrap();
        assert_eq!(toast.message, LOAD_FAILED_TOAST);
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_list().times(1).returning(|| Ok(Vec::new()));

        let dashboard = dashboard(mock_repo);
        dashboard.load().await;

        assert_eq!(dashboard.empty_state().await, Some(EmptyState::NoLinks));
        assert_eq!(dashboard.summary().await, LinkSummary::default());
    }

    #[tokio::test]
    async fn test_workflows_share_collection_and_toast() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![link("abc123", "https://x.com", 5)]));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Ok(CreateOutcome::Created(link("def456", "https://y.com", 0))));
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_| Ok(DeleteOutcome::Deleted));

        let dashboard = dashboard(mock_repo);
        dashboard.load().await;

        dashboard.form().open().await;
        dashboard.form().set_target_url("https://y.com").await;
        dashboard.form().submit().await;

        dashboard.deletion().request("abc123").await;
        dashboard.deletion().confirm("abc123").await;

        let codes: Vec<String> = dashboard
            .visible_links()
            .await
            .into_iter()
            .map(|l| l.code)
            .collect();
        assert_eq!(codes, ["def456"]);

        // Only the latest toast is visible.
        assert_eq!(
            dashboard.notifier().current().await.unwrap().message,
            "Link deleted successfully"
        );
    }

    #[tokio::test]
    async fn test_copy_link() {
        let dashboard = dashboard(MockLinkRepository::new());

        let url = dashboard.copy_link("abc123").await;

        assert_eq!(url.as_str(), "https://s.example.com/abc123");
        assert_eq!(dashboard.notifier().current().await.unwrap().message, COPIED_TOAST);
    }
}
