//! Per-link statistics view backed by a fresh canonical record.

use std::sync::Arc;

use crate::application::services::LinkSynchronizer;
use crate::domain::entities::Link;
use crate::domain::repositories::{LinkRepository, Lookup};
use crate::error::FetchError;
use crate::utils::time_format::{format_timestamp, relative_time};
use chrono::{DateTime, Utc};
use tracing::debug;
use url::Url;

/// Maximum target URL length shown before truncation.
pub const TARGET_DISPLAY_CHARS: usize = 60;

/// Builds the public short URL for a code.
pub fn short_url(app_base: &Url, code: &str) -> Url {
    let mut url = app_base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(code);
    }
    url
}

/// Statistics for one link, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub link: Link,
    pub short_url: Url,
}

impl LinkStats {
    /// e.g. `January 2, 2025, 03:04 PM`
    pub fn created(&self) -> String {
        format_timestamp(Some(self.link.created_at))
    }

    /// Full date of the last click, or `Never`.
    pub fn last_clicked(&self) -> String {
        format_timestamp(self.link.last_clicked_at)
    }

    /// How long ago the last click was, relative to `now`.
    pub fn last_clicked_relative(&self, now: DateTime<Utc>) -> String {
        relative_time(self.link.last_clicked_at, now)
    }

    pub fn display_target(&self) -> String {
        self.link.truncated_target(TARGET_DISPLAY_CHARS)
    }
}

/// Result of loading statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOutcome {
    Loaded(LinkStats),
    /// The service has no such code; callers show their not-found page.
    NotFound,
}

/// Loads statistics for a single link.
///
/// Clicks and the last-click time change out of band, so the record is
/// always re-fetched rather than read from the local collection. When a
/// synchronizer is attached, the fresh record also replaces its local copy.
pub struct StatsService<R: LinkRepository> {
    repository: Arc<R>,
    app_base: Url,
    synchronizer: Option<LinkSynchronizer<R>>,
}

impl<R: LinkRepository> StatsService<R> {
    /// Creates a stats service; short URLs are built on `app_base`.
    pub fn new(repository: Arc<R>, app_base: Url) -> Self {
        Self {
            repository,
            app_base,
            synchronizer: None,
        }
    }

    /// Also refreshes the matching record held by `synchronizer`.
    pub fn with_synchronizer(mut self, synchronizer: LinkSynchronizer<R>) -> Self {
        self.synchronizer = Some(synchronizer);
        self
    }

    /// Fetches the canonical record for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the record cannot be fetched for any
    /// reason other than absence.
    pub async fn load(&self, code: &str) -> Result<StatsOutcome, FetchError> {
        debug!(code, "Loading link statistics");

        let link = match self.repository.get(code).await? {
            Lookup::Found(link) => link,
            Lookup::NotFound => return Ok(StatsOutcome::NotFound),
        };

        if let Some(synchronizer) = &self.synchronizer {
            synchronizer.replace_record(link.clone()).await;
        }

        Ok(StatsOutcome::Loaded(LinkStats {
            short_url: short_url(&self.app_base, &link.code),
            link,
        }))
    }
}
