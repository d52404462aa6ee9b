//! In-memory link collection kept consistent with the link service.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkSummary, NewLink};
use crate::domain::repositories::{CreateOutcome, DeleteOutcome, LinkRepository};
use crate::error::{CreateError, FetchError};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Owns the client-side link collection.
///
/// The collection keeps the service's order; created links are prepended.
/// Clones share the same collection.
///
/// # Consistency
///
/// Mutations are applied to the collection as it is when the network call
/// completes, never to a copy taken before the call. Two workflows finishing
/// in either order therefore both land.
pub struct LinkSynchronizer<R: LinkRepository> {
    repository: Arc<R>,
    links: Arc<RwLock<Vec<Link>>>,
}

impl<R: LinkRepository> Clone for LinkSynchronizer<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            links: self.links.clone(),
        }
    }
}

impl<R: LinkRepository> LinkSynchronizer<R> {
    /// Creates a synchronizer with an empty collection.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_links(repository, Vec::new())
    }

    /// Creates a synchronizer starting from `links`.
    pub fn with_links(repository: Arc<R>, links: Vec<Link>) -> Self {
        Self {
            repository,
            links: Arc::new(RwLock::new(links)),
        }
    }

    /// The repository this synchronizer talks to.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Replaces the collection with the service's current list.
    ///
    /// Returns the number of links loaded.
    ///
    /// The list is the service's state when it was read. A create or remove
    /// that completes while the list is in flight is overwritten when the
    /// list lands: a new link can drop out and a deleted one can reappear
    /// until the next refresh. Refresh after mutations settle, not alongside
    /// them.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] and keeps the previous collection; stale
    /// data stays visible rather than an empty list.
    pub async fn refresh(&self) -> Result<usize, FetchError> {
        match self.repository.list().await {
            Ok(fresh) => {
                let count = fresh.len();
                *self.links.write().await = fresh;
                info!(count, "Link collection refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping previous collection");
                Err(e)
            }
        }
    }

    /// Validates and creates a link, prepending the canonical record.
    ///
    /// Nothing is inserted before the service confirms: it may assign the
    /// code and is the only judge of uniqueness.
    ///
    /// # Errors
    ///
    /// - [`CreateError::Validation`] before any request if the input is invalid
    /// - [`CreateError::CodeConflict`] if the code is taken
    /// - [`CreateError::Rejected`] if the service refused with a message
    /// - [`CreateError::Fetch`] on transport or unexpected failures
    ///
    /// The collection is unchanged in every error case.
    pub async fn create(&self, target_url: &str, code: Option<&str>) -> Result<Link, CreateError> {
        let new_link = NewLink::parse(target_url, code)?;

        match self.repository.create(new_link).await? {
            CreateOutcome::Created(link) => {
                let mut links = self.links.write().await;
                links.retain(|l| l.code != link.code);
                links.insert(0, link.clone());
                info!(code = %link.code, "Link created");
                Ok(link)
            }
            CreateOutcome::CodeConflict => {
                debug!(?code, "Create refused: code already taken");
                Err(CreateError::CodeConflict)
            }
            CreateOutcome::Rejected(message) => {
                debug!(%message, "Create rejected by link service");
                Err(CreateError::Rejected(message))
            }
        }
    }

    /// Deletes a link and drops it from the collection.
    ///
    /// A link the service no longer has counts as deleted: the local copy is
    /// removed too and [`DeleteOutcome::AlreadyGone`] is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] and leaves the collection unchanged.
    pub async fn remove(&self, code: &str) -> Result<DeleteOutcome, FetchError> {
        let outcome = self.repository.delete(code).await?;

        self.links.write().await.retain(|l| l.code != code);
        info!(code, ?outcome, "Link removed");

        Ok(outcome)
    }

    /// Swaps in a fresh canonical record for a code already held.
    ///
    /// Returns false (and changes nothing) if the code is not in the
    /// collection.
    pub async fn replace_record(&self, link: Link) -> bool {
        let mut links = self.links.write().await;
        match links.iter_mut().find(|l| l.code == link.code) {
            Some(slot) => {
                *slot = link;
                true
            }
            None => false,
        }
    }

    /// Links whose code or target URL contains `query`, ignoring case.
    pub async fn filtered(&self, query: &str) -> Vec<Link> {
        filter_links(&self.links.read().await, query)
    }

    /// Count, total clicks and average clicks over the whole collection.
    pub async fn aggregate(&self) -> LinkSummary {
        LinkSummary::of(&self.links.read().await)
    }

    /// Copy of the collection in order.
    pub async fn snapshot(&self) -> Vec<Link> {
        self.links.read().await.clone()
    }

    pub async fn contains(&self, code: &str) -> bool {
        self.links.read().await.iter().any(|l| l.code == code)
    }

    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

/// Case-insensitive substring filter over code and target URL.
///
/// An empty query returns every link, in order.
pub fn filter_links(links: &[Link], query: &str) -> Vec<Link> {
    if query.is_empty() {
        return links.to_vec();
    }

    let needle = query.to_lowercase();
    links
        .iter()
        .filter(|l| l.matches_lowercase(&needle))
        .cloned()
        .collect()
}
