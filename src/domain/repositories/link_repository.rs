//! Repository trait for remote short link access.

use crate::domain::entities::{Link, NewLink};
use crate::error::FetchError;
use async_trait::async_trait;

/// Result of looking up a single code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Link),
    /// The service answered 404.
    NotFound,
}

/// Result of a create request the service answered deliberately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Canonical record of the created link.
    Created(Link),
    /// The requested code is already in use (409).
    CodeConflict,
    /// The service refused the request and explained why.
    Rejected(String),
}

/// Result of a delete request the service answered deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The link did not exist (404). Callers treat this as success.
    AlreadyGone,
}

/// Typed access to the link service.
///
/// Every method performs exactly one request and classifies the answer.
/// Expected answers (404, 409) come back as outcome values; only transport
/// failures and statuses nobody branches on are [`FetchError`]s.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLinkRepository`] - `reqwest` implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_http.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Fetches every link, in the service's order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any non-2xx status or transport failure.
    async fn list(&self) -> Result<Vec<Link>, FetchError>;

    /// Fetches the canonical record for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Lookup::Found(link))` on 200
    /// - `Ok(Lookup::NotFound)` on 404
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any other status or transport failure.
    async fn get(&self, code: &str) -> Result<Lookup, FetchError>;

    /// Creates a link.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the service fails without an explanation
    /// or the request never completes.
    async fn create(&self, new_link: NewLink) -> Result<CreateOutcome, FetchError>;

    /// Deletes the link for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any status other than 2xx/404 or on
    /// transport failure.
    async fn delete(&self, code: &str) -> Result<DeleteOutcome, FetchError>;
}
