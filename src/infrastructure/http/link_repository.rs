//! `reqwest` implementation of [`LinkRepository`].

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{CreateOutcome, DeleteOutcome, LinkRepository, Lookup};
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Link service client over HTTP.
///
/// # Endpoints
///
/// - `GET    {base}/api/links`
/// - `GET    {base}/api/links/{code}`
/// - `POST   {base}/api/links`
/// - `DELETE {base}/api/links/{code}`
///
/// Codes are sent as a single percent-encoded path segment.
#[derive(Debug, Clone)]
pub struct HttpLinkRepository {
    client: Client,
    links_url: Url,
}

impl HttpLinkRepository {
    /// Creates a client for the service at `api_base` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if `api_base` cannot carry a path
    /// (e.g. `mailto:`) or the HTTP client cannot be built.
    pub fn new(api_base: &Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, api_base)
    }

    /// Creates a repository around an existing `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if `api_base` cannot carry a path.
    pub fn with_client(client: Client, api_base: &Url) -> Result<Self, FetchError> {
        let mut links_url = api_base.clone();
        links_url
            .path_segments_mut()
            .map_err(|_| FetchError::Network(format!("{api_base} cannot be used as an API base")))?
            .pop_if_empty()
            .extend(["api", "links"]);

        Ok(Self { client, links_url })
    }

    fn link_url(&self, code: &str) -> Url {
        let mut url = self.links_url.clone();
        // links_url was built through path_segments_mut, so it is a base URL.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(code);
        }
        url
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// Accepts both `{"error": "..."}` and `{"error": {"message": "..."}}`.
async fn error_message(response: Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    let error = body.get("error")?;

    error
        .as_str()
        .or_else(|| error.get("message").and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

async fn unexpected_status(response: Response) -> FetchError {
    let status = response.status();
    let message = error_message(response).await;
    warn!(status = status.as_u16(), ?message, "Unexpected response from link service");
    FetchError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl LinkRepository for HttpLinkRepository {
    async fn list(&self) -> Result<Vec<Link>, FetchError> {
        debug!(url = %self.links_url, "Listing links");

        let response = self.client.get(self.links_url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }

        Ok(response.json().await?)
    }

    async fn get(&self, code: &str) -> Result<Lookup, FetchError> {
        debug!(code, "Fetching link");

        let response = self.client.get(self.link_url(code)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(Lookup::NotFound),
            s if s.is_success() => Ok(Lookup::Found(response.json().await?)),
            _ => Err(unexpected_status(response).await),
        }
    }

    async fn create(&self, new_link: NewLink) -> Result<CreateOutcome, FetchError> {
        debug!(target_url = %new_link.target_url, code = ?new_link.code, "Creating link");

        let response = self
            .client
            .post(self.links_url.clone())
            .json(&new_link)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Ok(CreateOutcome::CodeConflict);
        }
        if status.is_success() {
            return Ok(CreateOutcome::Created(response.json().await?));
        }

        match error_message(response).await {
            Some(message) => {
                debug!(status = status.as_u16(), %message, "Link service rejected create");
                Ok(CreateOutcome::Rejected(message))
            }
            None => {
                warn!(status = status.as_u16(), "Create failed without explanation");
                Err(FetchError::Status {
                    status: status.as_u16(),
                    message: None,
                })
            }
        }
    }

    async fn delete(&self, code: &str) -> Result<DeleteOutcome, FetchError> {
        debug!(code, "Deleting link");

        let response = self.client.delete(self.link_url(code)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(DeleteOutcome::AlreadyGone),
            s if s.is_success() => Ok(DeleteOutcome::Deleted),
            _ => Err(unexpected_status(response).await),
        }
    }
}
