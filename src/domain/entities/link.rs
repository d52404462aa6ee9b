//! Link entity representing a short-code mapping as the service reports it.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for user-supplied short codes.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// A short link record.
///
/// Always the service's canonical representation: click counters and the
/// last-click timestamp are server-owned and are only ever changed by
/// replacing the whole record with a fresh server response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub code: String,
    pub target_url: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_clicks: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a link that has never been clicked.
    pub fn new(code: impl Into<String>, target_url: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
            total_clicks: 0,
            created_at,
            last_clicked_at: None,
        }
    }

    /// Returns true if `needle` occurs in the code or the target URL,
    /// ignoring case. `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.code.to_lowercase().contains(needle) || self.target_url.to_lowercase().contains(needle)
    }

    /// Target URL cut to `max_chars` characters, with `...` appended when cut.
    pub fn truncated_target(&self, max_chars: usize) -> String {
        if self.target_url.chars().count() > max_chars {
            let head: String = self.target_url.chars().take(max_chars).collect();
            format!("{head}...")
        } else {
            self.target_url.clone()
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Validated input for creating a new link.
///
/// `code` is omitted from the request body when absent so the service
/// generates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    #[validate(url)]
    pub target_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *CUSTOM_CODE_REGEX))]
    pub code: Option<String>,
}

impl NewLink {
    /// Builds a create request from raw form input.
    ///
    /// The URL is trimmed and must parse as an absolute URL. A blank code is
    /// treated as absent; otherwise it must be 6-8 ASCII alphanumerics.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, URL before code.
    pub fn parse(target_url: &str, code: Option<&str>) -> Result<Self, ValidationError> {
        let target_url = target_url.trim();
        if target_url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        let new_link = Self {
            target_url: target_url.to_string(),
            code: code
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        };

        if let Err(errors) = new_link.validate() {
            let fields = errors.field_errors();
            if fields.contains_key("target_url") {
                return Err(ValidationError::InvalidUrl);
            }
            return Err(ValidationError::InvalidCode);
        }

        Ok(new_link)
    }
}
