//! Error types shared by the repository client and the application layer.
//!
//! Expected outcomes of the link service (404 on lookup, 409 on create, 404 on
//! delete) are not errors; they are modelled as outcome enums in
//! [`crate::domain::repositories`]. The types here cover what is left:
//! local validation failures and genuine transport/protocol failures.

use thiserror::Error;

/// Local, pre-network validation failure of a create request.
///
/// Always recoverable by correcting the input. Never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("Please enter a valid URL (include http:// or https://)")]
    InvalidUrl,

    #[error("Custom code must be 6-8 alphanumeric characters")]
    InvalidCode,
}

/// Failure to get a usable answer from the link service.
///
/// Transient from the user's point of view: recoverable by retrying, never
/// retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a status the caller has no branch for.
    #[error("unexpected status {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// A 2xx response whose body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns true if no response was received at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Why a create request did not produce a link.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested custom code is already taken.
    #[error("code already taken")]
    CodeConflict,

    /// The service rejected the request with its own message.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyUrl.to_string(), "Please enter a URL");
        assert!(ValidationError::InvalidUrl.to_string().contains("http://"));
        assert!(ValidationError::InvalidCode.to_string().contains("6-8"));
    }

    #[test]
    fn test_status_error_display() {
        let bare = FetchError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "unexpected status 500");

        let with_message = FetchError::Status {
            status: 503,
            message: Some("maintenance".to_string()),
        };
        assert_eq!(with_message.to_string(), "unexpected status 503: maintenance");
        assert!(!with_message.is_network());
    }

    #[test]
    fn test_create_error_from_validation() {
        let err: CreateError = ValidationError::InvalidCode.into();
        assert!(matches!(err, CreateError::Validation(ValidationError::InvalidCode)));
        assert_eq!(err.to_string(), "Custom code must be 6-8 alphanumeric characters");
    }
}
