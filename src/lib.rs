//! # TinyLink
//!
//! Client for the TinyLink short-link service: keeps a local view of the
//! link collection in sync with the service, resolves short codes into
//! redirects, and sequences the dashboard's create/delete workflows.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link entities, repository and navigator traits
//! - **Application Layer** ([`application`]) - Synchronizer, redirect resolver and UI workflows
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP client for the link service
//!
//! ## Quick Start
//!
//! ```bash
//! export TINYLINK_API_URL="https://api.tinylink.example"
//!
//! cargo run -- list
//! cargo run -- create https://example.com/some/long/path --code promo24
//! cargo run -- open promo24
//! ```
//!
//! ## Configuration
//!
//! Client configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::{CreateError, FetchError, ValidationError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::sequencer::{
        ConfirmOutcome, CreateForm, Dashboard, DeleteConfirmation, Notifier, SubmitOutcome, Timings,
        Toast, ToastKind,
    };
    pub use crate::application::services::{
        LinkSynchronizer, RedirectResolver, ResolveState, StatsOutcome, StatsService,
    };
    pub use crate::domain::entities::{Link, LinkSummary, NewLink};
    pub use crate::domain::navigator::Navigator;
    pub use crate::domain::repositories::{CreateOutcome, DeleteOutcome, LinkRepository, Lookup};
    pub use crate::error::{CreateError, FetchError, ValidationError};
    pub use crate::infrastructure::http::HttpLinkRepository;
}
