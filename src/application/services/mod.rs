//! Services that own link state and drive the service protocols.

pub mod link_synchronizer;
pub mod redirect_resolver;
pub mod stats_service;

pub use link_synchronizer::{LinkSynchronizer, filter_links};
pub use redirect_resolver::{
    DEFAULT_GRACE_DELAY, NOT_FOUND_ACTIONS, NotFoundAction, RedirectResolver, ResolveState,
    Resolution,
};
pub use stats_service::{LinkStats, StatsOutcome, StatsService, short_url};
