//! Repository trait definitions for the domain layer.
//!
//! The link service is the authority for every record; the trait here is
//! the contract the application layer talks to, implemented over HTTP in
//! `crate::infrastructure::http`.
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod link_repository;

pub use link_repository::{CreateOutcome, DeleteOutcome, LinkRepository, Lookup};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
