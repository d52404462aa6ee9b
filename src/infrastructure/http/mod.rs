//! HTTP access to the remote link service.

pub mod link_repository;

pub use link_repository::HttpLinkRepository;
