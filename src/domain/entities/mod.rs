//! Core domain entities.
//!
//! Entities are plain data structures mirroring what the link service
//! returns, plus the validated input used to create new records.
//!
//! # Entity Types
//!
//! - [`Link`] - A short link as reported by the service (canonical record)
//! - [`NewLink`] - A validated create request
//! - [`LinkSummary`] - Totals over a collection of links

pub mod link;
pub mod summary;

pub use link::{Link, NewLink};
pub use summary::LinkSummary;
