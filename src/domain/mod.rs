//! Domain layer containing entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Link records, create requests and aggregates
//! - [`repositories`] - Remote link service contract
//! - [`navigator`] - Navigation hand-off capability
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Collaborator traits are implemented by the infrastructure layer and by
//!   the CLI, and mocked in tests
//! - Workflow logic lives in [`crate::application`]

pub mod entities;
pub mod navigator;
pub mod repositories;
