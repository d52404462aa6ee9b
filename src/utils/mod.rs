//! Utility functions shared by the application layer and the CLI.
//!
//! - [`scheduled`] - Cancelable delayed tasks
//! - [`time_format`] - Human-readable timestamps for the stats view

pub mod scheduled;
pub mod time_format;
