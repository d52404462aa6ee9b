//! Application layer: link state and the workflows built on it.
//!
//! # Modules
//!
//! - [`services`] - Collection synchronizer, redirect resolver, stats view
//! - [`sequencer`] - Toasts, create form, delete confirmation, dashboard

pub mod sequencer;
pub mod services;
