//! User-facing workflows that sequence confirmation, notification and form
//! state around the synchronizer.
//!
//! Each workflow surfaces exactly one outcome per user action and refuses
//! re-entrant triggers (a second submit, a second confirm) while its request
//! is in flight.
//!
//! - [`notifier`] - Single-slot toasts with auto-dismiss
//! - [`create_form`] - Create-link form
//! - [`delete_confirmation`] - Confirm-then-delete
//! - [`dashboard`] - Owns the collection, search query and the workflows above

pub mod create_form;
pub mod dashboard;
pub mod delete_confirmation;
pub mod notifier;

pub use create_form::{CreateForm, FormState, SubmitOutcome};
pub use dashboard::{Dashboard, EmptyState, Timings};
pub use delete_confirmation::{ConfirmOutcome, DeleteConfirmation, PendingConfirmation};
pub use notifier::{Notifier, Toast, ToastKind};
