//! Form workflows that sit between the screens and the backend.
//!
//! - [`submission`]: the create-actor form and its submit pipeline.
//! - [`picker`]: image picking behind a permission check.
//! - [`detail`]: fetch-and-hold state for a single record view.
//!
//! Nothing here renders anything. The host (a mobile shell, the CLI, or a
//! test) supplies a [`Navigator`] and a [`Notifier`].

pub mod detail;
pub mod error;
pub mod picker;
pub mod submission;

pub use error::SubmitError;
pub use submission::{ActorForm, SubmitPhase};

/// Host navigation.
pub trait Navigator: Send + Sync {
    /// Leave the current screen.
    fn go_back(&self);
}

/// Host channel for user-visible messages (alerts, toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
