//! Terminal stand-ins for the mobile host's navigation and alerts.

use dressup_form::{Navigator, Notifier};

/// There is no screen stack in a terminal; leaving just gets logged.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn go_back(&self) {
        tracing::debug!("Leaving create-actor form");
    }
}

/// Prints user-facing messages to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}
