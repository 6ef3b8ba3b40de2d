//! Tracing-backed notifiers
//!
//! Desktop notifications are out of scope; notifications end up in the log.

use tracing::{debug, info};

use crate::domain::ports::Notifier;

/// Logs every notification at info level as `title: message`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, title: &str, message: &str) {
        info!(target: "rigger::notify", "{title}: {message}");
    }
}

/// Used with `--no-notify`; notifications only reach debug logs
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, title: &str, message: &str) {
        debug!(target: "rigger::notify", "{title}: {message}");
    }
}
