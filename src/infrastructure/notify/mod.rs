//! Notifier implementations

mod log_notifier;

pub use log_notifier::{SilentNotifier, TracingNotifier};
