//! Notifier port - observability side-effects
//!
//! Every component that reports progress receives a notifier instead of
//! reaching for process-wide state.

/// Receives `title: message` notifications
///
/// Implementations:
/// - `TracingNotifier` - logs through `tracing`
/// - `SilentNotifier` - drops notifications (`--no-notify`)
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, title: &str, message: &str) {
        (**self).notify(title, message)
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, title: &str, message: &str) {
        (**self).notify(title, message)
    }
}

/// Notifier that remembers every notification (for testing)
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub seen: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.seen
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}
