//! File watcher for continuous test runs
//!
//! Implements the `watch` task: one run on start, then a debounced rerun
//! whenever a watched file changes, until Ctrl+C.

mod event;
mod run;

pub use event::{WatchEvent, WatchOptions};
pub use run::watch;
