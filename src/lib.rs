//! Rigger - build and test task runner
//!
//! Rigger removes build output, regenerates a reproducible npm lock artifact
//! and runs test suites against an auxiliary process that signals readiness
//! over a side channel. The suites can also be rerun on every file change.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod watcher;

// Re-exports for convenience
pub use config::Config;
pub use domain::entities::{sanitize, LockEntry};
pub use domain::ports::Notifier;
pub use domain::value_objects::SpawnSpec;
pub use error::{RiggerError, RiggerResult};
pub use infrastructure::fs::remove_tree;
pub use infrastructure::process::{run_with_dependency, ChildControl, ProcessError};
