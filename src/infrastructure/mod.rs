//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Tree removal and atomic writes
//! - `notify/` - Notifier implementations
//! - `package_manager/` - npm adapter
//! - `process/` - Dependency process orchestration
//! - `runner/` - Command-backed test runner

pub mod fs;
pub mod notify;
pub mod package_manager;
pub mod process;
pub mod runner;

// Re-export for convenience
pub use fs::{remove_tree, LocalFs};
pub use notify::{SilentNotifier, TracingNotifier};
pub use package_manager::NpmPackageManager;
pub use process::{run_with_dependency, DependencyProcess};
pub use runner::CommandTestRunner;
