//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod notifier;
pub mod package_manager;
pub mod test_runner;

pub use notifier::Notifier;
pub use package_manager::{PackageManager, PackageManagerError};
pub use test_runner::{TestRunner, TestRunnerError};
