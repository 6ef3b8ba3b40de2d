//! PackageManager port - install and lock generation
//!
//! Both steps run synchronously with inherited I/O. A non-zero exit is
//! reported with the manager's own exit code so the caller can terminate
//! with it.

use thiserror::Error;

/// Package manager invocation errors
#[derive(Debug, Error)]
pub enum PackageManagerError {
    /// The manager could not be started at all
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The manager ran and exited unsuccessfully
    #[error("`{command}` exited with code {code}")]
    Exit { command: String, code: i32 },
}

/// External package manager (npm and friends)
pub trait PackageManager {
    /// Install dependencies (silent mode)
    fn install(&self) -> Result<(), PackageManagerError>;

    /// Generate the lock artifact, optionally including dev dependencies
    fn shrinkwrap(&self, dev: bool) -> Result<(), PackageManagerError>;
}
