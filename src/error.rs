//! Error types for Rigger
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::PackageManagerError;
use crate::infrastructure::process::ProcessError;

/// Result type alias for Rigger operations
pub type RiggerResult<T> = Result<T, RiggerError>;

/// Main error type for Rigger operations
#[derive(Error, Debug)]
pub enum RiggerError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Removing a path failed with an unrecoverable OS error
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid `rigger.toml`
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Lock artifact could not be parsed or serialized
    #[error("invalid lockfile {file}: {message}")]
    InvalidLockfile { file: PathBuf, message: String },

    /// An external program could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Package manager exited with a non-zero status
    #[error("`{command}` exited with code {code}")]
    PackageManager { command: String, code: i32 },

    /// Dependency process failed before the work could run
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Requested test suite is not configured
    #[error("unknown test suite '{name}'")]
    UnknownSuite { name: String },

    /// The file watcher could not be set up
    #[error("cannot watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Test runner reported failure
    #[error("test suite '{suite}' failed: {message}")]
    TestFailed { suite: String, message: String },
}

impl From<PackageManagerError> for RiggerError {
    fn from(err: PackageManagerError) -> Self {
        match err {
            PackageManagerError::Spawn { command, source } => RiggerError::Spawn { command, source },
            PackageManagerError::Exit { command, code } => {
                RiggerError::PackageManager { command, code }
            }
        }
    }
}

impl RiggerError {
    /// Exit code the binary should terminate with for this error.
    ///
    /// Package manager failures pass the manager's own code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            RiggerError::PackageManager { code, .. } => *code,
            _ => 1,
        }
    }
}
