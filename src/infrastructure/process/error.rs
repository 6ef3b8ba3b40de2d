//! Error types for dependency processes

use std::io;
use thiserror::Error;

/// Dependency process errors
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn the process or set up its control channel
    #[error("failed to spawn dependency process '{name}': {source}")]
    SpawnFailed {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Process went away without ever signaling readiness
    #[error("dependency process '{name}' exited before signaling readiness ({status})")]
    ExitedBeforeReady { name: String, status: String },

    /// Readiness was not signaled within the configured bound
    #[error("dependency process '{name}' did not signal readiness within {seconds}s")]
    ReadyTimeout { name: String, seconds: u64 },

    /// Waiting on the process failed
    #[error("lost track of dependency process '{name}': {reason}")]
    Crashed { name: String, reason: String },

    /// No control channel implementation for this platform
    #[error("dependency processes require a Unix platform (the control channel is a Unix socket on descriptor 3)")]
    Unsupported,
}
