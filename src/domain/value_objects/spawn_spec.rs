//! SpawnSpec value object - declares an auxiliary process
//!
//! Appears in `rigger.toml` as the `[dependency_process]` table.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Declaration of the auxiliary process a test phase depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSpec {
    /// Label used in notifications
    pub name: String,

    /// Executable name or path
    pub command: String,

    /// Ordered argument list
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory (None = inherit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Upper bound on the readiness wait (None or 0 = wait until ready or exit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_timeout_secs: Option<u64>,
}

impl SpawnSpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            working_dir: None,
            ready_timeout_secs: None,
        }
    }

    /// Set command arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set working directory
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Bound the readiness wait
    pub fn ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    pub fn ready_timeout_duration(&self) -> Option<Duration> {
        self.ready_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}
