//! Clean options

use std::path::PathBuf;

use crate::config::CleanConfig;

/// Options for the clean command
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Paths to remove, relative to the project root unless absolute
    pub paths: Vec<PathBuf>,
    /// Report what would be removed without touching the filesystem
    pub dry_run: bool,
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl From<&CleanConfig> for CleanOptions {
    fn from(config: &CleanConfig) -> Self {
        Self::new().with_paths(config.paths.iter().cloned())
    }
}
