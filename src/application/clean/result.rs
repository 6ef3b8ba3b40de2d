//! Clean result

use std::path::PathBuf;

/// What a clean run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanResult {
    /// Paths that existed and were removed (or would be, on a dry run)
    pub removed: Vec<PathBuf>,
    /// Paths that did not exist
    pub absent: Vec<PathBuf>,
}

impl CleanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}
