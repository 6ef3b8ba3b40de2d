//! Clean Use Case
//!
//! Deletes every configured path through `remove_tree`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{RiggerError, RiggerResult};
use crate::infrastructure::fs::remove_tree;

use super::options::CleanOptions;
use super::result::CleanResult;

pub struct CleanUseCase {
    project_root: PathBuf,
}

impl CleanUseCase {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Remove every path in `options`. Stops at the first unrecoverable error.
    pub fn execute(&self, options: &CleanOptions) -> RiggerResult<CleanResult> {
        let mut result = CleanResult::new();

        for relative in &options.paths {
            let path = self.resolve(relative);

            if path.symlink_metadata().is_err() {
                debug!(path = %path.display(), "nothing to clean");
                result.absent.push(path);
                continue;
            }

            if !options.dry_run {
                info!(path = %path.display(), "removing");
                remove_tree(&path).map_err(|source| RiggerError::Remove {
                    path: path.clone(),
                    source,
                })?;
            }
            result.removed.push(path);
        }

        Ok(result)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}
