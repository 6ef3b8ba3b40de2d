//! Shrinkwrap Use Case
//!
//! `remove tree → remove artifact → install → shrinkwrap → sanitize → write`.
//! With `only_format` only the last two steps run.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::domain::entities::{sanitize, LockEntry};
use crate::domain::ports::PackageManager;
use crate::error::{RiggerError, RiggerResult};
use crate::infrastructure::fs::{remove_tree, LocalFs};

use super::options::ShrinkwrapOptions;

/// Outcome of a shrinkwrap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkwrapResult {
    /// Artifact that was written
    pub file: PathBuf,
    /// Entries in the written tree, root included
    pub entries: usize,
    /// Whether the package manager ran
    pub reinstalled: bool,
}

pub struct ShrinkwrapUseCase<PM: PackageManager> {
    package_manager: PM,
    fs: LocalFs,
    project_root: PathBuf,
}

impl<PM: PackageManager> ShrinkwrapUseCase<PM> {
    pub fn new(package_manager: PM, project_root: impl Into<PathBuf>) -> Self {
        Self {
            package_manager,
            fs: LocalFs::new(),
            project_root: project_root.into(),
        }
    }

    pub fn execute(&self, options: &ShrinkwrapOptions) -> RiggerResult<ShrinkwrapResult> {
        let file = self.resolve(&options.file);

        if !options.only_format {
            if options.remove_existing {
                let modules = self.resolve(&options.modules_dir);
                info!(path = %modules.display(), "removing installed dependencies");
                self.remove(&modules)?;
            }
            info!(path = %file.display(), "removing lock artifact");
            self.remove(&file)?;

            info!("installing");
            self.package_manager.install()?;
            info!(dev = options.dev, "shrinkwrapping");
            self.package_manager.shrinkwrap(options.dev)?;
        }

        let content = self.fs.read(&file)?;
        let tree = parse_lockfile(&file, &content)?;
        let clean = sanitize(&tree);
        let formatted = format_lockfile(&clean).map_err(|e| RiggerError::InvalidLockfile {
            file: file.clone(),
            message: e.to_string(),
        })?;
        self.fs.write_atomic(&file, &formatted)?;

        Ok(ShrinkwrapResult {
            entries: clean.entry_count(),
            reinstalled: !options.only_format,
            file,
        })
    }

    fn remove(&self, path: &Path) -> RiggerResult<()> {
        remove_tree(path).map_err(|source| RiggerError::Remove {
            path: path.to_path_buf(),
            source,
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

fn parse_lockfile(file: &Path, content: &str) -> RiggerResult<LockEntry> {
    serde_json::from_str(content).map_err(|e| RiggerError::InvalidLockfile {
        file: file.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize a lock tree with sorted keys and two-space indentation.
pub fn format_lockfile(entry: &LockEntry) -> Result<String, serde_json::Error> {
    let value = sort_keys(serde_json::to_value(entry)?);
    serde_json::to_string_pretty(&value)
}

/// Rebuild every object with its keys in lexicographic order, flattened
/// extras included.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Sanitize and reformat lock artifact text in one step.
pub fn sanitize_lockfile(content: &str) -> Result<String, serde_json::Error> {
    let tree: LockEntry = serde_json::from_str(content)?;
    format_lockfile(&sanitize(&tree))
}
