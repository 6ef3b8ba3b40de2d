//! Watch events and options

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::WatchConfig;

/// What to watch and how long to let a burst of changes settle
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Relative watch paths are resolved against this
    pub project_root: PathBuf,
    pub paths: Vec<PathBuf>,
    pub debounce: Duration,
}

impl WatchOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::from_config(project_root, &WatchConfig::default())
    }

    pub fn from_config(project_root: impl Into<PathBuf>, config: &WatchConfig) -> Self {
        Self {
            project_root: project_root.into(),
            paths: config.paths.clone(),
            debounce: Duration::from_millis(config.debounce_ms),
        }
    }

    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Watch paths joined onto the project root
    pub fn resolved_paths(&self) -> Vec<PathBuf> {
        self.paths
            .iter()
            .map(|path| resolve(&self.project_root, path))
            .collect()
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Progress of a watch session, in the order it happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    WatchStarted { paths: Vec<PathBuf> },
    FileChanged { path: PathBuf },
    RunStarted,
    RunComplete,
    RunFailed { message: String },
    Shutdown,
}

/// Pending changes since the last run
pub(crate) struct WatcherState {
    debounce: Duration,
    pending_changes: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    pub(crate) fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending_changes: BTreeSet::new(),
            last_change: None,
        }
    }

    pub(crate) fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// True once changes are pending and none arrived for the debounce period
    pub(crate) fn should_run(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.debounce,
            None => false,
        }
    }

    /// Drain pending changes in path order
    pub(crate) fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending_changes)
            .into_iter()
            .collect()
    }
}
