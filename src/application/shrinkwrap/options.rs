//! Shrinkwrap options

use std::path::PathBuf;

use crate::config::ShrinkwrapConfig;

/// Options for the shrinkwrap command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkwrapOptions {
    /// Delete the installed dependency tree before reinstalling
    pub remove_existing: bool,
    /// Skip the reinstall; only rewrite the existing artifact
    pub only_format: bool,
    /// Include development dependencies
    pub dev: bool,
    /// Lock artifact, relative to the project root unless absolute
    pub file: PathBuf,
    /// Installed dependency tree, relative to the project root unless absolute
    pub modules_dir: PathBuf,
}

impl Default for ShrinkwrapOptions {
    fn default() -> Self {
        Self::from(&ShrinkwrapConfig::default())
    }
}

impl From<&ShrinkwrapConfig> for ShrinkwrapOptions {
    fn from(config: &ShrinkwrapConfig) -> Self {
        Self {
            remove_existing: true,
            only_format: false,
            dev: config.dev,
            file: config.file.clone(),
            modules_dir: config.modules_dir.clone(),
        }
    }
}

impl ShrinkwrapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the installed tree (`--existing`)
    pub fn keep_existing(mut self, keep: bool) -> Self {
        self.remove_existing = !keep;
        self
    }

    pub fn only_format(mut self, only_format: bool) -> Self {
        self.only_format = only_format;
        self
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self
    }
}
