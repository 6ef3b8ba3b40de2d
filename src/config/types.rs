//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SpawnSpec;
use crate::error::RiggerResult;

use super::loader::{self, ConfigWarning};

/// `[shrinkwrap]` - where the lock artifact and installed tree live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkwrapConfig {
    #[serde(default = "default_shrinkwrap_file")]
    pub file: PathBuf,

    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,

    /// Include development dependencies
    #[serde(default)]
    pub dev: bool,
}

impl Default for ShrinkwrapConfig {
    fn default() -> Self {
        Self {
            file: default_shrinkwrap_file(),
            modules_dir: default_modules_dir(),
            dev: false,
        }
    }
}

fn default_shrinkwrap_file() -> PathBuf {
    PathBuf::from("npm-shrinkwrap.json")
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("node_modules")
}

/// `[clean]` - paths removed by the clean task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanConfig {
    #[serde(default = "default_clean_paths")]
    pub paths: Vec<PathBuf>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            paths: default_clean_paths(),
        }
    }
}

fn default_clean_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("./build"), PathBuf::from(".sonar")]
}

/// `[suites.<name>]` - one test suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Run this suite with the dependency process up
    #[serde(default)]
    pub needs_dependency: bool,
}

impl SuiteConfig {
    /// Program and arguments joined for display
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `[notify]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// `[watch]` - what the watch task observes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Files and directories watched recursively, relative to the project root
    #[serde(default = "default_watch_paths")]
    pub paths: Vec<PathBuf>,

    /// Quiet period before a burst of changes triggers a rerun
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: default_watch_paths(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_watch_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("lib"), PathBuf::from("src"), PathBuf::from("test")]
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Absent means the test task runs without a dependency process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_process: Option<SpawnSpec>,

    #[serde(default)]
    pub shrinkwrap: ShrinkwrapConfig,

    #[serde(default)]
    pub clean: CleanConfig,

    #[serde(default)]
    pub suites: BTreeMap<String, SuiteConfig>,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RiggerResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> RiggerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults; env overrides applied
    pub fn load_or_default(project_root: &Path) -> RiggerResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (RIGGER_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Whether any of `names` runs against the dependency process
    pub fn needs_dependency<'a>(&self, mut names: impl Iterator<Item = &'a str>) -> bool {
        names.any(|name| {
            self.suites
                .get(name)
                .is_some_and(|suite| suite.needs_dependency)
        })
    }
}
