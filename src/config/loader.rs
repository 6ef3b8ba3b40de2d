//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{RiggerError, RiggerResult};

use super::types::Config;

/// Project configuration file, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "rigger.toml";

/// Non-fatal configuration warning (an unknown key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the ignored key, e.g. `shrinkwrap.deve`
    pub path: String,
    pub file: PathBuf,
    /// 1-indexed line the key first appears on
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key `{}` in {}", self.path, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean `{suggestion}`?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> RiggerResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut ignored: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        ignored.push(p.to_string());
    })
    .map_err(|e| RiggerError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = ignored
        .into_iter()
        .map(|dotted| {
            let key = dotted.rsplit('.').next().unwrap_or(&dotted).to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                path: dotted,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `rigger.toml` from the project root, else the user config, else
/// defaults. Environment overrides are applied on top.
///
/// A config file that exists but does not parse is an error.
pub fn load_or_default(project_root: &Path) -> RiggerResult<(Config, Vec<ConfigWarning>)> {
    let candidates = std::iter::once(project_root.join(PROJECT_CONFIG_FILE))
        .chain(user_config_path());

    for candidate in candidates {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok((with_env_overrides(config, env_lookup), warnings));
        }
    }

    Ok((with_env_overrides(Config::default(), env_lookup), Vec::new()))
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Apply `RIGGER_*` overrides read through `lookup`
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // RIGGER_NO_NOTIFY
    if let Some(val) = lookup("RIGGER_NO_NOTIFY") {
        if is_truthy(&val) {
            config.notify.enabled = false;
        }
    }

    // RIGGER_READY_TIMEOUT_SECS
    if let Some(val) = lookup("RIGGER_READY_TIMEOUT_SECS") {
        match val.trim().parse::<u64>() {
            Ok(secs) => {
                if let Some(spec) = config.dependency_process.as_mut() {
                    spec.ready_timeout_secs = (secs > 0).then_some(secs);
                }
            }
            Err(_) => warn!(value = %val, "ignoring invalid RIGGER_READY_TIMEOUT_SECS"),
        }
    }

    // RIGGER_SHRINKWRAP_FILE
    if let Some(val) = lookup("RIGGER_SHRINKWRAP_FILE") {
        if !val.trim().is_empty() {
            config.shrinkwrap.file = PathBuf::from(val);
        }
    }

    config
}

fn is_truthy(val: &str) -> bool {
    !matches!(val.trim().to_lowercase().as_str(), "" | "0" | "false" | "no")
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rigger").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "dependency_process",
        "name",
        "command",
        "args",
        "working_dir",
        "ready_timeout_secs",
        "shrinkwrap",
        "file",
        "modules_dir",
        "dev",
        "clean",
        "paths",
        "suites",
        "needs_dependency",
        "notify",
        "enabled",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, edit_distance(unknown, candidate)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(candidate, _)| candidate.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diag
            } else {
                1 + diag.min(above).min(row[j])
            };
            diag = above;
        }
    }

    row[b.len()]
}
