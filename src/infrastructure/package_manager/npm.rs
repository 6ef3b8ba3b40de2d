//! npm adapter
//!
//! Runs `npm install --silent` and `npm shrinkwrap [--dev]` in the project
//! root with inherited stdio.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::{PackageManager, PackageManagerError};

/// Default executable name for the running platform
pub fn default_npm_command() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Package manager backed by the `npm` CLI
#[derive(Debug, Clone)]
pub struct NpmPackageManager {
    program: String,
    base_args: Vec<String>,
    project_root: PathBuf,
}

impl NpmPackageManager {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_program(default_npm_command(), project_root)
    }

    /// Use a specific executable (alternate managers, tests)
    pub fn with_program(program: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            project_root: project_root.into(),
        }
    }

    /// Arguments placed before every subcommand (`sh wrapper.sh install ...`)
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn run(&self, args: &[&str]) -> Result<(), PackageManagerError> {
        let command = std::iter::once(self.program.as_str())
            .chain(self.base_args.iter().map(String::as_str))
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(%command, cwd = %self.project_root.display(), "running package manager");

        let status = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .current_dir(&self.project_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| PackageManagerError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            // Killed by a signal: no code, report a generic failure.
            Err(PackageManagerError::Exit {
                command,
                code: status.code().unwrap_or(1),
            })
        }
    }
}

impl PackageManager for NpmPackageManager {
    fn install(&self) -> Result<(), PackageManagerError> {
        self.run(&["install", "--silent"])
    }

    fn shrinkwrap(&self, dev: bool) -> Result<(), PackageManagerError> {
        if dev {
            self.run(&["shrinkwrap", "--dev"])
        } else {
            self.run(&["shrinkwrap"])
        }
    }
}
