//! Test suites as external commands
//!
//! Each `[suites.<name>]` table names a program and its arguments. A suite
//! passes when the program exits successfully.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::domain::ports::{TestRunner, TestRunnerError};

#[derive(Debug, Clone)]
pub struct CommandTestRunner {
    suites: BTreeMap<String, SuiteConfig>,
    working_dir: PathBuf,
}

impl CommandTestRunner {
    pub fn new(suites: BTreeMap<String, SuiteConfig>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            suites,
            working_dir: working_dir.into(),
        }
    }

    pub fn suite(&self, name: &str) -> Option<&SuiteConfig> {
        self.suites.get(name)
    }

    /// Configured suite names, in name order
    pub fn suite_names(&self) -> impl Iterator<Item = &str> {
        self.suites.keys().map(String::as_str)
    }
}

impl TestRunner for CommandTestRunner {
    fn run(&self, suite: &str) -> Result<(), TestRunnerError> {
        let config = self.suites.get(suite).ok_or_else(|| TestRunnerError::Failed {
            command: suite.to_string(),
            status: "suite is not configured".to_string(),
        })?;
        let command = config.command_line();

        info!(suite, %command, "running test suite");
        let status = Command::new(&config.command)
            .args(&config.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| TestRunnerError::Spawn {
                command: command.clone(),
                source,
            })?;
        debug!(suite, %status, "test suite finished");

        if status.success() {
            Ok(())
        } else {
            Err(TestRunnerError::Failed {
                command,
                status: status.to_string(),
            })
        }
    }
}
