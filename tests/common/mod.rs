//! Common test utilities for Rigger CLI tests.
//!
//! Provides `TestEnv`: an isolated project directory plus a private home so
//! no user config leaks into a run.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a Rigger CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("create project dir"),
            home_dir: TempDir::new().expect("create home dir"),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write_project_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write project file");
        path
    }

    pub fn read_project_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative)).expect("read project file")
    }

    pub fn write_config(&self, toml: &str) {
        self.write_project_file("rigger.toml", toml);
    }

    /// Run rigger from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        run_in(self.project_root.path(), self.home_dir.path(), args, env_vars)
    }
}

fn run_in(cwd: &Path, home: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rigger"));
    cmd.current_dir(cwd)
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("RUST_LOG", "rigger=info")
        .env_remove("RIGGER_NO_NOTIFY")
        .env_remove("RIGGER_READY_TIMEOUT_SECS")
        .env_remove("RIGGER_SHRINKWRAP_FILE");
    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("run rigger binary");
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// npm lock artifact as `npm shrinkwrap` writes it
pub const RAW_SHRINKWRAP: &str = r#"{
  "name": "app",
  "version": "1.0.0",
  "dependencies": {
    "lodash": {
      "version": "4.17.21",
      "from": "https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz",
      "resolved": "https://registry.npmjs.org/lodash/-/lodash-4.17.21.tgz"
    },
    "private-lib": {
      "version": "0.3.0",
      "from": "org/private-lib#main",
      "resolved": "git+ssh://git@github.com/org/private-lib.git#0a1b2c3"
    }
  }
}
"#;
