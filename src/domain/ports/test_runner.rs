//! TestRunner port - the unit of work a dependency process gates

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestRunnerError {
    #[error("failed to start test runner `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("test runner `{command}` exited with {status}")]
    Failed { command: String, status: String },
}

/// Runs one named test suite to completion
pub trait TestRunner {
    fn run(&self, suite: &str) -> Result<(), TestRunnerError>;
}
