//! Test Use Case

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::config::SuiteConfig;
use crate::domain::ports::{Notifier, TestRunner};
use crate::domain::value_objects::SpawnSpec;
use crate::error::{RiggerError, RiggerResult};
use crate::infrastructure::process::run_with_dependency;

/// Resolve requested suite names against the configured ones.
///
/// No names means every configured suite, in name order.
pub fn select_suites(
    configured: &BTreeMap<String, SuiteConfig>,
    requested: &[String],
) -> RiggerResult<Vec<String>> {
    if requested.is_empty() {
        return Ok(configured.keys().cloned().collect());
    }

    requested
        .iter()
        .map(|name| {
            if configured.contains_key(name) {
                Ok(name.clone())
            } else {
                Err(RiggerError::UnknownSuite { name: name.clone() })
            }
        })
        .collect()
}

pub struct TestUseCase<R: TestRunner> {
    runner: R,
    notifier: Arc<dyn Notifier>,
    dependency: Option<SpawnSpec>,
}

impl<R: TestRunner> TestUseCase<R> {
    pub fn new(runner: R, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            runner,
            notifier,
            dependency: None,
        }
    }

    /// Process to bring up when a batch needs it
    pub fn with_dependency(mut self, spec: Option<SpawnSpec>) -> Self {
        self.dependency = spec;
        self
    }

    /// Run `suites` in order, stopping at the first failure.
    ///
    /// `needs_dependency` gates the whole batch on the dependency process; it
    /// is ignored when no process is configured.
    pub fn execute(&self, suites: &[String], needs_dependency: bool) -> RiggerResult<()> {
        let spec = self.dependency.as_ref().filter(|_| needs_dependency);
        let label = suites.join(", ");

        run_with_dependency(spec, self.notifier.clone(), || self.run_batch(suites, &label))
    }

    fn run_batch(&self, suites: &[String], label: &str) -> RiggerResult<()> {
        for suite in suites {
            info!(suite = %suite, "starting suite");
            if let Err(e) = self.runner.run(suite) {
                self.notifier.notify(
                    "Test error!",
                    &format!("There was an error in the tests for {label}.\n{e}"),
                );
                return Err(RiggerError::TestFailed {
                    suite: suite.clone(),
                    message: e.to_string(),
                });
            }
        }

        self.notifier.notify(
            "Tests complete!",
            &format!("The tests for {label} have finished."),
        );
        Ok(())
    }
}
