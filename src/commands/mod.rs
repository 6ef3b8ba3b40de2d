//! Command handlers
//!
//! Each handler turns parsed CLI arguments into a use case call.

mod build;
mod clean;
mod fix_crlf;
mod shrinkwrap;
mod watch;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use fix_crlf::cmd_fix_crlf;
pub use shrinkwrap::{cmd_shrinkwrap, ShrinkwrapArgs};
pub use test::cmd_test;
pub use watch::cmd_watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::warn;

use rigger::config::Config;
use rigger::domain::ports::Notifier;
use rigger::infrastructure::{SilentNotifier, TracingNotifier};

use crate::cli::Cli;

/// Everything a command needs besides its own arguments
pub struct Context {
    pub project_root: PathBuf,
    pub config: Config,
    pub notifier: Arc<dyn Notifier>,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let project_root = match &cli.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("cannot determine current directory")?,
        };

        let (config, warnings) = match &cli.config {
            Some(path) => {
                let (config, warnings) = Config::load_with_warnings(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                (config.with_env_overrides(), warnings)
            }
            None => Config::load_or_default(&project_root)?,
        };
        for warning in &warnings {
            warn!("{warning}");
        }

        let notifier: Arc<dyn Notifier> = if cli.no_notify || !config.notify.enabled {
            Arc::new(SilentNotifier)
        } else {
            Arc::new(TracingNotifier)
        };

        Ok(Self {
            project_root,
            config,
            notifier,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}
