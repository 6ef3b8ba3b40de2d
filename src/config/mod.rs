//! Configuration module for Rigger
//!
//! Hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (RIGGER_*)
//! 3. Project config (rigger.toml)
//! 4. User config (~/.config/rigger/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{CleanConfig, Config, NotifyConfig, ShrinkwrapConfig, SuiteConfig, WatchConfig};
