//! Package manager adapters

mod npm;

pub use npm::{default_npm_command, NpmPackageManager};
