//! Shrinkwrap Use Case
//!
//! Regenerates the dependency lock artifact from a clean install and rewrites
//! it into a stable, machine-independent form.

mod options;
mod use_case;

pub use options::ShrinkwrapOptions;
pub use use_case::{format_lockfile, sanitize_lockfile, ShrinkwrapResult, ShrinkwrapUseCase};
