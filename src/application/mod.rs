//! Application Layer
//!
//! Use cases that orchestrate the tasks Rigger exposes.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CleanUseCase` - Removes build output
//! - `ShrinkwrapUseCase` - Regenerates and sanitizes the lock artifact
//! - `TestUseCase` - Runs test suites, gated on the dependency process
//! - `fix_crlf` - Strips carriage returns

pub mod clean;
mod fix_crlf;
pub mod shrinkwrap;
pub mod test_run;

pub use clean::{CleanOptions, CleanResult, CleanUseCase};
pub use fix_crlf::fix_crlf;
pub use shrinkwrap::{
    format_lockfile, sanitize_lockfile, ShrinkwrapOptions, ShrinkwrapResult, ShrinkwrapUseCase,
};
pub use test_run::{select_suites, TestUseCase};
