//! Dependency process orchestration
//!
//! Starts one auxiliary process (a database, an emulator, a fixture server),
//! waits for it to announce readiness over a control side-channel, runs the
//! gated work, and always tells the process to close afterwards.
//!
//! ## Protocol
//!
//! The child gets its stdio inherited from the parent plus a Unix socket at
//! descriptor 3 (`RIGGER_CONTROL_FD=3`). Messages are newline-delimited JSON
//! values:
//!
//! - `"started"` child → parent: ready to be depended on
//! - `"close"` parent → child: shut down
//!
//! Anything else is ignored by the orchestrator.
//!
//! ## Teardown
//!
//! The orchestrator returns as soon as the work settles and `"close"` has been
//! sent; it does not wait for the child to exit. Late exits only produce
//! notifications. This is fine for test harnesses but means the child may
//! still be shutting down when the caller continues.

mod control;
mod dependency;
mod error;
mod spawn;

pub use control::{ChildControl, ControlMessage, ControlWriter, CONTROL_FD, CONTROL_FD_ENV};
pub use dependency::{run_with_dependency, DependencyProcess, DependencyState, RunningDependency};
pub use error::ProcessError;
