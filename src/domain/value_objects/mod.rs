//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod platform;
mod spawn_spec;

pub use platform::Platform;
pub use spawn_spec::SpawnSpec;
