//! File System Implementations
//!
//! - `remove_tree` - recursive, race-tolerant removal
//! - `LocalFs` - atomic writes for generated artifacts

mod local;
mod remove_tree;

pub use local::LocalFs;
pub use remove_tree::{remove_tree, TreeRemover};
