//! Domain Entities
//!
//! - `LockEntry` - One node of a dependency lock tree

mod lock_entry;

pub use lock_entry::{is_vcs_reference, retained_fields, sanitize, LockEntry, RetainedFields};
