//! Clean Use Case
//!
//! Removes build output and scanner caches from the project root.

mod options;
mod result;
mod use_case;

pub use options::CleanOptions;
pub use result::CleanResult;
pub use use_case::CleanUseCase;
