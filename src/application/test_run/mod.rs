//! Test Use Case
//!
//! Runs a batch of configured suites, bringing the dependency process up
//! around the batch when any selected suite needs it.

mod use_case;

pub use use_case::{select_suites, TestUseCase};
