//! Test runner implementations

mod command;

pub use command::CommandTestRunner;
