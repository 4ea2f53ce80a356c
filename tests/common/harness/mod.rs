//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments backed by an in-process fake
//! note store, and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod server;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::NotecardCommand;
#[allow(unused_imports)]
pub use env::{TEST_USER, TestEnv};
#[allow(unused_imports)]
pub use server::{FakeNoteStore, StoredNote};
