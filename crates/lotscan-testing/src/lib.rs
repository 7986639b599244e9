//! Internal testing utilities for the lotscan workspace.
//!
//! Provides label builders, store-document seeding, and a CLI process
//! harness with an isolated data directory per test.

pub mod fixtures;
pub mod process;

pub use fixtures::LabelBuilder;
pub use process::TestWorkspace;
