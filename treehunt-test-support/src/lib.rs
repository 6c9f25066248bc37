//! Shared test utilities used across treehunt crates.

pub mod fixtures;
pub mod proptest_profile;
pub mod tracing;
