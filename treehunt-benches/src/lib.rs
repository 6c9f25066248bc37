//! Benchmark support crate for treehunt.
//!
//! Provides seeded forests, benchmark schedules, and parameter types used by
//! the Criterion benchmarks for forest generation and the two hunters.

pub mod error;
pub mod params;
pub mod setup;
