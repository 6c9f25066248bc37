//! Command-line interface for the treehunt benchmarks.
//!
//! `run` benchmarks one forest size and `sweep` walks a range of sizes with
//! the classic schedule of `n²` forests and `n` trials each. Reports are
//! rendered as text or JSON.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, HuntOptions, OutputFormat, RunCommand, SweepCommand,
    run_cli,
};
pub use render::render_summary;
