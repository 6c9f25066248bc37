use std::ops::RangeInclusive;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use treehunt_core::{
    BenchmarkBuilder, BenchmarkReport, DEFAULT_MAX_TURNS, ExactPlanner, HuntError, Hunter,
    ProbabilisticTracker, RandomSource, entropy_rng, seeded_rng,
};

const DEFAULT_MIN_TREES: usize = 6;
const DEFAULT_MAX_TREES: usize = 21;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "treehunt",
    about = "Benchmark hunters chasing a monkey through random forests."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Benchmark a single forest size.
    Run(RunCommand),
    /// Benchmark every forest size in a range.
    Sweep(SweepCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Trees per forest.
    #[arg(long)]
    pub trees: usize,

    /// Forests to generate (defaults to trees squared).
    #[arg(long)]
    pub instances: Option<usize>,

    /// Trials per forest (defaults to the tree count).
    #[arg(long)]
    pub trials: Option<usize>,

    /// Options shared with `sweep`.
    #[command(flatten)]
    pub options: HuntOptions,
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepCommand {
    /// Smallest forest size.
    #[arg(long, default_value_t = DEFAULT_MIN_TREES)]
    pub min_trees: usize,

    /// Largest forest size, inclusive.
    #[arg(long, default_value_t = DEFAULT_MAX_TREES)]
    pub max_trees: usize,

    /// Options shared with `run`.
    #[command(flatten)]
    pub options: HuntOptions,
}

/// Options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct HuntOptions {
    /// Seed for a reproducible run; omitted means operating-system entropy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Turn cap per trial.
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    pub max_turns: u32,

    /// Skip forests that cannot be generated instead of failing.
    #[arg(long)]
    pub skip_failed_instances: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary lines.
    Text,
    /// One JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The sweep range is empty.
    #[error("--min-trees ({min}) must not exceed --max-trees ({max})")]
    EmptyRange {
        /// Requested lower bound.
        min: usize,
        /// Requested upper bound.
        max: usize,
    },
    /// The benchmark itself failed.
    #[error(transparent)]
    Core(#[from] HuntError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Seed the run was started from, if any.
    pub seed: Option<u64>,
    /// Requested output format.
    pub format: OutputFormat,
    /// One report per benchmarked forest size.
    pub reports: Vec<BenchmarkReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid or a benchmark
/// fails.
///
/// # Examples
/// ```
/// use treehunt_cli::cli::{Cli, Command, HuntOptions, OutputFormat, RunCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         trees: 5,
///         instances: Some(2),
///         trials: Some(2),
///         options: HuntOptions {
///             seed: Some(1),
///             max_turns: 1_000,
///             skip_failed_instances: false,
///             format: OutputFormat::Text,
///         },
///     }),
/// };
/// let summary = run_cli(cli).expect("run must succeed");
/// assert_eq!(summary.reports.len(), 1);
/// assert_eq!(summary.reports[0].trees, 5);
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_command(run)
        }
        Command::Sweep(sweep) => {
            span.record("command", field::display("sweep"));
            sweep_command(sweep)
        }
    }
}

#[instrument(name = "cli.execute", err, skip(command), fields(trees = command.trees))]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        trees,
        instances,
        trials,
        options,
    } = command;
    let mut rng = make_rng(options.seed);
    let report = benchmark_size(
        trees,
        instances.unwrap_or(trees * trees),
        trials.unwrap_or(trees),
        &options,
        rng.as_mut(),
    )?;
    Ok(ExecutionSummary {
        seed: options.seed,
        format: options.format,
        reports: vec![report],
    })
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(command),
    fields(min_trees = command.min_trees, max_trees = command.max_trees),
)]
pub(super) fn sweep_command(command: SweepCommand) -> Result<ExecutionSummary, CliError> {
    let SweepCommand {
        min_trees,
        max_trees,
        options,
    } = command;
    let sizes = sweep_sizes(min_trees, max_trees)?;
    let mut rng = make_rng(options.seed);
    let reports = sizes
        .map(|trees| benchmark_size(trees, trees * trees, trees, &options, rng.as_mut()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ExecutionSummary {
        seed: options.seed,
        format: options.format,
        reports,
    })
}

pub(super) const fn sweep_sizes(min: usize, max: usize) -> Result<RangeInclusive<usize>, CliError> {
    if min > max {
        return Err(CliError::EmptyRange { min, max });
    }
    Ok(min..=max)
}

fn make_rng(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(value) => Box::new(seeded_rng(value)),
        None => Box::new(entropy_rng()),
    }
}

fn benchmark_size(
    trees: usize,
    instances: usize,
    trials: usize,
    options: &HuntOptions,
    rng: &mut dyn RandomSource,
) -> Result<BenchmarkReport, CliError> {
    let benchmark = BenchmarkBuilder::new()
        .with_trees(trees)
        .with_instances(instances)
        .with_trials(trials)
        .with_max_turns(options.max_turns)
        .with_skip_failed_instances(options.skip_failed_instances)
        .build()?;

    let mut tracker = ProbabilisticTracker::new();
    let mut planner = ExactPlanner::new();
    let mut hunters: [&mut dyn Hunter; 2] = [&mut tracker, &mut planner];
    let report = benchmark.run(&mut hunters, rng)?;
    info!(
        trees,
        instances,
        trials,
        skipped = report.skipped_instances,
        "benchmark completed"
    );
    Ok(report)
}
