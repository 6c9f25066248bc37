//! Text and JSON rendering of benchmark summaries.

use std::io::{self, Write};
use std::time::Duration;

use serde::Serialize;
use treehunt_core::{BenchmarkReport, HunterReport, ShotTiming};

use super::commands::{ExecutionSummary, OutputFormat};

#[derive(Serialize)]
struct SummaryView<'a> {
    seed: Option<u64>,
    benchmarks: Vec<BenchmarkView<'a>>,
}

#[derive(Serialize)]
struct BenchmarkView<'a> {
    trees: usize,
    instances: usize,
    trials: usize,
    skipped_instances: usize,
    hunters: Vec<HunterView<'a>>,
}

#[derive(Serialize)]
struct HunterView<'a> {
    name: &'a str,
    samples: usize,
    captures: usize,
    min: Option<u32>,
    max: Option<u32>,
    mean: Option<f64>,
    std_dev: f64,
    success_ratio: f64,
    shot_time_ns: Option<TimingView>,
    outcomes: Vec<i64>,
}

#[derive(Serialize)]
struct TimingView {
    mean: u128,
    min: u128,
    max: u128,
}

impl<'a> From<&'a BenchmarkReport> for BenchmarkView<'a> {
    fn from(report: &'a BenchmarkReport) -> Self {
        Self {
            trees: report.trees,
            instances: report.instances,
            trials: report.trials,
            skipped_instances: report.skipped_instances,
            hunters: report.hunters.iter().map(HunterView::from).collect(),
        }
    }
}

impl<'a> From<&'a HunterReport> for HunterView<'a> {
    fn from(report: &'a HunterReport) -> Self {
        let stats = &report.statistics;
        Self {
            name: report.name,
            samples: stats.samples,
            captures: stats.captures,
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            std_dev: stats.std_dev,
            success_ratio: stats.success_ratio,
            shot_time_ns: stats.timing.map(|timing| TimingView {
                mean: timing.mean.as_nanos(),
                min: timing.min.as_nanos(),
                max: timing.max.as_nanos(),
            }),
            outcomes: report.raw_outcomes(),
        }
    }
}

/// Renders `summary` to `writer` in the format it requests.
///
/// # Errors
/// Returns [`io::Error`] if writing or serialisation fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use treehunt_cli::cli::{ExecutionSummary, OutputFormat, render_summary};
/// # use treehunt_core::{BenchmarkReport, HunterReport, ResultStatistics, TrialOutcome};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let outcomes = vec![TrialOutcome::Captured { shots: 2 }, TrialOutcome::GaveUp];
/// let summary = ExecutionSummary {
///     seed: Some(7),
///     format: OutputFormat::Text,
///     reports: vec![BenchmarkReport {
///         trees: 4,
///         instances: 1,
///         trials: 2,
///         skipped_instances: 0,
///         hunters: vec![HunterReport {
///             name: "demo",
///             statistics: ResultStatistics::from_outcomes(&outcomes),
///             outcomes,
///         }],
///     }],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("demo: samples 2, captures 1"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary.format {
        OutputFormat::Text => render_text(summary, &mut writer),
        OutputFormat::Json => {
            let view = SummaryView {
                seed: summary.seed,
                benchmarks: summary.reports.iter().map(BenchmarkView::from).collect(),
            };
            serde_json::to_writer_pretty(&mut writer, &view)?;
            writeln!(writer)
        }
    }
}

fn render_text(summary: &ExecutionSummary, writer: &mut impl Write) -> io::Result<()> {
    if let Some(seed) = summary.seed {
        writeln!(writer, "seed: {seed}")?;
    }
    for report in &summary.reports {
        writeln!(
            writer,
            "trees: {}, instances: {}, trials: {}, skipped: {}",
            report.trees, report.instances, report.trials, report.skipped_instances
        )?;
        for hunter in &report.hunters {
            render_hunter(hunter, writer)?;
        }
    }
    Ok(())
}

#[expect(clippy::float_arithmetic, reason = "success ratio is shown as a percentage")]
fn render_hunter(hunter: &HunterReport, writer: &mut impl Write) -> io::Result<()> {
    let stats = &hunter.statistics;
    write!(
        writer,
        "  {}: samples {}, captures {}, min {}, max {}, mean {}, std {:.3}, success {:.2}%",
        hunter.name,
        stats.samples,
        stats.captures,
        optional(stats.min),
        optional(stats.max),
        stats
            .mean
            .map_or_else(|| "-".to_owned(), |mean| format!("{mean:.3}")),
        stats.std_dev,
        stats.success_ratio * 100.0,
    )?;
    if let Some(timing) = stats.timing {
        write!(writer, ", {}", shot_time(timing))?;
    }
    writeln!(writer)
}

fn optional(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_owned(), |bound| bound.to_string())
}

fn shot_time(timing: ShotTiming) -> String {
    format!(
        "shot time mean {} min {} max {}",
        micros(timing.mean),
        micros(timing.min),
        micros(timing.max)
    )
}

#[expect(clippy::float_arithmetic, reason = "durations are shown in microseconds")]
fn micros(duration: Duration) -> String {
    format!("{:.3}us", duration.as_secs_f64() * 1e6)
}
