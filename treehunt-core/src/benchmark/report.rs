//! Results of a benchmark run.

use crate::statistics::{ResultStatistics, TrialOutcome};

/// Outcomes and statistics for one hunter.
#[derive(Clone, Debug, PartialEq)]
pub struct HunterReport {
    /// The hunter's [`crate::Hunter::name`].
    pub name: &'static str,
    /// One outcome per trial, in the order the trials were played.
    pub outcomes: Vec<TrialOutcome>,
    /// Summary of `outcomes`, with per-shot timing.
    pub statistics: ResultStatistics,
}

impl HunterReport {
    /// Outcomes in their integer form, `-1` marking a give-up.
    #[must_use]
    pub fn raw_outcomes(&self) -> Vec<i64> {
        self.outcomes.iter().copied().map(TrialOutcome::as_raw).collect()
    }
}

/// Everything a [`crate::Benchmark`] run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkReport {
    /// Trees per generated forest.
    pub trees: usize,
    /// Instances requested.
    pub instances: usize,
    /// Trials per instance.
    pub trials: usize,
    /// Instances skipped after a generation failure.
    pub skipped_instances: usize,
    /// One report per hunter, in the order the hunters were supplied.
    pub hunters: Vec<HunterReport>,
}

impl BenchmarkReport {
    /// Looks a hunter's report up by name.
    #[must_use]
    pub fn hunter(&self, name: &str) -> Option<&HunterReport> {
        self.hunters.iter().find(|report| report.name == name)
    }

    /// Instances that were actually played.
    #[must_use]
    pub const fn played_instances(&self) -> usize {
        self.instances - self.skipped_instances
    }
}
