//! Benchmark driver pitting hunters against a randomly jumping target.
//!
//! A [`Benchmark`] generates `instances` forests. On each forest it binds
//! every hunter and plays `trials` trials. A trial places the target at a
//! uniformly random tree and restarts the hunters, then alternates turns:
//! every hunter still in the game shoots once, and the target jumps to a
//! random neighbour. A hunter leaves the trial when it hits the target or
//! gives up.

mod instance;
mod report;

use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::{
    GenerationPolicy,
    error::{HuntError, Result},
    hunter::{Hunter, Shot},
    random::RandomSource,
    statistics::{ResultStatistics, ShotTimer, TrialOutcome},
};

pub use self::{
    instance::HuntInstance,
    report::{BenchmarkReport, HunterReport},
};

/// Default cap on turns per trial.
pub const DEFAULT_MAX_TURNS: u32 = 10_000;

/// Configures and constructs [`Benchmark`] instances.
///
/// # Examples
/// ```
/// use treehunt_core::BenchmarkBuilder;
///
/// let benchmark = BenchmarkBuilder::new()
///     .with_trees(8)
///     .with_instances(4)
///     .with_trials(2)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(benchmark.trees(), 8);
/// assert_eq!(benchmark.max_turns(), 10_000);
/// ```
#[derive(Clone, Debug)]
pub struct BenchmarkBuilder {
    trees: usize,
    instances: usize,
    trials: usize,
    max_turns: u32,
    policy: GenerationPolicy,
    skip_failed_instances: bool,
}

impl Default for BenchmarkBuilder {
    fn default() -> Self {
        Self {
            trees: 6,
            instances: 36,
            trials: 6,
            max_turns: DEFAULT_MAX_TURNS,
            policy: GenerationPolicy::default(),
            skip_failed_instances: false,
        }
    }
}

impl BenchmarkBuilder {
    /// Creates a builder for 6 trees, 36 instances and 6 trials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of trees per forest.
    #[must_use]
    pub const fn with_trees(mut self, trees: usize) -> Self {
        self.trees = trees;
        self
    }

    /// Sets the number of forests to generate.
    #[must_use]
    pub const fn with_instances(mut self, instances: usize) -> Self {
        self.instances = instances;
        self
    }

    /// Sets the number of trials per forest.
    #[must_use]
    pub const fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Caps turns per trial; hunters still hunting at the cap give up.
    #[must_use]
    pub const fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    /// Overrides the forest generation retry budgets.
    #[must_use]
    pub const fn with_generation_policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skips instances whose forest cannot be generated instead of aborting.
    #[must_use]
    pub const fn with_skip_failed_instances(mut self, skip: bool) -> Self {
        self.skip_failed_instances = skip;
        self
    }

    /// Validates the configuration and constructs a [`Benchmark`].
    ///
    /// # Errors
    /// Returns [`HuntError::TooFewTrees`] when fewer than two trees are
    /// requested and [`HuntError::InvalidConfig`] when instances, trials or
    /// the turn cap are zero.
    ///
    /// # Examples
    /// ```
    /// use treehunt_core::{BenchmarkBuilder, HuntError};
    ///
    /// let error = BenchmarkBuilder::new().with_trials(0).build().unwrap_err();
    /// assert!(matches!(error, HuntError::InvalidConfig { .. }));
    /// ```
    pub fn build(self) -> Result<Benchmark> {
        if self.trees < 2 {
            return Err(HuntError::TooFewTrees { got: self.trees });
        }
        for (name, is_zero) in [
            ("instances", self.instances == 0),
            ("trials", self.trials == 0),
            ("max_turns", self.max_turns == 0),
        ] {
            if is_zero {
                return Err(HuntError::InvalidConfig {
                    reason: format!("{name} must be at least 1"),
                });
            }
        }

        Ok(Benchmark {
            trees: self.trees,
            instances: self.instances,
            trials: self.trials,
            max_turns: self.max_turns,
            policy: self.policy,
            skip_failed_instances: self.skip_failed_instances,
        })
    }
}

/// Per-hunter accumulator for a run.
struct Tally {
    name: &'static str,
    outcomes: Vec<TrialOutcome>,
    timer: ShotTimer,
}

impl Tally {
    fn into_report(self) -> HunterReport {
        let statistics =
            ResultStatistics::from_outcomes(&self.outcomes).with_timing(self.timer.summary());
        HunterReport {
            name: self.name,
            outcomes: self.outcomes,
            statistics,
        }
    }
}

/// A validated benchmark configuration.
///
/// # Examples
/// ```
/// use treehunt_core::{
///     BenchmarkBuilder, ExactPlanner, Hunter, ProbabilisticTracker, seeded_rng,
/// };
///
/// let benchmark = BenchmarkBuilder::new()
///     .with_trees(6)
///     .with_instances(3)
///     .with_trials(2)
///     .build()
///     .expect("configuration is valid");
/// let mut tracker = ProbabilisticTracker::new();
/// let mut planner = ExactPlanner::new();
/// let mut hunters: [&mut dyn Hunter; 2] = [&mut tracker, &mut planner];
/// let report = benchmark
///     .run(&mut hunters, &mut seeded_rng(5))
///     .expect("benchmark must run");
/// assert_eq!(report.hunters.len(), 2);
/// assert!(report.hunters.iter().all(|hunter| hunter.outcomes.len() == 6));
/// ```
#[derive(Clone, Debug)]
pub struct Benchmark {
    trees: usize,
    instances: usize,
    trials: usize,
    max_turns: u32,
    policy: GenerationPolicy,
    skip_failed_instances: bool,
}

impl Benchmark {
    /// Trees per generated forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn trees(&self) -> usize { self.trees }

    /// Forests generated per run.
    #[must_use]
    #[rustfmt::skip]
    pub const fn instances(&self) -> usize { self.instances }

    /// Trials per forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn trials(&self) -> usize { self.trials }

    /// Turn cap per trial.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_turns(&self) -> u32 { self.max_turns }

    /// Runs every instance and trial against `hunters`.
    ///
    /// All hunters face the same forests and the same target path.
    ///
    /// # Errors
    /// Returns generation failures unless skipping is enabled, and any
    /// precondition error raised by a hunter. Hunters giving up are recorded
    /// as outcomes, not errors.
    #[instrument(
        name = "core.benchmark.run",
        err,
        skip(self, hunters, rng),
        fields(
            trees = self.trees,
            instances = self.instances,
            trials = self.trials,
            hunters = hunters.len(),
        ),
    )]
    pub fn run<R: RandomSource + ?Sized>(
        &self,
        hunters: &mut [&mut dyn Hunter],
        rng: &mut R,
    ) -> Result<BenchmarkReport> {
        let capacity = self.instances * self.trials;
        let mut tallies: Vec<Tally> = hunters
            .iter()
            .map(|hunter| Tally {
                name: hunter.name(),
                outcomes: Vec::with_capacity(capacity),
                timer: ShotTimer::default(),
            })
            .collect();
        let mut instance = HuntInstance::new();
        let mut skipped = 0;

        for index in 0..self.instances {
            let mut target = match instance.setup(self.trees, rng, self.policy) {
                Ok(placed) => placed,
                Err(error) if self.skip_failed_instances => {
                    warn!(instance = index, code = %error.code(), "skipping instance: {error}");
                    skipped += 1;
                    continue;
                }
                Err(error) => return Err(error),
            };
            for hunter in hunters.iter_mut() {
                hunter.bind(instance.forest())?;
            }
            for trial in 0..self.trials {
                if trial > 0 {
                    target = instance.place(rng)?;
                }
                self.play_trial(&mut instance, target, hunters, &mut tallies, rng)?;
            }
        }

        let report = BenchmarkReport {
            trees: self.trees,
            instances: self.instances,
            trials: self.trials,
            skipped_instances: skipped,
            hunters: tallies.into_iter().map(Tally::into_report).collect(),
        };
        for hunter in &report.hunters {
            info!(
                hunter = hunter.name,
                samples = hunter.statistics.samples,
                captures = hunter.statistics.captures,
                success_ratio = hunter.statistics.success_ratio,
                "benchmark finished"
            );
        }
        Ok(report)
    }

    fn play_trial<R: RandomSource + ?Sized>(
        &self,
        instance: &mut HuntInstance,
        mut target: usize,
        hunters: &mut [&mut dyn Hunter],
        tallies: &mut [Tally],
        rng: &mut R,
    ) -> Result<()> {
        for hunter in hunters.iter_mut() {
            hunter.restart()?;
        }
        let mut outcomes: Vec<Option<TrialOutcome>> = vec![None; hunters.len()];
        let mut shots = vec![0u32; hunters.len()];

        for _ in 0..self.max_turns {
            let seats = hunters
                .iter_mut()
                .zip(tallies.iter_mut())
                .zip(outcomes.iter_mut())
                .zip(shots.iter_mut());
            for (((hunter, tally), outcome), fired) in seats {
                if outcome.is_some() {
                    continue;
                }
                let started = Instant::now();
                let shot = hunter.shoot()?;
                let elapsed = started.elapsed();
                match shot {
                    Shot::GiveUp => *outcome = Some(TrialOutcome::GaveUp),
                    Shot::At(tree) => {
                        tally.timer.record(elapsed);
                        *fired += 1;
                        if tree == target {
                            *outcome = Some(TrialOutcome::Captured { shots: *fired });
                        }
                    }
                }
            }
            if outcomes.iter().all(Option::is_some) {
                break;
            }
            target = instance.jump(rng)?;
        }

        let unresolved = outcomes.iter().filter(|outcome| outcome.is_none()).count();
        if unresolved > 0 {
            warn!(
                turns = self.max_turns,
                hunters = unresolved,
                "trial hit the turn cap, recording give-ups"
            );
        }
        for (tally, outcome) in tallies.iter_mut().zip(outcomes) {
            tally.outcomes.push(outcome.unwrap_or(TrialOutcome::GaveUp));
        }

        #[cfg(feature = "metrics")]
        metrics::counter!("treehunt_trials_total").increment(1);

        Ok(())
    }
}
