//! Seeded inputs shared by the benchmark targets.

use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::SmallRng};
use treehunt_core::{Benchmark, BenchmarkBuilder, Forest};

use crate::{
    error::BenchSetupError,
    params::{ForestBenchParams, ScheduleBenchParams},
};

/// Returns the generator every benchmark draws from.
#[must_use]
pub fn bench_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Generates one forest described by `params`.
///
/// # Errors
/// Returns [`BenchSetupError::Hunt`] when generation fails.
pub fn seeded_forest(params: ForestBenchParams) -> Result<Forest, BenchSetupError> {
    let mut forest = Forest::new();
    forest.generate(params.trees, &mut bench_rng(params.seed))?;
    Ok(forest)
}

/// Generates `count` forests of one size from a single seeded stream.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `count` is zero and
/// [`BenchSetupError::Hunt`] when generation fails.
pub fn seeded_forests(
    params: ForestBenchParams,
    count: usize,
) -> Result<Vec<Forest>, BenchSetupError> {
    let nonzero = NonZeroUsize::new(count).ok_or(BenchSetupError::ZeroValue {
        context: "forest count",
    })?;
    let mut rng = bench_rng(params.seed);
    (0..nonzero.get())
        .map(|_| {
            let mut forest = Forest::new();
            forest.generate(params.trees, &mut rng)?;
            Ok(forest)
        })
        .collect()
}

/// Builds the benchmark schedule described by `params`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for an empty schedule and
/// [`BenchSetupError::Hunt`] for a forest that is too small.
pub fn schedule(params: ScheduleBenchParams) -> Result<Benchmark, BenchSetupError> {
    let instances = NonZeroUsize::new(params.instances).ok_or(BenchSetupError::ZeroValue {
        context: "instances",
    })?;
    let trials = NonZeroUsize::new(params.trials).ok_or(BenchSetupError::ZeroValue {
        context: "trials",
    })?;
    Ok(BenchmarkBuilder::new()
        .with_trees(params.trees)
        .with_instances(instances.get())
        .with_trials(trials.get())
        .build()?)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require contextual panics")]
mod tests {
    use super::*;

    use rstest::rstest;
    use treehunt_core::HuntError;

    #[test]
    fn seeded_forest_is_reproducible() {
        let params = ForestBenchParams { trees: 12, seed: 42 };
        let first = seeded_forest(params).expect("generation must succeed");
        let second = seeded_forest(params).expect("generation must succeed");
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
    }

    #[test]
    fn seeded_forests_share_one_stream() {
        let params = ForestBenchParams { trees: 8, seed: 7 };
        let forests = seeded_forests(params, 3).expect("generation must succeed");
        assert_eq!(forests.len(), 3);
        let single = seeded_forest(params).expect("generation must succeed");
        assert_eq!(forests.first(), Some(&single));
    }

    #[test]
    fn zero_forest_count_is_rejected() {
        let params = ForestBenchParams { trees: 8, seed: 7 };
        let err = seeded_forests(params, 0).expect_err("zero forests must fail");
        assert!(matches!(
            err,
            BenchSetupError::ZeroValue {
                context: "forest count"
            }
        ));
    }

    #[rstest]
    #[case(0, 1, "instances")]
    #[case(1, 0, "trials")]
    fn empty_schedules_are_rejected(
        #[case] instances: usize,
        #[case] trials: usize,
        #[case] expected: &str,
    ) {
        let err = schedule(ScheduleBenchParams {
            trees: 6,
            instances,
            trials,
        })
        .expect_err("empty schedule must fail");
        assert!(matches!(err, BenchSetupError::ZeroValue { context } if context == expected));
    }

    #[test]
    fn tiny_forests_surface_core_errors() {
        let err = schedule(ScheduleBenchParams {
            trees: 1,
            instances: 1,
            trials: 1,
        })
        .expect_err("one tree is too few");
        assert!(matches!(
            err,
            BenchSetupError::Hunt(HuntError::TooFewTrees { got: 1 })
        ));
    }
}
