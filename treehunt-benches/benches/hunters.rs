//! Hunter benchmarks.
//!
//! Measures the exact planner's breadth-first search, the probabilistic
//! tracker's per-shot belief update, and a complete benchmark schedule
//! running both hunters.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use treehunt_benches::{
    error::BenchSetupError,
    params::{ForestBenchParams, ScheduleBenchParams},
    setup::{bench_rng, schedule, seeded_forest, seeded_forests},
};
use treehunt_core::{ExactPlanner, Hunter, ProbabilisticTracker, Result as HuntResult};

/// Seed used for every generator in this benchmark.
const SEED: u64 = 42;

/// Forest sizes for the planner search.
const PLANNER_TREE_COUNTS: &[usize] = &[6, 10, 14, 18];

/// Forests cycled through per planner measurement.
const PLANNER_FORESTS: usize = 4;

/// Forest sizes for the tracker.
const TRACKER_TREE_COUNTS: &[usize] = &[6, 12, 21];

/// Shots fired per tracker measurement.
const TRACKER_SHOTS: usize = 100;

/// Schedules for the end-to-end run.
const SCHEDULES: &[ScheduleBenchParams] = &[
    ScheduleBenchParams {
        trees: 6,
        instances: 6,
        trials: 6,
    },
    ScheduleBenchParams {
        trees: 10,
        instances: 4,
        trials: 4,
    },
];

fn planner_bind_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("planner_bind");
    group.sample_size(20);

    for &trees in PLANNER_TREE_COUNTS {
        let params = ForestBenchParams { trees, seed: SEED };
        let forests = seeded_forests(params, PLANNER_FORESTS)?;

        group.bench_with_input(BenchmarkId::from_parameter(params), &forests, |b, pool| {
            let mut planner = ExactPlanner::new();
            let mut next = pool.iter().cycle();
            b.iter(|| match next.next() {
                Some(forest) => planner.bind(forest).map(|()| planner.status()),
                None => Ok(planner.status()),
            });
        });
    }

    group.finish();
    Ok(())
}

fn planner_bind(c: &mut Criterion) {
    if let Err(err) = planner_bind_impl(c) {
        panic!("planner_bind benchmark setup failed: {err}");
    }
}

fn fire(tracker: &mut ProbabilisticTracker) -> HuntResult<usize> {
    tracker.restart()?;
    let mut fired = 0;
    for _ in 0..TRACKER_SHOTS {
        if tracker.shoot()?.tree().is_some() {
            fired += 1;
        }
    }
    Ok(fired)
}

fn tracker_shots_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("tracker_shots");

    for &trees in TRACKER_TREE_COUNTS {
        let params = ForestBenchParams { trees, seed: SEED };
        let forest = seeded_forest(params)?;
        let mut tracker = ProbabilisticTracker::new();
        tracker.bind(&forest)?;

        group.bench_function(BenchmarkId::from_parameter(params), |b| {
            b.iter(|| fire(&mut tracker));
        });
    }

    group.finish();
    Ok(())
}

fn tracker_shots(c: &mut Criterion) {
    if let Err(err) = tracker_shots_impl(c) {
        panic!("tracker_shots benchmark setup failed: {err}");
    }
}

fn benchmark_run_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("benchmark_run");
    group.sample_size(10);

    for &params in SCHEDULES {
        let benchmark = schedule(params)?;
        group.bench_with_input(
            BenchmarkId::from_parameter(params),
            &benchmark,
            |b, configured| {
                let mut rng = bench_rng(SEED);
                b.iter(|| {
                    let mut tracker = ProbabilisticTracker::new();
                    let mut planner = ExactPlanner::new();
                    let mut hunters: [&mut dyn Hunter; 2] = [&mut tracker, &mut planner];
                    configured.run(&mut hunters, &mut rng)
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn benchmark_run(c: &mut Criterion) {
    if let Err(err) = benchmark_run_impl(c) {
        panic!("benchmark_run benchmark setup failed: {err}");
    }
}

criterion_group!(benches, planner_bind, tracker_shots, benchmark_run);
criterion_main!(benches);
