//! End-to-end tests for forest generation and benchmarking.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

mod common;

use common::ScriptedSource;
use rstest::rstest;
use treehunt_core::{
    BenchmarkBuilder, DegreeSequence, ExactPlanner, Forest, GIVE_UP_SENTINEL, Hunter,
    MAX_PLANNER_TREES, ProbabilisticTracker, TrialOutcome, entropy_rng, seeded_rng,
};

fn both_hunters_report(trees: usize, instances: usize, trials: usize, seed: u64) -> Vec<Vec<i64>> {
    let benchmark = BenchmarkBuilder::new()
        .with_trees(trees)
        .with_instances(instances)
        .with_trials(trials)
        .build()
        .expect("configuration is valid");
    let mut tracker = ProbabilisticTracker::new();
    let mut planner = ExactPlanner::new();
    let mut hunters: [&mut dyn Hunter; 2] = [&mut tracker, &mut planner];
    let report = benchmark
        .run(&mut hunters, &mut seeded_rng(seed))
        .expect("benchmark must run");
    report.hunters.iter().map(|hunter| hunter.raw_outcomes()).collect()
}

#[test]
fn six_tree_benchmark_produces_sane_outcomes() {
    let benchmark = BenchmarkBuilder::new()
        .with_trees(6)
        .with_instances(36)
        .with_trials(6)
        .build()
        .expect("configuration is valid");
    let mut tracker = ProbabilisticTracker::new();
    let mut planner = ExactPlanner::new();
    let mut hunters: [&mut dyn Hunter; 2] = [&mut tracker, &mut planner];
    let report = benchmark
        .run(&mut hunters, &mut entropy_rng())
        .expect("benchmark must run");

    assert_eq!(report.hunters.len(), 2);
    for hunter in &report.hunters {
        assert_eq!(hunter.statistics.samples, 36 * 6);
        for raw in hunter.raw_outcomes() {
            assert!(raw == GIVE_UP_SENTINEL || raw >= 1, "unexpected outcome {raw}");
        }
        let ratio = hunter.statistics.success_ratio;
        assert!((0.0..=1.0).contains(&ratio));
        let captures = hunter
            .outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TrialOutcome::Captured { .. }))
            .count();
        assert_eq!(hunter.statistics.captures, captures);
    }
}

#[test]
fn same_seed_replays_the_whole_benchmark() {
    assert_eq!(both_hunters_report(7, 6, 3, 99), both_hunters_report(7, 6, 3, 99));
}

#[test]
fn oversized_forests_make_the_planner_give_up() {
    let outcomes = both_hunters_report(MAX_PLANNER_TREES + 1, 2, 2, 5);
    assert_eq!(outcomes.get(1), Some(&vec![GIVE_UP_SENTINEL; 4]));
    assert_eq!(outcomes.first().map(Vec::len), Some(4));
}

#[rstest]
#[case(4)]
#[case(10)]
#[case(20)]
fn seeded_degree_sequences_repeat(#[case] trees: usize) {
    let first = DegreeSequence::random_graphic(trees, &mut seeded_rng(31), 10_000)
        .expect("graphic sequence exists");
    let second = DegreeSequence::random_graphic(trees, &mut seeded_rng(31), 10_000)
        .expect("graphic sequence exists");
    assert_eq!(first, second);
}

#[test]
fn scripted_draws_drive_degree_sampling() {
    let mut source = ScriptedSource::new([0, 1, 2]);
    let sequence = DegreeSequence::random(4, &mut source).expect("four trees");
    assert_eq!(sequence.as_slice(), &[1, 2, 3, 1]);
    assert!(!sequence.is_graphic());
}

#[rstest]
#[case(0, 0)]
#[case(1, 2)]
fn scripted_draws_pick_the_jump(#[case] draw: usize, #[case] expected: usize) {
    let path = Forest::from_edges(3, &[(0, 1), (1, 2)]).expect("valid path");
    let mut source = ScriptedSource::new([draw]);
    assert_eq!(path.random_neighbor(1, &mut source), Ok(expected));
}

#[test]
fn regeneration_without_a_seed_stays_valid() {
    let mut rng = entropy_rng();
    let mut forest = Forest::new();
    for _ in 0..2 {
        forest.clear();
        forest.generate(10, &mut rng).expect("generation must succeed");
        assert_eq!(forest.len(), 10);
        assert!(forest.degrees().iter().all(|&degree| degree >= 1));
        assert_eq!(forest.strides().last(), Some(&(2 * forest.edge_count())));
        for (left, right) in forest.edge_list() {
            assert!(forest.neighbors_of(right).expect("in range").contains(&left));
        }
    }
}
