//! Shared test utilities for `treehunt-core`.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use proptest::test_runner::Config as ProptestConfig;
use test_strategy::Arbitrary;
use treehunt_test_support::{
    fixtures::{complete_edges, cycle_edges, path_edges, spider_edges, star_edges},
    proptest_profile::ProptestRunProfile,
};

use crate::{Forest, RandomSource};

/// Hand-built forest shapes for property suites.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(crate) enum ForestShape {
    #[weight(3)]
    Path,
    #[weight(2)]
    Cycle,
    Star,
    Complete,
    /// Three legs around a centre.
    #[weight(2)]
    Spider,
}

impl ForestShape {
    /// Builds the shape with roughly `requested` trees; spiders round down to
    /// `1 + 3 * leg` trees.
    pub(crate) fn build(self, requested: usize) -> Forest {
        let size = requested.max(3);
        let (trees, edges) = match self {
            Self::Path => (size, path_edges(size)),
            Self::Cycle => (size, cycle_edges(size)),
            Self::Star => (size, star_edges(size)),
            Self::Complete => (size, complete_edges(size)),
            Self::Spider => {
                let leg = (size - 1).div_euclid(3).max(1);
                (1 + 3 * leg, spider_edges(3, leg))
            }
        };
        Forest::from_edges(trees, &edges).expect("fixture shapes are valid forests")
    }
}

/// Replays scripted unit draws, repeating the last one once the script runs
/// out. Integer draws always take the top of their range, so generated degree
/// sequences are complete.
#[derive(Clone, Debug)]
pub(crate) struct ScriptedUnits {
    units: Vec<f64>,
    next: usize,
}

impl ScriptedUnits {
    pub(crate) const fn new(units: Vec<f64>) -> Self {
        Self { units, next: 0 }
    }
}

impl RandomSource for ScriptedUnits {
    fn uniform_index(&mut self, upper: usize) -> usize {
        upper.saturating_sub(1)
    }

    fn uniform_inclusive(&mut self, _low: usize, high: usize) -> usize {
        high
    }

    fn uniform_unit(&mut self) -> f64 {
        let unit = self
            .units
            .get(self.next)
            .or_else(|| self.units.last())
            .copied()
            .unwrap_or(0.0);
        self.next += 1;
        unit
    }
}

/// Builds a proptest configuration honouring the shared environment
/// overrides.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Checks the structural invariants of a non-empty forest.
///
/// Every tree has a neighbour, strides are consistent with the degrees,
/// neighbours are in range, and adjacency is symmetric without loops or
/// repeats.
pub(crate) fn assert_forest_invariants(forest: &Forest) {
    let trees = forest.len();
    assert!(trees >= 2, "forest has {trees} trees");
    assert_eq!(forest.strides().len(), trees + 1);
    assert_eq!(forest.strides().first(), Some(&0));
    assert_eq!(forest.strides().last(), Some(&(2 * forest.edge_count())));
    assert_eq!(forest.neighbors().len(), 2 * forest.edge_count());

    for tree in 0..trees {
        let neighbors = forest.neighbors_of(tree).expect("tree is in range");
        assert_eq!(Some(&neighbors.len()), forest.degrees().get(tree));
        assert!(!neighbors.is_empty(), "tree {tree} is isolated");
        for (position, &other) in neighbors.iter().enumerate() {
            assert!(other < trees, "neighbour {other} of {tree} is out of range");
            assert_ne!(other, tree, "tree {tree} neighbours itself");
            let earlier = neighbors.get(..position).unwrap_or_default();
            assert!(!earlier.contains(&other), "edge ({tree}, {other}) is repeated");
            let back = forest.neighbors_of(other).expect("neighbour is in range");
            assert!(back.contains(&tree), "edge ({tree}, {other}) is one-sided");
        }
    }
}
