//! Property tests for degree sequences and forest generation.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use proptest::{collection::vec, prelude::*};
use treehunt_test_support::fixtures::complete_edges;

use crate::{
    random::seeded_rng,
    test_utils::{assert_forest_invariants, suite_proptest_config},
};

use super::{Forest, is_graphic};

/// Searches every simple graph on `degrees.len()` trees for one with exactly
/// these degrees.
fn realisable(degrees: &[usize]) -> bool {
    let trees = degrees.len();
    let pairs = complete_edges(trees);
    (0u32..1 << pairs.len()).any(|subset| {
        let mut counts = vec![0; trees];
        for (bit, &(left, right)) in pairs.iter().enumerate() {
            if subset & (1 << bit) != 0 {
                for end in [left, right] {
                    if let Some(count) = counts.get_mut(end) {
                        *count += 1;
                    }
                }
            }
        }
        counts == degrees
    })
}

fn small_sequences() -> impl Strategy<Value = Vec<usize>> {
    (2usize..=5).prop_flat_map(|trees| vec(1..trees, trees))
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn erdos_gallai_agrees_with_exhaustive_search(degrees in small_sequences()) {
        prop_assert_eq!(is_graphic(&degrees), realisable(&degrees));
    }

    #[test]
    fn generated_forests_are_well_formed(trees in 2usize..=24, seed in any::<u64>()) {
        let mut forest = Forest::new();
        forest.generate(trees, &mut seeded_rng(seed)).expect("generation must succeed");
        prop_assert_eq!(forest.len(), trees);
        assert_forest_invariants(&forest);

        let edges = forest.edge_list();
        prop_assert_eq!(edges.len(), forest.edge_count());
        let rebuilt = Forest::from_edges(trees, &edges).expect("edge list is valid");
        prop_assert_eq!(rebuilt, forest);
    }
}
