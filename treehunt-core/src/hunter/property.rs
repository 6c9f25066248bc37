//! Property tests shared by both hunters.
#![expect(clippy::expect_used, reason = "tests require contextual panics")]

use proptest::prelude::*;

use crate::{
    random::{RandomSource, seeded_rng},
    test_utils::{ForestShape, suite_proptest_config},
};

use super::{ExactPlanner, Hunter, PlanStatus, ProbabilisticTracker, Shot};

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn tracker_beliefs_stay_finite(shape in any::<ForestShape>(), size in 3usize..=16) {
        let forest = shape.build(size);
        let mut tracker = ProbabilisticTracker::new();
        tracker.bind(&forest).expect("forest is not empty");

        for _ in 0..4 * forest.len() {
            let Shot::At(tree) = tracker.shoot().expect("bound") else {
                panic!("the tracker never gives up");
            };
            prop_assert!(tree < forest.len());
            let beliefs = tracker.beliefs();
            prop_assert!(beliefs.iter().all(|value| value.is_finite() && *value >= 0.0));
            prop_assert!(beliefs.iter().any(|value| *value > 0.0));
        }
    }

    #[test]
    fn ready_plans_catch_a_wandering_target(
        shape in any::<ForestShape>(),
        size in 3usize..=12,
        seed in any::<u64>(),
    ) {
        let forest = shape.build(size);
        let mut planner = ExactPlanner::new();
        planner.bind(&forest).expect("forest is not empty");
        let PlanStatus::Ready { shots } = planner.status() else {
            return Ok(());
        };

        let mut rng = seeded_rng(seed);
        let mut target = rng.uniform_index(forest.len());
        for fired in 1..=shots {
            let Shot::At(tree) = planner.shoot().expect("bound") else {
                panic!("plan ended after {fired} of {shots} shots");
            };
            if tree == target {
                return Ok(());
            }
            target = forest.random_neighbor(target, &mut rng).expect("target is in range");
        }
        prop_assert!(false, "target escaped a {shots}-shot plan");
    }
}
