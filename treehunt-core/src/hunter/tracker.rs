//! Heuristic hunter that shoots at the most likely location.
//!
//! The tracker keeps an unnormalised belief over the target's position,
//! starting uniform. After every shot the belief is pushed one jump forward:
//! each tree sends its mass in equal parts to its neighbours, except the tree
//! just shot, whose mass is dropped. The next shot goes to the heaviest tree,
//! the lowest index winning ties.

use tracing::debug;

use crate::{
    Forest,
    error::{HuntError, Result},
};

use super::{Hunter, Shot};

/// Below this maximum belief both buffers are divided by it.
pub const RESCALE_THRESHOLD: f64 = 1e-10;

const NAME: &str = "probabilistic-tracker";

/// Which of the two buffers holds the current belief.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Role {
    #[default]
    First,
    Second,
}

impl Role {
    const fn flipped(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// Belief-propagation hunter usable on any forest.
///
/// # Examples
/// ```
/// use treehunt_core::{Forest, Hunter, ProbabilisticTracker, Shot};
///
/// let forest = Forest::from_edges(3, &[(0, 1), (1, 2)]).expect("valid path");
/// let mut tracker = ProbabilisticTracker::new();
/// tracker.bind(&forest).expect("forest is not empty");
/// assert_eq!(tracker.shoot().expect("bound"), Shot::At(0));
/// assert_eq!(tracker.shoot().expect("bound"), Shot::At(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProbabilisticTracker {
    degrees: Vec<usize>,
    strides: Vec<usize>,
    neighbors: Vec<usize>,
    buffers: [Vec<f64>; 2],
    current: Role,
    next_shot: usize,
    shots: usize,
}

impl ProbabilisticTracker {
    /// Creates an unbound tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current belief over the target's position, indexed by tree.
    #[must_use]
    pub const fn beliefs(&self) -> &[f64] {
        self.buffer(self.current)
    }

    /// Belief before the most recent propagation.
    #[must_use]
    pub const fn previous_beliefs(&self) -> &[f64] {
        self.buffer(self.current.flipped())
    }

    /// Tree the next call to [`Hunter::shoot`] will target, once bound.
    #[must_use]
    pub fn next_shot(&self) -> Option<usize> {
        (!self.degrees.is_empty()).then_some(self.next_shot)
    }

    /// Shots fired since the last restart.
    #[must_use]
    #[rustfmt::skip]
    pub const fn shots_fired(&self) -> usize { self.shots }

    const fn buffer(&self, role: Role) -> &[f64] {
        let [first, second] = &self.buffers;
        match role {
            Role::First => first.as_slice(),
            Role::Second => second.as_slice(),
        }
    }

    const fn ensure_bound(&self) -> Result<()> {
        if self.degrees.is_empty() {
            return Err(HuntError::Unbound { hunter: NAME });
        }
        Ok(())
    }

    fn unbind(&mut self) {
        self.degrees.clear();
        self.strides.clear();
        self.neighbors.clear();
        for buffer in &mut self.buffers {
            buffer.clear();
        }
        self.current = Role::First;
        self.next_shot = 0;
        self.shots = 0;
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the uniform belief is one over the tree count"
    )]
    fn reset_beliefs(&mut self) {
        let uniform = 1.0 / self.degrees.len() as f64;
        for buffer in &mut self.buffers {
            buffer.clear();
            buffer.resize(self.degrees.len(), uniform);
        }
        self.current = Role::First;
        self.next_shot = 0;
    }

    /// Swaps buffer roles and recomputes the fresh buffer from the stale one,
    /// dropping the mass held by `shot`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "belief mass is split evenly across a tree's degree"
    )]
    fn propagate(&mut self, shot: usize) {
        self.current = self.current.flipped();
        let Self {
            degrees,
            strides,
            neighbors,
            buffers,
            current,
            next_shot,
            ..
        } = self;

        let [first, second] = &mut *buffers;
        let (fresh, stale) = match *current {
            Role::First => (first, &*second),
            Role::Second => (second, &*first),
        };

        let mut best = 0.0;
        for (tree, (slot, window)) in fresh.iter_mut().zip(strides.windows(2)).enumerate() {
            let &[start, end] = window else {
                continue;
            };
            let mass: f64 = neighbors
                .get(start..end)
                .unwrap_or_default()
                .iter()
                .filter(|&&neighbor| neighbor != shot)
                .filter_map(|&neighbor| {
                    let share = stale.get(neighbor)?;
                    let degree = degrees.get(neighbor)?;
                    Some(share / *degree as f64)
                })
                .sum();
            *slot = mass;
            if mass > best {
                best = mass;
                *next_shot = tree;
            }
        }

        self.stabilise(best);
    }

    #[expect(clippy::float_arithmetic, reason = "rescaling divides every belief")]
    fn stabilise(&mut self, best: f64) {
        if best <= 0.0 {
            debug!(shots = self.shots, "belief vanished, resetting to uniform");
            self.reset_beliefs();
        } else if best <= RESCALE_THRESHOLD {
            for value in self.buffers.iter_mut().flatten() {
                *value /= RESCALE_THRESHOLD;
            }
        }
    }
}

impl Hunter for ProbabilisticTracker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn bind(&mut self, forest: &Forest) -> Result<()> {
        if forest.is_empty() {
            self.unbind();
            return Err(HuntError::EmptyForest);
        }
        self.degrees = forest.degrees().to_vec();
        self.strides = forest.strides().to_vec();
        self.neighbors = forest.neighbors().to_vec();
        self.restart()
    }

    fn restart(&mut self) -> Result<()> {
        self.ensure_bound()?;
        self.reset_beliefs();
        self.shots = 0;
        Ok(())
    }

    fn shoot(&mut self) -> Result<Shot> {
        self.ensure_bound()?;
        let tree = self.next_shot;
        self.shots += 1;
        self.propagate(tree);
        Ok(Shot::At(tree))
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require contextual panics")]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::indexing_slicing,
    reason = "tests compare beliefs against hand-computed values"
)]
mod tests {
    use super::*;

    use rstest::rstest;
    use treehunt_test_support::fixtures::{path_edges, star_edges};

    use crate::random::seeded_rng;

    const TOLERANCE: f64 = 1e-12;

    fn bound(trees: usize, edges: &[(usize, usize)]) -> ProbabilisticTracker {
        let forest = Forest::from_edges(trees, edges).expect("fixture is valid");
        let mut tracker = ProbabilisticTracker::new();
        tracker.bind(&forest).expect("forest is not empty");
        tracker
    }

    fn assert_uniform(values: &[f64]) {
        let expected = 1.0 / values.len() as f64;
        assert!(values.iter().all(|value| (value - expected).abs() < TOLERANCE));
        assert!((values.iter().sum::<f64>() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn unbound_tracker_fails_fast() {
        let mut tracker = ProbabilisticTracker::new();
        assert_eq!(tracker.shoot(), Err(HuntError::Unbound { hunter: NAME }));
        assert_eq!(tracker.restart(), Err(HuntError::Unbound { hunter: NAME }));
        assert_eq!(tracker.next_shot(), None);
    }

    #[test]
    fn binding_an_empty_forest_is_rejected() {
        let mut tracker = ProbabilisticTracker::new();
        assert_eq!(tracker.bind(&Forest::new()), Err(HuntError::EmptyForest));
    }

    #[test]
    fn failed_rebind_leaves_the_tracker_unbound() {
        let mut tracker = bound(4, &path_edges(4));
        tracker.shoot().expect("bound");
        assert_eq!(tracker.bind(&Forest::new()), Err(HuntError::EmptyForest));

        assert_eq!(tracker.shoot(), Err(HuntError::Unbound { hunter: NAME }));
        assert_eq!(tracker.next_shot(), None);
        assert!(tracker.beliefs().is_empty());
        assert!(tracker.previous_beliefs().is_empty());
        assert_eq!(tracker.shots_fired(), 0);
    }

    #[rstest]
    #[case(2)]
    #[case(7)]
    #[case(30)]
    fn restart_restores_uniform_beliefs(#[case] trees: usize) {
        let mut tracker = bound(trees, &path_edges(trees));
        for _ in 0..5 {
            tracker.shoot().expect("bound");
        }
        tracker.restart().expect("bound");
        assert_uniform(tracker.beliefs());
        assert_uniform(tracker.previous_beliefs());
        assert_eq!(tracker.shots_fired(), 0);
        assert_eq!(tracker.next_shot(), Some(0));
    }

    #[test]
    fn propagation_reads_only_the_stale_buffer() {
        let mut tracker = bound(3, &path_edges(3));
        assert_eq!(tracker.shoot(), Ok(Shot::At(0)));

        let third = 1.0 / 3.0;
        assert_uniform(tracker.previous_beliefs());
        let expected = [third / 2.0, third, third / 2.0];
        for (value, want) in tracker.beliefs().iter().zip(expected) {
            assert!((value - want).abs() < TOLERANCE);
        }
        assert_eq!(tracker.next_shot(), Some(1));
    }

    #[test]
    fn star_centre_is_shot_twice_then_belief_resets() {
        let mut tracker = bound(5, &star_edges(5));
        assert_eq!(tracker.shoot(), Ok(Shot::At(0)));
        assert_eq!(tracker.shoot(), Ok(Shot::At(0)));
        // Every consistent position has been covered, so the belief restarts.
        assert_uniform(tracker.beliefs());
    }

    #[test]
    fn tiny_beliefs_are_rescaled_without_reordering() {
        let mut tracker = bound(3, &path_edges(3));
        tracker.buffers = [vec![1e-12, 3e-12, 2e-12], vec![4e-12, 5e-12, 6e-12]];
        tracker.stabilise(3e-12);
        let [first, second] = &tracker.buffers;
        assert!((first[1] - 3e-2).abs() < TOLERANCE);
        assert!(first[1] > first[2] && first[2] > first[0]);
        assert!((second[2] - 6e-2).abs() < TOLERANCE);
    }

    #[test]
    fn shots_always_land_inside_the_forest() {
        let mut rng = seeded_rng(12);
        let mut forest = Forest::new();
        forest.generate(17, &mut rng).expect("generation must succeed");
        let mut tracker = ProbabilisticTracker::new();
        tracker.bind(&forest).expect("forest is not empty");
        for _ in 0..500 {
            match tracker.shoot().expect("bound") {
                Shot::At(tree) => assert!(tree < 17),
                Shot::GiveUp => panic!("the tracker never gives up"),
            }
        }
        assert_eq!(tracker.shots_fired(), 500);
    }
}
