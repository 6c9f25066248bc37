//! Exact hunter with a worst-case guarantee.
//!
//! The planner searches over the sets of trees the target could still be in.
//! Starting from "anywhere", shooting tree `i` from set `S` leaves
//! `S \ {i}`, and the target's jump turns that into the union of the
//! neighbourhoods of its members. A breadth-first search over these sets
//! finds the shortest shot sequence that drives the set to empty, which
//! captures the target whatever path it takes.
//!
//! Sets are `u32` bitmasks, so planning is limited to
//! [`MAX_PLANNER_TREES`] trees. That bound is a property of this
//! representation; larger forests are refused rather than truncated.

use std::collections::{HashMap, VecDeque, hash_map::Entry};

use tracing::{debug, instrument, warn};

use crate::{
    Forest,
    error::{HuntError, Result},
};

use super::{Hunter, Shot};

/// Largest forest the planner accepts.
pub const MAX_PLANNER_TREES: usize = 21;

const DEFAULT_STATE_BUDGET: usize = 1 << MAX_PLANNER_TREES;

const NAME: &str = "exact-planner";

/// Outcome of planning on the bound forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanStatus {
    /// No forest has been bound yet.
    Unbound,
    /// A winning sequence of `shots` shots was found.
    Ready {
        /// Length of the winning sequence.
        shots: usize,
    },
    /// The search space was exhausted without a winning sequence.
    Unsolvable {
        /// Number of location sets explored.
        explored: usize,
    },
    /// The forest exceeds [`MAX_PLANNER_TREES`].
    TooLarge {
        /// Number of trees in the refused forest.
        trees: usize,
    },
    /// The configured state budget ran out before the search finished.
    BudgetExhausted {
        /// Number of location sets explored.
        explored: usize,
    },
}

impl PlanStatus {
    /// Returns `true` when a winning sequence is available.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// How a location set was first reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Transition {
    parent: u32,
    shot: u8,
}

/// Hunter that replays a precomputed worst-case-optimal shot sequence.
///
/// # Examples
/// ```
/// use treehunt_core::{ExactPlanner, Forest, Hunter, PlanStatus, Shot};
///
/// let path = Forest::from_edges(3, &[(0, 1), (1, 2)]).expect("valid path");
/// let mut planner = ExactPlanner::new();
/// planner.bind(&path).expect("forest is not empty");
/// assert_eq!(planner.status(), PlanStatus::Ready { shots: 2 });
/// assert_eq!(planner.shoot().expect("bound"), Shot::At(1));
/// assert_eq!(planner.shoot().expect("bound"), Shot::At(1));
/// assert_eq!(planner.shoot().expect("bound"), Shot::GiveUp);
/// ```
#[derive(Clone, Debug)]
pub struct ExactPlanner {
    state_budget: usize,
    status: PlanStatus,
    sequence: Vec<usize>,
    cursor: usize,
}

impl Default for ExactPlanner {
    fn default() -> Self {
        Self {
            state_budget: DEFAULT_STATE_BUDGET,
            status: PlanStatus::Unbound,
            sequence: Vec::new(),
            cursor: 0,
        }
    }
}

impl ExactPlanner {
    /// Creates an unbound planner with the default state budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of location sets the search may record.
    #[must_use]
    pub const fn with_state_budget(mut self, budget: usize) -> Self {
        self.state_budget = budget;
        self
    }

    /// Outcome of planning on the bound forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn status(&self) -> PlanStatus { self.status }

    /// The planned shots in firing order; empty unless planning succeeded.
    #[must_use]
    #[rustfmt::skip]
    pub const fn sequence(&self) -> &[usize] { self.sequence.as_slice() }

    #[instrument(
        name = "core.planner.plan",
        skip(self, forest),
        fields(trees = forest.len(), edges = forest.edge_count()),
    )]
    fn plan(&mut self, forest: &Forest) -> Result<()> {
        self.sequence.clear();
        self.cursor = 0;

        let trees = forest.len();
        if trees > MAX_PLANNER_TREES {
            warn!(trees, limit = MAX_PLANNER_TREES, "forest too large to plan");
            self.status = PlanStatus::TooLarge { trees };
            return Ok(());
        }

        let adjacency = forest.adjacency_masks()?;
        self.status = match search(&adjacency, self.state_budget) {
            Search::Solved(sequence) => {
                let shots = sequence.len();
                self.sequence = sequence;
                debug!(shots, "winning sequence found");
                PlanStatus::Ready { shots }
            }
            Search::Unsolvable { explored } => {
                debug!(explored, "no winning sequence exists");
                PlanStatus::Unsolvable { explored }
            }
            Search::OutOfBudget { explored } => {
                warn!(explored, budget = self.state_budget, "planning budget exhausted");
                PlanStatus::BudgetExhausted { explored }
            }
        };
        Ok(())
    }
}

impl Hunter for ExactPlanner {
    fn name(&self) -> &'static str {
        NAME
    }

    fn bind(&mut self, forest: &Forest) -> Result<()> {
        if forest.is_empty() {
            self.status = PlanStatus::Unbound;
            self.sequence.clear();
            self.cursor = 0;
            return Err(HuntError::EmptyForest);
        }
        self.plan(forest)
    }

    fn restart(&mut self) -> Result<()> {
        if self.status == PlanStatus::Unbound {
            return Err(HuntError::Unbound { hunter: NAME });
        }
        self.cursor = 0;
        Ok(())
    }

    fn shoot(&mut self) -> Result<Shot> {
        if self.status == PlanStatus::Unbound {
            return Err(HuntError::Unbound { hunter: NAME });
        }
        let Some(&tree) = self.sequence.get(self.cursor) else {
            return Ok(Shot::GiveUp);
        };
        self.cursor += 1;
        Ok(Shot::At(tree))
    }
}

enum Search {
    Solved(Vec<usize>),
    Unsolvable { explored: usize },
    OutOfBudget { explored: usize },
}

/// Trees reachable in one jump from any member of `set`.
pub(crate) fn reachable(set: u32, adjacency: &[u32]) -> u32 {
    members(set).fold(0, |reached, tree| {
        reached | adjacency.get(tree).copied().unwrap_or(0)
    })
}

fn members(set: u32) -> impl Iterator<Item = usize> {
    let mut remaining = set;
    std::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        let tree = remaining.trailing_zeros();
        remaining &= remaining - 1;
        usize::try_from(tree).ok()
    })
}

fn search(adjacency: &[u32], budget: usize) -> Search {
    let everywhere = (1u32 << adjacency.len()) - 1;
    let mut transitions: HashMap<u32, Transition> = HashMap::new();
    let mut queue = VecDeque::from([everywhere]);

    while let Some(set) = queue.pop_front() {
        for shot in members(set) {
            let Ok(shot_index) = u8::try_from(shot) else {
                continue;
            };
            let survivors = set & !(1 << shot);
            let next = reachable(survivors, adjacency);
            if next == everywhere {
                continue;
            }
            let Entry::Vacant(slot) = transitions.entry(next) else {
                continue;
            };
            slot.insert(Transition {
                parent: set,
                shot: shot_index,
            });
            if next == 0 {
                return Search::Solved(unwind(&transitions, everywhere));
            }
            if transitions.len() >= budget {
                return Search::OutOfBudget {
                    explored: transitions.len(),
                };
            }
            queue.push_back(next);
        }
    }

    Search::Unsolvable {
        explored: transitions.len(),
    }
}

/// Walks parents from the empty set back to the root and returns the shots
/// in firing order.
fn unwind(transitions: &HashMap<u32, Transition>, root: u32) -> Vec<usize> {
    let mut shots = Vec::new();
    let mut set = 0;
    while set != root {
        let Some(transition) = transitions.get(&set) else {
            break;
        };
        shots.push(usize::from(transition.shot));
        set = transition.parent;
    }
    shots.reverse();
    shots
}
