//! Hunting strategies.
//!
//! A [`Hunter`] is bound once per forest, restarted before every trial, and
//! asked for one [`Shot`] per turn. Giving up is an ordinary outcome of the
//! game and is reported as [`Shot::GiveUp`]; misuse such as shooting before
//! binding is reported as an error instead.

mod planner;
mod tracker;

#[cfg(test)]
mod property;

use crate::{Forest, Result};

pub use self::{
    planner::{ExactPlanner, MAX_PLANNER_TREES, PlanStatus},
    tracker::{ProbabilisticTracker, RESCALE_THRESHOLD},
};

/// One turn's decision by a hunter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shot {
    /// Fire at the given tree.
    At(usize),
    /// Stop hunting for the rest of the trial.
    GiveUp,
}

impl Shot {
    /// Returns the targeted tree, if any.
    ///
    /// # Examples
    /// ```
    /// use treehunt_core::Shot;
    ///
    /// assert_eq!(Shot::At(3).tree(), Some(3));
    /// assert_eq!(Shot::GiveUp.tree(), None);
    /// ```
    #[must_use]
    pub const fn tree(self) -> Option<usize> {
        match self {
            Self::At(tree) => Some(tree),
            Self::GiveUp => None,
        }
    }
}

/// Contract shared by every hunting strategy.
pub trait Hunter {
    /// Stable display name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Prepares the hunter for a freshly generated forest.
    ///
    /// # Errors
    /// Returns [`crate::HuntError::EmptyForest`] when `forest` is empty.
    fn bind(&mut self, forest: &Forest) -> Result<()>;

    /// Resets per-trial state; the forest stays bound.
    ///
    /// # Errors
    /// Returns [`crate::HuntError::Unbound`] before [`Self::bind`].
    fn restart(&mut self) -> Result<()>;

    /// Chooses the next tree to shoot at.
    ///
    /// # Errors
    /// Returns [`crate::HuntError::Unbound`] before [`Self::bind`].
    fn shoot(&mut self) -> Result<Shot>;
}
