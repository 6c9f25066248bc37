//! A forest together with the target hiding in it.

use crate::{
    Forest, GenerationPolicy,
    error::{HuntError, Result},
    random::RandomSource,
};

/// One benchmark instance: a generated forest and the target's tree.
///
/// The target is placed whenever the forest is (re)generated, so a
/// non-empty instance always has a position.
///
/// # Examples
/// ```
/// use treehunt_core::{GenerationPolicy, HuntInstance, seeded_rng};
///
/// let mut rng = seeded_rng(3);
/// let mut instance = HuntInstance::new();
/// instance
///     .setup(7, &mut rng, GenerationPolicy::default())
///     .expect("generation must succeed");
/// let start = instance.position().expect("target is placed");
/// let next = instance.jump(&mut rng).expect("target is placed");
/// assert!(instance.forest().neighbors_of(start).expect("in range").contains(&next));
/// ```
#[derive(Clone, Debug, Default)]
pub struct HuntInstance {
    forest: Forest,
    position: Option<usize>,
}

impl HuntInstance {
    /// Creates an instance with an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh forest and places the target on it.
    ///
    /// # Errors
    /// Propagates generation failures from [`Forest::generate_with_policy`];
    /// the instance is left empty in that case.
    pub fn setup<R: RandomSource + ?Sized>(
        &mut self,
        trees: usize,
        rng: &mut R,
        policy: GenerationPolicy,
    ) -> Result<usize> {
        self.position = None;
        self.forest.generate_with_policy(trees, rng, policy)?;
        self.place(rng)
    }

    /// Moves the target to a uniformly random tree and returns it.
    ///
    /// # Errors
    /// Returns [`HuntError::EmptyForest`] before a successful setup.
    pub fn place<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        if self.forest.is_empty() {
            return Err(HuntError::EmptyForest);
        }
        let tree = rng.uniform_index(self.forest.len());
        self.position = Some(tree);
        Ok(tree)
    }

    /// Moves the target to a uniformly random neighbour and returns it.
    ///
    /// # Errors
    /// Returns [`HuntError::EmptyForest`] before a successful setup.
    pub fn jump<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<usize> {
        let from = self.position.ok_or(HuntError::EmptyForest)?;
        let tree = self.forest.random_neighbor(from, rng)?;
        self.position = Some(tree);
        Ok(tree)
    }

    /// The forest being hunted in.
    #[must_use]
    #[rustfmt::skip]
    pub const fn forest(&self) -> &Forest { &self.forest }

    /// The target's tree, once placed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn position(&self) -> Option<usize> { self.position }
}
