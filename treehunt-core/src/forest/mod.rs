//! The forest the target jumps around in.
//!
//! A [`Forest`] is an undirected simple graph whose nodes are called trees.
//! Adjacency is stored in compressed form: the neighbours of tree `t`
//! occupy `neighbors[strides[t]..strides[t + 1]]`, which keeps neighbour
//! iteration cache-friendly and makes a random jump a single draw.

mod degree;
mod sis;

use tracing::{debug, instrument, warn};

use crate::{
    error::{HuntError, Result},
    random::RandomSource,
};

use self::sis::{EdgeMatrix, SisBuilder};

pub use self::degree::{DegreeSequence, is_graphic};

/// Largest forest that [`Forest::adjacency_masks`] can export.
pub const MAX_MASK_TREES: usize = u32::BITS as usize;

/// Retry budgets for [`Forest::generate_with_policy`].
///
/// # Examples
/// ```
/// use treehunt_core::GenerationPolicy;
///
/// let policy = GenerationPolicy::default().with_max_graph_attempts(50);
/// assert_eq!(policy.max_graph_attempts(), 50);
/// assert_eq!(policy.max_sequence_draws(), 10_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationPolicy {
    max_sequence_draws: usize,
    max_graph_attempts: usize,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            max_sequence_draws: 10_000,
            max_graph_attempts: 1_000,
        }
    }
}

impl GenerationPolicy {
    /// Caps the number of random sequences drawn per attempt while looking for
    /// a graphic one.
    #[must_use]
    pub const fn with_max_sequence_draws(mut self, draws: usize) -> Self {
        self.max_sequence_draws = draws;
        self
    }

    /// Caps the number of full generation attempts (sequence + graph).
    #[must_use]
    pub const fn with_max_graph_attempts(mut self, attempts: usize) -> Self {
        self.max_graph_attempts = attempts;
        self
    }

    /// Returns the sequence draw budget.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_sequence_draws(&self) -> usize { self.max_sequence_draws }

    /// Returns the generation attempt budget.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_graph_attempts(&self) -> usize { self.max_graph_attempts }
}

/// A connected, undirected, simple graph of trees.
///
/// A default forest is empty; it becomes valid once [`Forest::generate`] or
/// [`Forest::from_edges`] succeeds, and each generation replaces it wholly.
///
/// # Examples
/// ```
/// use treehunt_core::{Forest, seeded_rng};
///
/// let mut rng = seeded_rng(42);
/// let mut forest = Forest::default();
/// forest.generate(8, &mut rng).expect("generation must succeed");
/// assert_eq!(forest.len(), 8);
/// assert!(forest.degrees().iter().all(|&degree| degree >= 1));
/// assert_eq!(forest.strides()[8], 2 * forest.edge_count());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Forest {
    degrees: Vec<usize>,
    strides: Vec<usize>,
    neighbors: Vec<usize>,
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a forest from an explicit undirected edge list.
    ///
    /// # Errors
    /// Returns [`HuntError::TooFewTrees`] when `trees < 2`,
    /// [`HuntError::TreeOutOfRange`], [`HuntError::SelfLoop`] or
    /// [`HuntError::DuplicateEdge`] for malformed edges, and
    /// [`HuntError::IsolatedTree`] when some tree has no neighbour.
    ///
    /// # Examples
    /// ```
    /// use treehunt_core::Forest;
    ///
    /// let path = Forest::from_edges(3, &[(0, 1), (1, 2)]).expect("valid path");
    /// assert_eq!(path.neighbors_of(1), Some(&[0, 2][..]));
    /// ```
    pub fn from_edges(trees: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if trees < 2 {
            return Err(HuntError::TooFewTrees { got: trees });
        }
        let mut matrix = EdgeMatrix::new(trees);
        for &(left, right) in edges {
            if let Some(tree) = [left, right].into_iter().find(|&end| end >= trees) {
                return Err(HuntError::TreeOutOfRange { tree, trees });
            }
            if left == right {
                return Err(HuntError::SelfLoop { tree: left });
            }
            if matrix.contains(left, right) {
                return Err(HuntError::DuplicateEdge {
                    left: left.min(right),
                    right: left.max(right),
                });
            }
            matrix.insert(left, right);
        }
        Self::from_matrix(&matrix).map_err(|tree| HuntError::IsolatedTree { tree })
    }

    /// Generates a random forest with `trees` trees using the default
    /// [`GenerationPolicy`].
    ///
    /// # Errors
    /// See [`Self::generate_with_policy`].
    pub fn generate<R: RandomSource + ?Sized>(&mut self, trees: usize, rng: &mut R) -> Result<()> {
        self.generate_with_policy(trees, rng, GenerationPolicy::default())
    }

    /// Generates a random forest with `trees` trees.
    ///
    /// Each attempt draws a fresh graphic degree sequence, samples a graph
    /// for it, and keeps it only if every tree has at least one neighbour.
    /// Any failure discards the whole attempt. On error the forest is left
    /// empty.
    ///
    /// # Errors
    /// Returns [`HuntError::TooFewTrees`] when `trees < 2`,
    /// [`HuntError::SequenceExhausted`] when no graphic sequence is found,
    /// and [`HuntError::GenerationExhausted`] when every attempt failed.
    #[instrument(
        name = "core.forest.generate",
        err,
        skip(self, rng, policy),
        fields(trees = trees, max_attempts = policy.max_graph_attempts()),
    )]
    pub fn generate_with_policy<R: RandomSource + ?Sized>(
        &mut self,
        trees: usize,
        rng: &mut R,
        policy: GenerationPolicy,
    ) -> Result<()> {
        self.clear();
        if trees < 2 {
            return Err(HuntError::TooFewTrees { got: trees });
        }

        for attempt in 1..=policy.max_graph_attempts() {
            #[cfg(feature = "metrics")]
            metrics::counter!("treehunt_generation_attempts_total").increment(1);

            let sequence = DegreeSequence::random_graphic(trees, rng, policy.max_sequence_draws())?;
            let matrix = match SisBuilder::new(&sequence).build(rng) {
                Ok(matrix) => matrix,
                Err(loss) => {
                    #[cfg(feature = "metrics")]
                    metrics::counter!("treehunt_sis_precision_failures_total").increment(1);
                    debug!(
                        attempt,
                        level = loss.level,
                        total = loss.total,
                        "edge selection lost precision, retrying"
                    );
                    continue;
                }
            };
            match Self::from_matrix(&matrix) {
                Ok(forest) => {
                    debug!(attempt, edges = forest.edge_count(), "forest generated");
                    *self = forest;
                    return Ok(());
                }
                Err(tree) => debug!(attempt, tree, "isolated tree, retrying"),
            }
        }

        warn!(trees, "forest generation exhausted its attempt budget");
        Err(HuntError::GenerationExhausted {
            trees,
            attempts: policy.max_graph_attempts(),
        })
    }

    /// Scans the matrix into compressed adjacency; returns the first isolated
    /// tree on failure.
    fn from_matrix(matrix: &EdgeMatrix) -> core::result::Result<Self, usize> {
        let trees = matrix.trees();
        let mut degrees = Vec::with_capacity(trees);
        let mut strides = Vec::with_capacity(trees + 1);
        let mut neighbors = Vec::new();
        strides.push(0);

        for tree in 0..trees {
            let start = neighbors.len();
            neighbors.extend((0..trees).filter(|&other| matrix.contains(tree, other)));
            let degree = neighbors.len() - start;
            if degree == 0 {
                return Err(tree);
            }
            degrees.push(degree);
            strides.push(neighbors.len());
        }

        Ok(Self {
            degrees,
            strides,
            neighbors,
        })
    }

    /// Empties the forest.
    pub fn clear(&mut self) {
        self.degrees.clear();
        self.strides.clear();
        self.neighbors.clear();
    }

    /// Returns `true` until the forest has been generated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Number of trees.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.degrees.len() }

    /// Number of undirected edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.neighbors.len().div_euclid(2)
    }

    /// Final degree of every tree.
    #[must_use]
    #[rustfmt::skip]
    pub fn degrees(&self) -> &[usize] { &self.degrees }

    /// Prefix offsets into [`Self::neighbors`]; `len() + 1` entries.
    #[must_use]
    #[rustfmt::skip]
    pub fn strides(&self) -> &[usize] { &self.strides }

    /// Flat neighbour list of length `2 * edge_count()`.
    #[must_use]
    #[rustfmt::skip]
    pub fn neighbors(&self) -> &[usize] { &self.neighbors }

    /// Neighbours of `tree`, or `None` when it is out of range.
    #[must_use]
    pub fn neighbors_of(&self, tree: usize) -> Option<&[usize]> {
        let start = *self.strides.get(tree)?;
        let end = *self.strides.get(tree + 1)?;
        self.neighbors.get(start..end)
    }

    /// Picks a uniformly random neighbour of `tree`: the target's jump.
    ///
    /// # Errors
    /// Returns [`HuntError::TreeOutOfRange`] when `tree` is not in the forest
    /// and [`HuntError::IsolatedTree`] when it has no neighbour.
    ///
    /// # Examples
    /// ```
    /// use treehunt_core::{Forest, seeded_rng};
    ///
    /// let star = Forest::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).expect("valid star");
    /// let mut rng = seeded_rng(1);
    /// assert_eq!(star.random_neighbor(2, &mut rng), Ok(0));
    /// ```
    pub fn random_neighbor<R: RandomSource + ?Sized>(&self, tree: usize, rng: &mut R) -> Result<usize> {
        let neighbors = self.neighbors_of(tree).ok_or(HuntError::TreeOutOfRange {
            tree,
            trees: self.len(),
        })?;
        if neighbors.is_empty() {
            return Err(HuntError::IsolatedTree { tree });
        }
        neighbors
            .get(rng.uniform_index(neighbors.len()))
            .copied()
            .ok_or(HuntError::IsolatedTree { tree })
    }

    /// Exports the undirected edges as `(u, v)` pairs with `u < v`, ordered
    /// by `u` then `v`.
    #[must_use]
    pub fn edge_list(&self) -> Vec<(usize, usize)> {
        (0..self.len())
            .flat_map(|tree| {
                self.neighbors_of(tree)
                    .unwrap_or_default()
                    .iter()
                    .filter(move |&&other| other > tree)
                    .map(move |&other| (tree, other))
            })
            .collect()
    }

    /// Exports adjacency as one bitmask per tree: bit `v` of entry `u` is set
    /// iff `u` and `v` are neighbours.
    ///
    /// # Errors
    /// Returns [`HuntError::EmptyForest`] for an empty forest and
    /// [`HuntError::TooManyTrees`] beyond [`MAX_MASK_TREES`] trees.
    pub fn adjacency_masks(&self) -> Result<Vec<u32>> {
        if self.is_empty() {
            return Err(HuntError::EmptyForest);
        }
        if self.len() > MAX_MASK_TREES {
            return Err(HuntError::TooManyTrees {
                trees: self.len(),
                limit: MAX_MASK_TREES,
            });
        }
        Ok((0..self.len())
            .map(|tree| {
                self.neighbors_of(tree)
                    .unwrap_or_default()
                    .iter()
                    .fold(0u32, |mask, &other| mask | (1 << other))
            })
            .collect())
    }
}

#[cfg(test)]
mod property;
