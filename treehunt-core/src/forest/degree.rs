//! Random degree sequences and the Erdős–Gallai graphicality test.
//!
//! Erdős, P. and Gallai, T. "Graphs with Prescribed Degrees of Vertices",
//! Mat. Lapok. 11, 264-274, 1960.

use std::cmp::Reverse;

use tracing::debug;

use crate::{
    error::{HuntError, Result},
    random::RandomSource,
};

/// An ordered sequence of prescribed tree degrees.
///
/// Every entry lies in `1..len`, so each tree can be joined to at least one
/// other tree without self-loops.
///
/// # Examples
/// ```
/// use treehunt_core::DegreeSequence;
///
/// let complete = DegreeSequence::new(vec![3, 3, 3, 3]).expect("degrees in range");
/// assert!(complete.is_graphic());
/// assert_eq!(complete.edge_count(), 6);
///
/// let broken = DegreeSequence::new(vec![3, 3, 3, 1]).expect("degrees in range");
/// assert!(!broken.is_graphic());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DegreeSequence {
    degrees: Vec<usize>,
}

impl DegreeSequence {
    /// Wraps explicit degrees after checking their range.
    ///
    /// # Errors
    /// Returns [`HuntError::TooFewTrees`] for fewer than two entries and
    /// [`HuntError::InvalidDegree`] when an entry lies outside `1..len`.
    pub fn new(degrees: Vec<usize>) -> Result<Self> {
        let trees = degrees.len();
        if trees < 2 {
            return Err(HuntError::TooFewTrees { got: trees });
        }
        if let Some((position, &degree)) = degrees
            .iter()
            .enumerate()
            .find(|&(_, &degree)| degree == 0 || degree >= trees)
        {
            return Err(HuntError::InvalidDegree {
                position,
                degree,
                trees,
            });
        }
        Ok(Self { degrees })
    }

    /// Draws `trees` degrees independently and uniformly from `1..trees`.
    ///
    /// The result is not necessarily graphic.
    ///
    /// # Errors
    /// Returns [`HuntError::TooFewTrees`] when `trees < 2`.
    pub fn random<R: RandomSource + ?Sized>(trees: usize, rng: &mut R) -> Result<Self> {
        if trees < 2 {
            return Err(HuntError::TooFewTrees { got: trees });
        }
        let degrees = (0..trees)
            .map(|_| rng.uniform_inclusive(1, trees - 1))
            .collect();
        Ok(Self { degrees })
    }

    /// Draws random sequences until one passes [`Self::is_graphic`].
    ///
    /// # Errors
    /// Returns [`HuntError::TooFewTrees`] when `trees < 2`, and
    /// [`HuntError::SequenceExhausted`] when `max_draws` sequences were drawn
    /// without finding a graphic one.
    ///
    /// # Examples
    /// ```
    /// use treehunt_core::{DegreeSequence, seeded_rng};
    ///
    /// let mut rng = seeded_rng(11);
    /// let sequence = DegreeSequence::random_graphic(8, &mut rng, 10_000)
    ///     .expect("graphic sequences are common for small forests");
    /// assert!(sequence.is_graphic());
    /// ```
    pub fn random_graphic<R: RandomSource + ?Sized>(
        trees: usize,
        rng: &mut R,
        max_draws: usize,
    ) -> Result<Self> {
        for draw in 1..=max_draws {
            let candidate = Self::random(trees, rng)?;
            if candidate.is_graphic() {
                debug!(trees, draws = draw, "drew graphic degree sequence");
                return Ok(candidate);
            }
        }
        Err(HuntError::SequenceExhausted {
            trees,
            draws: max_draws,
        })
    }

    /// Returns the degrees in tree order.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[usize] { &self.degrees }

    /// Returns the number of trees.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.degrees.len() }

    /// Always `false`: a sequence holds at least two degrees.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.degrees.is_empty() }

    /// Sum of all degrees.
    #[must_use]
    pub fn total(&self) -> usize {
        self.degrees.iter().sum()
    }

    /// Number of edges a realisation would have (half the degree total).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.total().div_euclid(2)
    }

    /// Tests whether some simple graph realises this sequence.
    #[must_use]
    pub fn is_graphic(&self) -> bool {
        is_graphic(&self.degrees)
    }
}

impl From<DegreeSequence> for Vec<usize> {
    fn from(sequence: DegreeSequence) -> Self {
        sequence.degrees
    }
}

/// Erdős–Gallai test: returns `true` iff a simple undirected graph with
/// exactly these degrees exists.
///
/// The sequence need not be sorted. Sequences shorter than two entries are
/// rejected.
///
/// # Examples
/// ```
/// use treehunt_core::is_graphic;
///
/// assert!(is_graphic(&[1, 1]));
/// assert!(is_graphic(&[2, 2, 2]));
/// assert!(!is_graphic(&[2, 1, 1, 1]));
/// ```
#[must_use]
pub fn is_graphic(degrees: &[usize]) -> bool {
    let trees = degrees.len();
    if trees < 2 {
        return false;
    }

    let mut sorted = degrees.to_vec();
    sorted.sort_unstable_by_key(|&degree| Reverse(degree));

    if !sorted.iter().sum::<usize>().is_multiple_of(2) {
        return false;
    }

    let mut prefix = 0usize;
    for (r, &degree) in (1..).zip(&sorted) {
        prefix += degree;
        let tail: usize = sorted.iter().skip(r).map(|&rest| rest.min(r)).sum();
        if prefix > r * (r - 1) + tail {
            return false;
        }
    }
    true
}
