//! Sequential importance sampling of a simple graph with prescribed degrees.
//!
//! Implements procedure A of Bayati, M., Kim, J.H. and Saberi, A.
//! "A Sequential Algorithm for Generating Random Graphs", Algorithmica 58,
//! 860-910, 2010. Edges are drawn one at a time with probability
//! proportional to `d_i * d_j * (1 - D_i * D_j / 4m)`, where `d` are the
//! remaining degrees and `D` the prescribed ones.
//!
//! Pair tables use symmetric column storage without the diagonal: pairs
//! `(i, j)` with `i > j` are enumerated column by column.

use crate::random::RandomSource;

use super::degree::DegreeSequence;

/// Returned when the sampling cursor runs past the last pair. The caller
/// discards the attempt and restarts from a fresh degree sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PrecisionLoss {
    pub(crate) level: f64,
    pub(crate) total: f64,
}

/// Strictly lower-triangular boolean adjacency in column storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EdgeMatrix {
    trees: usize,
    cells: Vec<bool>,
}

impl EdgeMatrix {
    pub(crate) fn new(trees: usize) -> Self {
        Self {
            trees,
            cells: vec![false; pair_count(trees)],
        }
    }

    pub(crate) const fn trees(&self) -> usize {
        self.trees
    }

    pub(crate) fn contains(&self, left: usize, right: usize) -> bool {
        left != right && self.contains_pair(pair_index(self.trees, left, right))
    }

    /// Joins `left` and `right`; `left != right`.
    pub(crate) fn insert(&mut self, left: usize, right: usize) {
        self.insert_pair(pair_index(self.trees, left, right));
    }

    fn contains_pair(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    fn insert_pair(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = true;
        }
    }
}

/// Number of unordered pairs of distinct trees.
pub(crate) const fn pair_count(trees: usize) -> usize {
    (trees * trees.saturating_sub(1)).div_euclid(2)
}

/// Plain index of the unordered pair `{left, right}`; `left != right`.
pub(crate) const fn pair_index(trees: usize, left: usize, right: usize) -> usize {
    let (i, j) = if left > right {
        (left, right)
    } else {
        (right, left)
    };
    (j * (2 * trees - j - 1)).div_euclid(2) + (i - j - 1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pair {
    index: usize,
    row: usize,
    column: usize,
}

/// Visits every pair in storage order.
fn pairs(trees: usize) -> impl Iterator<Item = Pair> {
    (0..trees).flat_map(move |column| {
        let base = pair_index(trees, column + 1, column);
        (column + 1..trees).map(move |row| Pair {
            index: base + (row - column - 1),
            row,
            column,
        })
    })
}

fn degree_at(degrees: &[usize], tree: usize) -> usize {
    degrees.get(tree).copied().unwrap_or(0)
}

/// One run of the sampler over a fixed degree sequence.
pub(crate) struct SisBuilder {
    trees: usize,
    remaining: Vec<usize>,
    probabilities: Vec<f64>,
    matrix: EdgeMatrix,
    remaining_edges: usize,
    weight_sum: f64,
}

impl SisBuilder {
    #[expect(
        clippy::float_arithmetic,
        reason = "edge probabilities are real-valued"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "degree products stay far below 2^52"
    )]
    pub(crate) fn new(sequence: &DegreeSequence) -> Self {
        let degrees = sequence.as_slice();
        let trees = degrees.len();
        let remaining_edges = sequence.edge_count();
        let scale = (remaining_edges * 4) as f64;

        // `pairs` yields storage order, so position equals pair index.
        let probabilities = pairs(trees)
            .map(|pair| {
                let product = degree_at(degrees, pair.row) * degree_at(degrees, pair.column);
                // Negative probabilities would break the cumulative walk.
                (1.0 - product as f64 / scale).max(0.0)
            })
            .collect();

        let mut builder = Self {
            trees,
            remaining: degrees.to_vec(),
            probabilities,
            matrix: EdgeMatrix::new(trees),
            remaining_edges,
            weight_sum: 0.0,
        };
        builder.weight_sum = builder.sum_weights();
        if builder.weight_sum <= 0.0 {
            builder.remaining_edges = 0;
        }
        builder
    }

    /// Draws edges until none remain or no pair can be scored.
    pub(crate) fn build<R: RandomSource + ?Sized>(
        mut self,
        rng: &mut R,
    ) -> Result<EdgeMatrix, PrecisionLoss> {
        while self.remaining_edges > 0 {
            let pair = self.select(rng)?;
            self.update(pair);
        }
        Ok(self.matrix)
    }

    #[expect(clippy::float_arithmetic, reason = "importance weights")]
    #[expect(
        clippy::cast_precision_loss,
        reason = "degree products stay far below 2^52"
    )]
    fn weight(&self, pair: Pair) -> f64 {
        if self.matrix.contains_pair(pair.index) {
            return 0.0;
        }
        let product =
            degree_at(&self.remaining, pair.row) * degree_at(&self.remaining, pair.column);
        let probability = self.probabilities.get(pair.index).copied().unwrap_or(0.0);
        product as f64 * probability
    }

    fn sum_weights(&self) -> f64 {
        pairs(self.trees).map(|pair| self.weight(pair)).sum()
    }

    #[expect(clippy::float_arithmetic, reason = "cumulative weight walk")]
    fn select<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Pair, PrecisionLoss> {
        let level = self.weight_sum * rng.uniform_unit();
        let mut cumulative = 0.0;
        for pair in pairs(self.trees) {
            cumulative += self.weight(pair);
            if cumulative > level {
                return Ok(pair);
            }
        }
        Err(PrecisionLoss {
            level,
            total: self.weight_sum,
        })
    }

    fn update(&mut self, pair: Pair) {
        for tree in [pair.row, pair.column] {
            if let Some(degree) = self.remaining.get_mut(tree) {
                *degree = degree.saturating_sub(1);
            }
        }
        self.matrix.insert_pair(pair.index);
        self.weight_sum = self.sum_weights();
        // A zero sum means no further pair can be scored; stop early.
        self.remaining_edges = if self.weight_sum <= 0.0 {
            0
        } else {
            self.remaining_edges - 1
        };
    }
}
