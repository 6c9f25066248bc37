//! Edge lists for well-known forest shapes.
//!
//! Every helper returns undirected edges as `(u, v)` pairs with `u < v`
//! over trees `0..trees`.

/// Path `0 - 1 - ... - (trees - 1)`.
///
/// # Examples
/// ```
/// use treehunt_test_support::fixtures::path_edges;
///
/// assert_eq!(path_edges(4), vec![(0, 1), (1, 2), (2, 3)]);
/// ```
#[must_use]
pub fn path_edges(trees: usize) -> Vec<(usize, usize)> {
    (1..trees).map(|tree| (tree - 1, tree)).collect()
}

/// Path closed into a ring; needs at least three trees.
#[must_use]
pub fn cycle_edges(trees: usize) -> Vec<(usize, usize)> {
    let mut edges = path_edges(trees);
    if trees >= 3 {
        edges.push((0, trees - 1));
    }
    edges
}

/// Star centred on tree `0`.
#[must_use]
pub fn star_edges(trees: usize) -> Vec<(usize, usize)> {
    (1..trees).map(|leaf| (0, leaf)).collect()
}

/// Every pair of trees joined.
#[must_use]
pub fn complete_edges(trees: usize) -> Vec<(usize, usize)> {
    (0..trees)
        .flat_map(|left| (left + 1..trees).map(move |right| (left, right)))
        .collect()
}

/// `legs` paths of `length` trees hanging off centre `0`, for
/// `1 + legs * length` trees in total.
///
/// # Examples
/// ```
/// use treehunt_test_support::fixtures::spider_edges;
///
/// assert_eq!(spider_edges(2, 2), vec![(0, 1), (1, 2), (0, 3), (3, 4)]);
/// ```
#[must_use]
pub fn spider_edges(legs: usize, length: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::with_capacity(legs * length);
    for leg in 0..legs {
        let first = 1 + leg * length;
        edges.push((0, first));
        edges.extend((first + 1..first + length).map(|tree| (tree - 1, tree)));
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(path_edges(6), 5)]
    #[case(cycle_edges(6), 6)]
    #[case(star_edges(6), 5)]
    #[case(complete_edges(6), 15)]
    #[case(spider_edges(3, 2), 6)]
    fn fixtures_have_expected_edge_counts(#[case] edges: Vec<(usize, usize)>, #[case] count: usize) {
        assert_eq!(edges.len(), count);
        assert!(edges.iter().all(|&(left, right)| left < right));
    }

    #[test]
    fn tiny_cycles_stay_simple() {
        assert_eq!(cycle_edges(2), vec![(0, 1)]);
    }
}
