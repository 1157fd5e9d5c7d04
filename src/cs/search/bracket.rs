//! Threshold search over an ascending sequence.
//!
//! The dynamic-programming solvers map a derived next-stage state back onto
//! the discretized state axis of that stage. Both searches here answer the
//! same question: where does a query value fall in a sorted slice.

/// Returns the index of the first element strictly greater than `query`,
/// scanning from the front. Returns `seq.len()` when no element is greater.
///
/// # Examples
///
/// ```
/// use stagedp::cs::search::upper_bound_linear;
///
/// let seq = [1.0, 2.0, 2.0, 3.0];
/// assert_eq!(upper_bound_linear(&seq, 2.0), 3);
/// assert_eq!(upper_bound_linear(&seq, 0.5), 0);
/// assert_eq!(upper_bound_linear(&seq, 3.0), 4);
/// ```
pub fn upper_bound_linear<T: PartialOrd>(seq: &[T], query: T) -> usize {
    let mut idx = 0;
    while idx < seq.len() && query >= seq[idx] {
        idx += 1;
    }
    idx
}

/// Returns the index of the first element strictly greater than `query`
/// using binary search. Same result as [`upper_bound_linear`] in O(log n).
///
/// Precondition: `seq` is sorted ascending.
///
/// # Examples
///
/// ```
/// use stagedp::cs::search::upper_bound_binary;
///
/// let seq = [0, 1, 2, 3, 4, 5];
/// assert_eq!(upper_bound_binary(&seq, 3), 4);
/// assert_eq!(upper_bound_binary(&seq, -1), 0);
/// assert_eq!(upper_bound_binary(&seq, 5), 6);
/// ```
pub fn upper_bound_binary<T: PartialOrd>(seq: &[T], query: T) -> usize {
    let mut lo = 0_usize;
    let mut hi = seq.len(); // exclusive

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if seq[mid] <= query {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    // lo is the smallest index with seq[lo] > query
    lo
}

/// Selects how a solver locates a value on the next stage's state axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Front-to-back scan. Adequate for coarse grids.
    #[default]
    Linear,
    /// Binary search. Needed once the grid has thousands of points.
    Binary,
}

impl SearchStrategy {
    /// Index of the first element strictly greater than `query`.
    pub fn upper_bound<T: PartialOrd>(self, seq: &[T], query: T) -> usize {
        match self {
            SearchStrategy::Linear => upper_bound_linear(seq, query),
            SearchStrategy::Binary => upper_bound_binary(seq, query),
        }
    }
}

/// Returns the row `r` whose bracket contains `query`, i.e.
/// `seq[r] <= query < seq[r + 1]`.
///
/// Queries below the first element map to row `0`; queries at or above the
/// last element map to the last row. The result is always a valid index.
///
/// # Panics
///
/// Panics if `seq` is empty.
///
/// # Examples
///
/// ```
/// use stagedp::cs::search::{bracket, SearchStrategy};
///
/// let axis = [10.0, 20.0, 30.0];
/// assert_eq!(bracket(SearchStrategy::Binary, &axis, 25.0), 1);
/// assert_eq!(bracket(SearchStrategy::Binary, &axis, 20.0), 1);
/// assert_eq!(bracket(SearchStrategy::Linear, &axis, 5.0), 0);
/// assert_eq!(bracket(SearchStrategy::Linear, &axis, 99.0), 2);
/// ```
pub fn bracket<T: PartialOrd>(strategy: SearchStrategy, seq: &[T], query: T) -> usize {
    assert!(!seq.is_empty(), "cannot bracket into an empty axis");
    strategy.upper_bound(seq, query).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_exact_grid_points() {
        let seq: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        for (i, &q) in seq.iter().enumerate() {
            assert_eq!(upper_bound_linear(&seq, q), i + 1);
            assert_eq!(upper_bound_binary(&seq, q), i + 1);
        }
    }

    #[test]
    fn test_boundaries() {
        let seq = [0, 1, 2, 3];
        assert_eq!(upper_bound_binary(&seq, -5), 0);
        assert_eq!(upper_bound_linear(&seq, -5), 0);
        assert_eq!(upper_bound_binary(&seq, 3), 4);
        assert_eq!(upper_bound_linear(&seq, 100), 4);

        assert_eq!(bracket(SearchStrategy::Binary, &seq, -5), 0);
        assert_eq!(bracket(SearchStrategy::Linear, &seq, 3), 3);
        assert_eq!(bracket(SearchStrategy::Binary, &seq, 100), 3);
    }

    #[test]
    fn test_single_element() {
        let seq = [4.5];
        assert_eq!(bracket(SearchStrategy::Linear, &seq, 1.0), 0);
        assert_eq!(bracket(SearchStrategy::Binary, &seq, 4.5), 0);
        assert_eq!(bracket(SearchStrategy::Binary, &seq, 9.0), 0);
    }

    #[test]
    fn test_duplicates_skip_to_last_equal() {
        // A constant axis (the first investment stage) brackets to its last row.
        let seq = [185.0; 11];
        assert_eq!(bracket(SearchStrategy::Linear, &seq, 185.0), 10);
        assert_eq!(bracket(SearchStrategy::Binary, &seq, 185.0), 10);
    }

    #[test]
    fn test_bracket_property_random_queries() {
        let n = 1000;
        let seq: Vec<f64> = (0..=n).map(|i| i as f64).collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..2000 {
            let q: f64 = rng.gen_range(0.0..n as f64);
            let idx = upper_bound_binary(&seq, q);
            assert!(idx >= 1 && idx <= n);
            assert!(seq[idx - 1] <= q && q < seq[idx]);
            assert_eq!(idx, upper_bound_linear(&seq, q));
        }
    }

    #[test]
    #[should_panic]
    fn test_bracket_empty_axis() {
        let seq: [f64; 0] = [];
        bracket(SearchStrategy::Binary, &seq, 1.0);
    }
}
