//! Per-stage DP table: a state axis, a value axis and a decision axis of
//! equal length, written once during construction and read-only afterward.

use crate::error::Result;

/// One stage of a backward-induction table.
///
/// Row `r` pairs `states[r]` with the best value reachable from it and the
/// decision achieving that value. States are stored in ascending order so the
/// previous stage can bracket-search them.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage<S, D> {
    states: Vec<S>,
    values: Vec<f64>,
    decisions: Vec<D>,
}

impl<S: Copy, D: Copy> Stage<S, D> {
    /// Allocates an empty stage with room for exactly `rows` rows.
    ///
    /// Allocation failure is reported as [`crate::Error::ResourceExhausted`]
    /// instead of aborting the process.
    pub fn with_rows(rows: usize) -> Result<Self> {
        let mut states = Vec::new();
        let mut values = Vec::new();
        let mut decisions = Vec::new();
        states.try_reserve_exact(rows)?;
        values.try_reserve_exact(rows)?;
        decisions.try_reserve_exact(rows)?;
        Ok(Self {
            states,
            values,
            decisions,
        })
    }

    pub(crate) fn push(&mut self, state: S, value: f64, decision: D) {
        self.states.push(state);
        self.values.push(value);
        self.decisions.push(decision);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no row has been written.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The state axis, ascending.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Best value reachable from each state.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Decision achieving each value.
    pub fn decisions(&self) -> &[D] {
        &self.decisions
    }

    /// State of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    pub fn state(&self, row: usize) -> S {
        self.states[row]
    }

    /// Value of `row`. Panics if `row >= self.len()`.
    pub fn value(&self, row: usize) -> f64 {
        self.values[row]
    }

    /// Decision of `row`. Panics if `row >= self.len()`.
    pub fn decision(&self, row: usize) -> D {
        self.decisions[row]
    }

    /// Index of the last row. This is the boundary row that forward
    /// reconstruction starts from.
    ///
    /// # Panics
    ///
    /// Panics if the stage is empty.
    pub fn last_row(&self) -> usize {
        assert!(!self.is_empty(), "stage has no rows");
        self.len() - 1
    }

    /// Iterates over `(state, value, decision)` triples in row order.
    pub fn rows(&self) -> impl Iterator<Item = (S, f64, D)> + '_ {
        self.states
            .iter()
            .zip(&self.values)
            .zip(&self.decisions)
            .map(|((&s, &v), &d)| (s, v, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_axes_parallel() {
        let mut stage: Stage<usize, bool> = Stage::with_rows(3).unwrap();
        assert!(stage.is_empty());
        stage.push(0, 0.0, false);
        stage.push(1, 5.0, true);
        stage.push(2, 5.0, true);

        assert_eq!(stage.len(), 3);
        assert_eq!(stage.states(), &[0, 1, 2]);
        assert_eq!(stage.values(), &[0.0, 5.0, 5.0]);
        assert_eq!(stage.decisions(), &[false, true, true]);
        assert_eq!(stage.last_row(), 2);
        assert_eq!(
            stage.rows().collect::<Vec<_>>(),
            vec![(0, 0.0, false), (1, 5.0, true), (2, 5.0, true)]
        );
    }

    #[test]
    fn test_oversized_allocation_is_an_error() {
        let result: Result<Stage<f64, f64>> = Stage::with_rows(usize::MAX);
        assert!(matches!(
            result,
            Err(crate::Error::ResourceExhausted(_))
        ));
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range() {
        let mut stage: Stage<usize, bool> = Stage::with_rows(1).unwrap();
        stage.push(0, 0.0, false);
        stage.value(1);
    }

    #[test]
    #[should_panic]
    fn test_last_row_of_empty_stage() {
        let stage: Stage<f64, f64> = Stage::with_rows(0).unwrap();
        stage.last_row();
    }
}
