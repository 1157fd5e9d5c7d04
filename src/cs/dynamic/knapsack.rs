//! 0/1 knapsack solved item by item with backward induction.
//!
//! Stage `i` considers item `i`; its state is the residual capacity `j` and
//! its decision whether item `i` goes into the knapsack. The last item is
//! decided by feasibility alone. Reconstruction walks the items in order,
//! following the residual-capacity pointer.

use log::info;
use std::fmt;
use std::fmt::Write as _;

use crate::cs::dynamic::backward_induction::{
    solve_backward, NoTrace, StagedProblem, Sweep, TrialTrace,
};
use crate::cs::dynamic::stage::Stage;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub weight: usize,
    pub value: f64,
}

impl Item {
    pub fn new(weight: usize, value: f64) -> Self {
        Self { weight, value }
    }
}

/// What to do when taking an item is worth exactly as much as leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Take the item (`>=`).
    #[default]
    PreferInclusion,
    /// Leave the item for a later stage (`>`).
    PreferExclusion,
}

impl TieBreak {
    fn includes(self, with_item: f64, without_item: f64) -> bool {
        match self {
            TieBreak::PreferInclusion => with_item >= without_item,
            TieBreak::PreferExclusion => with_item > without_item,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackConfig {
    pub items: Vec<Item>,
    /// Maximum total weight `W`.
    pub capacity: usize,
    pub tie_break: TieBreak,
    pub sweep: Sweep,
}

impl Default for KnapsackConfig {
    fn default() -> Self {
        Self {
            items: vec![
                Item::new(1, 2.0),
                Item::new(1, 3.0),
                Item::new(2, 4.0),
                Item::new(1, 5.0),
            ],
            capacity: 3,
            tie_break: TieBreak::PreferInclusion,
            sweep: Sweep::BoundaryRowOnly,
        }
    }
}

impl KnapsackConfig {
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::config("Number of items must be greater than zero."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackSolution {
    pub value: f64,
    /// 1-based numbers of the items taken, in item order.
    pub selected: Vec<usize>,
    /// The `(w, v, c)` tables the solution was read from.
    pub stages: Vec<Stage<usize, bool>>,
}

impl KnapsackSolution {
    /// Dumps every stage as `w v c` rows.
    pub fn render_tables(&self) -> String {
        let mut out = String::new();
        for (i, stage) in self.stages.iter().enumerate() {
            let _ = writeln!(out, "Table {} (w, v, c)", i + 1);
            for (w, v, c) in stage.rows() {
                let _ = writeln!(out, "{:5} {:5.2} {:5}", w, v, u8::from(c));
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for KnapsackSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knapsack value: {:.2}", self.value)?;
        writeln!(f, "Items inside:")?;
        for item in &self.selected {
            writeln!(f, "\tItem {}", item)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct KnapsackProblem {
    config: KnapsackConfig,
}

impl KnapsackProblem {
    pub fn new(config: KnapsackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KnapsackConfig {
        &self.config
    }

    /// Builds one table per item and walks them to find the items taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagedp::cs::dynamic::knapsack::{KnapsackConfig, KnapsackProblem};
    ///
    /// // weights 1, 1, 2, 1 and values 2, 3, 4, 5 with capacity 3
    /// let problem = KnapsackProblem::new(KnapsackConfig::default()).unwrap();
    /// let solution = problem.solve().unwrap();
    ///
    /// assert_eq!(solution.value, 10.0);
    /// assert_eq!(solution.selected, vec![1, 2, 4]);
    /// ```
    pub fn solve(&self) -> Result<KnapsackSolution> {
        self.solve_traced(&mut NoTrace)
    }

    /// Like [`solve`](Self::solve), reporting every trial to `trace`.
    pub fn solve_traced<T>(&self, trace: &mut T) -> Result<KnapsackSolution>
    where
        T: TrialTrace<usize, bool>,
    {
        let stages = solve_backward(self, self.config.sweep, trace)?;
        let solution = self.reconstruct(stages);
        info!(
            "knapsack solved: {} items, W={}, value {:.2}",
            self.config.items.len(),
            self.config.capacity,
            solution.value
        );
        Ok(solution)
    }

    fn reconstruct(&self, stages: Vec<Stage<usize, bool>>) -> KnapsackSolution {
        let capacity = self.config.capacity;
        let value = stages[0].value(stages[0].last_row());

        let mut selected = Vec::new();
        let mut ptr = capacity;
        for (i, (item, stage)) in self.config.items.iter().zip(&stages).enumerate() {
            // a boundary-only stage starts its axis at W instead of 0
            let row = ptr - stage.state(0);
            if stage.decision(row) {
                selected.push(i + 1);
                ptr -= item.weight;
            }
        }

        KnapsackSolution {
            value,
            selected,
            stages,
        }
    }
}

impl StagedProblem for KnapsackProblem {
    type State = usize;
    type Decision = bool;

    fn stage_count(&self) -> usize {
        self.config.items.len()
    }

    fn state_axis(&self, _stage: usize) -> Result<Vec<usize>> {
        let rows = self
            .config
            .capacity
            .checked_add(1)
            .ok_or_else(|| Error::config("Knapsack capacity 'W' is too large."))?;
        let mut axis = Vec::new();
        axis.try_reserve_exact(rows)?;
        axis.extend(0..=self.config.capacity);
        Ok(axis)
    }

    fn evaluate_terminal<T>(&self, stage: usize, j: usize, trace: &mut T) -> (f64, bool)
    where
        T: TrialTrace<usize, bool>,
    {
        let item = &self.config.items[stage];
        let (value, include) = if j >= item.weight {
            (item.value, true)
        } else {
            (0.0, false)
        };
        trace.record(j, include, value);
        (value, include)
    }

    fn evaluate_interior<T>(
        &self,
        stage: usize,
        j: usize,
        next: &Stage<usize, bool>,
        trace: &mut T,
    ) -> (f64, bool)
    where
        T: TrialTrace<usize, bool>,
    {
        let item = &self.config.items[stage];
        let without_item = next.value(j);
        trace.record(j, false, without_item);

        if j >= item.weight {
            let with_item = item.value + next.value(j - item.weight);
            trace.record(j, true, with_item);
            if self.config.tie_break.includes(with_item, without_item) {
                return (with_item, true);
            }
        }
        (without_item, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(items: Vec<Item>, capacity: usize, tie_break: TieBreak) -> KnapsackSolution {
        let config = KnapsackConfig {
            items,
            capacity,
            tie_break,
            sweep: Sweep::Full,
        };
        KnapsackProblem::new(config).unwrap().solve().unwrap()
    }

    #[test]
    fn test_tables_match_hand_computation() {
        let config = KnapsackConfig {
            sweep: Sweep::Full,
            ..KnapsackConfig::default()
        };
        let solution = KnapsackProblem::new(config).unwrap().solve().unwrap();
        let stages = &solution.stages;

        assert_eq!(stages[3].values(), &[0.0, 5.0, 5.0, 5.0]);
        assert_eq!(stages[3].decisions(), &[false, true, true, true]);
        assert_eq!(stages[2].values(), &[0.0, 5.0, 5.0, 9.0]);
        assert_eq!(stages[2].decisions(), &[false, false, false, true]);
        assert_eq!(stages[1].values(), &[0.0, 5.0, 8.0, 9.0]);
        assert_eq!(stages[1].decisions(), &[false, false, true, false]);
        assert_eq!(stages[0].value(3), 10.0);
        assert!(stages[0].decision(3));
    }

    #[test]
    fn test_tie_break_policies() {
        let items = vec![Item::new(1, 5.0), Item::new(1, 5.0)];

        let inclusive = solve(items.clone(), 1, TieBreak::PreferInclusion);
        assert_eq!(inclusive.value, 5.0);
        assert_eq!(inclusive.selected, vec![1]);

        let exclusive = solve(items, 1, TieBreak::PreferExclusion);
        assert_eq!(exclusive.value, 5.0);
        assert_eq!(exclusive.selected, vec![2]);
    }

    #[test]
    fn test_item_heavier_than_capacity() {
        let solution = solve(
            vec![Item::new(4, 100.0), Item::new(1, 1.0)],
            3,
            TieBreak::default(),
        );
        assert_eq!(solution.value, 1.0);
        assert_eq!(solution.selected, vec![2]);
    }

    #[test]
    fn test_single_item() {
        let config = KnapsackConfig {
            items: vec![Item::new(2, 7.0)],
            capacity: 2,
            ..KnapsackConfig::default()
        };
        let solution = KnapsackProblem::new(config).unwrap().solve().unwrap();
        assert_eq!(solution.stages.len(), 1);
        assert_eq!(solution.stages[0].len(), 1);
        assert_eq!(solution.value, 7.0);
        assert_eq!(solution.selected, vec![1]);
    }

    #[test]
    fn test_oversized_capacity_is_an_error() {
        let config = KnapsackConfig {
            capacity: usize::MAX,
            ..KnapsackConfig::default()
        };
        let problem = KnapsackProblem::new(config).unwrap();
        assert!(matches!(problem.solve(), Err(Error::Configuration(_))));

        let config = KnapsackConfig {
            capacity: usize::MAX / 2,
            ..KnapsackConfig::default()
        };
        let problem = KnapsackProblem::new(config).unwrap();
        assert!(matches!(problem.solve(), Err(Error::ResourceExhausted(_))));
    }

    #[test]
    fn test_no_items_is_a_configuration_error() {
        let config = KnapsackConfig {
            items: Vec::new(),
            ..KnapsackConfig::default()
        };
        let err = KnapsackProblem::new(config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(err.to_string(), "Number of items must be greater than zero.");
    }

    #[test]
    fn test_report_format() {
        let solution = KnapsackProblem::new(KnapsackConfig::default())
            .unwrap()
            .solve()
            .unwrap();
        assert_eq!(
            solution.to_string(),
            "Knapsack value: 10.00\nItems inside:\n\tItem 1\n\tItem 2\n\tItem 4\n"
        );

        let tables = solution.render_tables();
        assert!(tables.starts_with("Table 1 (w, v, c)\n    3 10.00     1\n\nTable 2 (w, v, c)\n"));
        assert!(tables.contains("    2  8.00     1\n"));
    }
}
