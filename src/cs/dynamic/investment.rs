//! Multi-stage investment allocation.
//!
//! At each stage the available capital `K` is split between two accounts:
//! `X` goes to the first and `Y = K - X` to the second. Each account pays an
//! income this stage and returns a fraction of its principal for the next
//! one. At the final stage the split is fixed at `X = K / R`. The solver
//! discretizes the capital range of every stage, builds the tables backward
//! and replays the best splits forward.

use log::info;
use std::fmt;
use std::fmt::Write as _;

use crate::cs::dynamic::backward_induction::{
    solve_backward, NoTrace, StagedProblem, Sweep, TrialTrace,
};
use crate::cs::dynamic::stage::Stage;
use crate::cs::search::{bracket, SearchStrategy};
use crate::error::{Error, Result};

/// Income and depreciation of the two accounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeModel {
    pub base_x: f64,
    pub scale_x: f64,
    pub base_y: f64,
    pub scale_y: f64,
    /// Exponent applied to the amount invested in either account.
    pub exponent: f64,
    /// Fraction of `X` still available after one stage.
    pub retain_x: f64,
    /// Fraction of `Y` still available after one stage.
    pub retain_y: f64,
}

impl IncomeModel {
    /// Income grows with the two-thirds power of the amount invested.
    pub fn coarse() -> Self {
        Self {
            base_x: 150.0,
            scale_x: 0.8,
            base_y: 110.0,
            scale_y: 1.6,
            exponent: 2.0 / 3.0,
            retain_x: 0.74,
            retain_y: 0.87,
        }
    }

    /// Same model with the exponent rounded to `0.67`.
    pub fn fine() -> Self {
        Self {
            exponent: 0.67,
            ..Self::coarse()
        }
    }

    pub fn income_x(&self, x: f64) -> f64 {
        self.base_x + self.scale_x * x.powf(self.exponent)
    }

    pub fn income_y(&self, y: f64) -> f64 {
        self.base_y + self.scale_y * y.powf(self.exponent)
    }

    /// Income of one stage when `x` of the capital `k` goes to the first account.
    pub fn income(&self, k: f64, x: f64) -> f64 {
        self.income_x(x) + self.income_y(k - x)
    }

    /// What remains of `x` after `periods` stages in the first account.
    pub fn balance_x(&self, x: f64, periods: usize) -> f64 {
        self.retain_x.powf(periods as f64) * x
    }

    /// What remains of `y` after `periods` stages in the second account.
    pub fn balance_y(&self, y: f64, periods: usize) -> f64 {
        self.retain_y.powf(periods as f64) * y
    }

    /// Capital available after `periods` stages of the split `(x, k - x)`.
    pub fn balance(&self, k: f64, x: f64, periods: usize) -> f64 {
        self.balance_x(x, periods) + self.balance_y(k - x, periods)
    }
}

impl Default for IncomeModel {
    fn default() -> Self {
        Self::coarse()
    }
}

/// Parameters of an investment run.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentConfig {
    /// Initial capital `K`.
    pub capital: f64,
    /// Number of stages `m`.
    pub stages: usize,
    /// Steps between the lowest and highest capital of a stage; each stage
    /// has `state_steps + 1` rows.
    pub state_steps: usize,
    /// Steps between investing nothing and everything in `X`.
    pub decision_steps: usize,
    /// At the last stage `X = K / terminal_ratio`.
    pub terminal_ratio: f64,
    pub model: IncomeModel,
    pub search: SearchStrategy,
    pub sweep: Sweep,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            capital: 185.0,
            stages: 4,
            state_steps: 10,
            decision_steps: 10,
            terminal_ratio: 9.0,
            model: IncomeModel::coarse(),
            search: SearchStrategy::Linear,
            sweep: Sweep::BoundaryRowOnly,
        }
    }
}

impl InvestmentConfig {
    /// A thousand steps on both axes, looked up with binary search.
    pub fn fine() -> Self {
        Self {
            state_steps: 1000,
            decision_steps: 1000,
            model: IncomeModel::fine(),
            search: SearchStrategy::Binary,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.capital.is_finite() || self.capital <= 0.0 {
            return Err(Error::config(
                "Initial amount of investment 'K' must be greater than zero.",
            ));
        }
        if self.stages == 0 {
            return Err(Error::config(
                "Number of stages 'm' must be greater than zero.",
            ));
        }
        if self.state_steps == 0 || self.decision_steps == 0 {
            return Err(Error::config(
                "Discretization steps must be greater than zero.",
            ));
        }
        if !self.terminal_ratio.is_finite() || self.terminal_ratio <= 0.0 {
            return Err(Error::config(
                "Terminal split ratio 'R' must be greater than zero.",
            ));
        }
        Ok(())
    }
}

/// Amounts placed in each account at one stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub x: f64,
    pub y: f64,
}

/// Result of an investment run.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentPlan {
    /// Total income over all stages.
    pub total_income: f64,
    /// Chosen split for every stage, first stage first.
    pub splits: Vec<Split>,
    /// The `(K, w, X)` tables the plan was read from.
    pub stages: Vec<Stage<f64, f64>>,
}

impl InvestmentPlan {
    /// Dumps every stage as `K, w, X` rows.
    pub fn render_tables(&self) -> String {
        let mut out = String::new();
        for (i, stage) in self.stages.iter().enumerate() {
            let _ = writeln!(out, "Table {} (K, w, X)", i + 1);
            for (k, w, x) in stage.rows() {
                let _ = writeln!(out, "{:6.2}, {:6.2}, {:6.2}", k, w, x);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for InvestmentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total income: {:.2}", self.total_income)?;
        for (i, split) in self.splits.iter().enumerate() {
            writeln!(f, "\tStage {}: X={:6.2}, Y={:6.2}", i + 1, split.x, split.y)?;
        }
        Ok(())
    }
}

/// A validated investment problem.
#[derive(Debug, Clone)]
pub struct InvestmentProblem {
    config: InvestmentConfig,
}

impl InvestmentProblem {
    pub fn new(config: InvestmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InvestmentConfig {
        &self.config
    }

    /// Builds the tables and reconstructs the best plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagedp::cs::dynamic::investment::{InvestmentConfig, InvestmentProblem};
    ///
    /// let problem = InvestmentProblem::new(InvestmentConfig::default()).unwrap();
    /// let plan = problem.solve().unwrap();
    ///
    /// assert_eq!(format!("{:.2}", plan.total_income), "1224.23");
    /// assert_eq!(plan.splits.len(), 4);
    /// ```
    pub fn solve(&self) -> Result<InvestmentPlan> {
        self.solve_traced(&mut NoTrace)
    }

    /// Like [`solve`](Self::solve), reporting every `(K, X, w)` trial to `trace`.
    pub fn solve_traced<T>(&self, trace: &mut T) -> Result<InvestmentPlan>
    where
        T: TrialTrace<f64, f64>,
    {
        let stages = solve_backward(self, self.config.sweep, trace)?;
        let plan = self.reconstruct(stages);
        info!(
            "investment solved: K={}, m={}, total income {:.2}",
            self.config.capital, self.config.stages, plan.total_income
        );
        Ok(plan)
    }

    /// Replays the recorded decisions from the boundary row of stage 0.
    fn reconstruct(&self, stages: Vec<Stage<f64, f64>>) -> InvestmentPlan {
        let model = &self.config.model;
        let first = &stages[0];
        let row = first.last_row();

        let total_income = first.value(row);
        let mut x = first.decision(row);
        let mut y = first.state(row) - x;
        let mut splits = Vec::with_capacity(stages.len());
        splits.push(Split { x, y });

        for next in &stages[1..] {
            let k_next = model.balance(x + y, x, 1);
            let row = bracket(self.config.search, next.states(), k_next);
            x = next.decision(row);
            y = next.state(row) - x;
            splits.push(Split { x, y });
        }

        InvestmentPlan {
            total_income,
            splits,
            stages,
        }
    }
}

impl StagedProblem for InvestmentProblem {
    type State = f64;
    type Decision = f64;

    fn stage_count(&self) -> usize {
        self.config.stages
    }

    /// Capital at stage `i` lies between keeping everything in `X` for `i`
    /// stages and keeping everything in `Y`.
    fn state_axis(&self, stage: usize) -> Result<Vec<f64>> {
        let model = &self.config.model;
        let n = self.config.state_steps;
        let k_min = model.balance_x(self.config.capital, stage);
        let k_step = (model.balance_y(self.config.capital, stage) - k_min) / n as f64;

        let rows = n
            .checked_add(1)
            .ok_or_else(|| Error::config("Too many discretization steps."))?;
        let mut axis = Vec::new();
        axis.try_reserve_exact(rows)?;
        let mut k = k_min;
        for _ in 0..=n {
            axis.push(k);
            k += k_step;
        }
        Ok(axis)
    }

    fn evaluate_terminal<T>(&self, _stage: usize, k: f64, trace: &mut T) -> (f64, f64)
    where
        T: TrialTrace<f64, f64>,
    {
        let x = k / self.config.terminal_ratio;
        let w = self.config.model.income(k, x);
        // one record per decision grid point, like an interior row
        for _ in 0..=self.config.decision_steps {
            trace.record(k, x, w);
        }
        (w, x)
    }

    fn evaluate_interior<T>(
        &self,
        _stage: usize,
        k: f64,
        next: &Stage<f64, f64>,
        trace: &mut T,
    ) -> (f64, f64)
    where
        T: TrialTrace<f64, f64>,
    {
        let model = &self.config.model;
        let x_step = k / self.config.decision_steps as f64;
        let mut x = 0.0;
        let mut best_w = f64::NEG_INFINITY;
        let mut best_x = 0.0;

        for _ in 0..=self.config.decision_steps {
            let k_next = model.balance(k, x, 1);
            let row = bracket(self.config.search, next.states(), k_next);
            let w = model.income(k, x) + next.value(row);
            trace.record(k, x, w);
            // strict: the first maximum found wins ties
            if w > best_w {
                best_w = w;
                best_x = x;
            }
            x += x_step;
        }

        (best_w, best_x)
    }
}
