//! Backward-induction engine shared by the staged solvers.
//!
//! A problem supplies the state axis of each stage and two ways to evaluate a
//! state: a closed-form rule for the terminal stage and a recurrence that
//! reads the already-built next stage. The engine builds the tables from the
//! last stage to the first; every stage is written exactly once.

use log::{debug, trace};
use std::fmt::Debug;

use crate::cs::dynamic::stage::Stage;
use crate::error::Result;

/// Receives every trial a solver examines while building its tables.
pub trait TrialTrace<S, D> {
    /// Called once per candidate decision evaluated at `state`.
    fn record(&mut self, state: S, decision: D, value: f64);

    /// Called after the last trial of each state row.
    fn end_row(&mut self) {}
}

/// A [`TrialTrace`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl<S, D> TrialTrace<S, D> for NoTrace {
    fn record(&mut self, _state: S, _decision: D, _value: f64) {}
}

/// A multi-stage decision problem solvable by backward induction.
pub trait StagedProblem {
    /// Discretized resource level at a stage.
    type State: Copy + PartialOrd + Debug;
    /// Action recorded for each state so the path can be replayed.
    type Decision: Copy + Debug;

    /// Number of stages. Stage `stage_count() - 1` is terminal.
    fn stage_count(&self) -> usize;

    /// The ascending state axis of `stage`.
    fn state_axis(&self, stage: usize) -> Result<Vec<Self::State>>;

    /// Best value and decision at `state` of the terminal stage.
    fn evaluate_terminal<T>(
        &self,
        stage: usize,
        state: Self::State,
        trace: &mut T,
    ) -> (f64, Self::Decision)
    where
        T: TrialTrace<Self::State, Self::Decision>;

    /// Best value and decision at `state`, given the finished next stage.
    fn evaluate_interior<T>(
        &self,
        stage: usize,
        state: Self::State,
        next: &Stage<Self::State, Self::Decision>,
        trace: &mut T,
    ) -> (f64, Self::Decision)
    where
        T: TrialTrace<Self::State, Self::Decision>;
}

/// How a stage is evaluated. Chosen once per stage.
#[derive(Debug, Clone, Copy)]
pub enum StageRule<'a, S, D> {
    /// Closed-form rule; there is no later stage.
    Terminal,
    /// Recurrence over the already-built next stage.
    Interior { next: &'a Stage<S, D> },
}

/// Which rows of the first stage to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sweep {
    /// Every row of every stage.
    Full,
    /// Only the last row of stage 0, the row reconstruction starts from.
    /// All other stages are still built in full.
    #[default]
    BoundaryRowOnly,
}

/// Builds every stage table of `problem`, last stage first.
///
/// The returned vector is in stage order: index 0 is the first stage. With
/// [`Sweep::BoundaryRowOnly`] the first stage holds a single row equal to the
/// last row a full sweep would have produced.
///
/// # Examples
///
/// ```
/// use stagedp::cs::dynamic::backward_induction::{solve_backward, NoTrace, Sweep};
/// use stagedp::cs::dynamic::knapsack::{Item, KnapsackConfig, KnapsackProblem};
///
/// let config = KnapsackConfig {
///     items: vec![Item::new(1, 2.0), Item::new(2, 3.0)],
///     capacity: 2,
///     ..KnapsackConfig::default()
/// };
/// let problem = KnapsackProblem::new(config).unwrap();
/// let stages = solve_backward(&problem, Sweep::Full, &mut NoTrace).unwrap();
///
/// assert_eq!(stages.len(), 2);
/// assert_eq!(stages[0].values(), &[0.0, 2.0, 3.0]);
/// ```
pub fn solve_backward<P, T>(
    problem: &P,
    sweep: Sweep,
    trace: &mut T,
) -> Result<Vec<Stage<P::State, P::Decision>>>
where
    P: StagedProblem,
    T: TrialTrace<P::State, P::Decision>,
{
    let count = problem.stage_count();
    let mut built: Vec<Stage<P::State, P::Decision>> = Vec::new();
    built.try_reserve_exact(count)?;

    for stage in (0..count).rev() {
        // `built` holds stages stage+1..count in reverse, so its tail is stage+1
        let rule = match built.last() {
            None => StageRule::Terminal,
            Some(next) => StageRule::Interior { next },
        };
        let table = build_stage(problem, stage, rule, sweep, trace)?;
        debug!("built stage {} of {} ({} rows)", stage + 1, count, table.len());
        built.push(table);
    }

    built.reverse();
    Ok(built)
}

fn build_stage<P, T>(
    problem: &P,
    stage: usize,
    rule: StageRule<'_, P::State, P::Decision>,
    sweep: Sweep,
    trace: &mut T,
) -> Result<Stage<P::State, P::Decision>>
where
    P: StagedProblem,
    T: TrialTrace<P::State, P::Decision>,
{
    let axis = problem.state_axis(stage)?;
    let rows = match sweep {
        Sweep::BoundaryRowOnly if stage == 0 => &axis[axis.len().saturating_sub(1)..],
        _ => &axis[..],
    };

    let mut table = Stage::with_rows(rows.len())?;
    match rule {
        StageRule::Terminal => {
            for &state in rows {
                let (value, decision) = problem.evaluate_terminal(stage, state, trace);
                trace!("stage {stage} terminal row {state:?}: {value} via {decision:?}");
                table.push(state, value, decision);
                trace.end_row();
            }
        }
        StageRule::Interior { next } => {
            for &state in rows {
                let (value, decision) = problem.evaluate_interior(stage, state, next, trace);
                trace!("stage {stage} row {state:?}: {value} via {decision:?}");
                table.push(state, value, decision);
                trace.end_row();
            }
        }
    }
    Ok(table)
}
