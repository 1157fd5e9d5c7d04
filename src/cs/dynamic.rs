pub mod backward_induction;
pub mod investment;
pub mod knapsack;
pub mod stage;
pub mod trace;


// Re-export the solvers with descriptive names
pub use backward_induction::{
    solve_backward, NoTrace, StageRule, StagedProblem, Sweep, TrialTrace,
};
pub use investment::{IncomeModel, InvestmentConfig, InvestmentPlan, InvestmentProblem, Split};
pub use knapsack::{Item, KnapsackConfig, KnapsackProblem, KnapsackSolution, TieBreak};
pub use stage::Stage;
pub use trace::CsvTrace;
