//! Fine-grained investment allocation: a thousand steps on each axis.
//!
//! Set `TRACE_PATH` to dump every examined `(K, X, w)` trial as CSV.

use std::process::ExitCode;

use log::info;
use stagedp::cs::dynamic::investment::{InvestmentConfig, InvestmentPlan, InvestmentProblem};
use stagedp::cs::dynamic::trace::CsvTrace;

const CAPITAL: f64 = 185.0;
const STAGES: usize = 4;
const PRINT_TABLES: bool = false;
const TRACE_PATH: Option<&str> = None;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = InvestmentConfig {
        capital: CAPITAL,
        stages: STAGES,
        ..InvestmentConfig::fine()
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: InvestmentConfig) -> stagedp::Result<()> {
    let problem = InvestmentProblem::new(config)?;
    let plan = match TRACE_PATH {
        Some(path) => solve_with_trace(&problem, path)?,
        None => problem.solve()?,
    };

    if PRINT_TABLES {
        print!("{}", plan.render_tables());
    }
    print!("{plan}");
    Ok(())
}

fn solve_with_trace(problem: &InvestmentProblem, path: &str) -> stagedp::Result<InvestmentPlan> {
    let mut trace = CsvTrace::create(path)?;
    let plan = problem.solve_traced(&mut trace)?;
    trace.finish()?;
    info!("wrote trial trace to {path}");
    Ok(plan)
}
