//! Coarse investment allocation: ten steps on each axis, tables printed.

use std::process::ExitCode;

use stagedp::cs::dynamic::investment::{InvestmentConfig, InvestmentProblem};

const CAPITAL: f64 = 185.0;
const STAGES: usize = 4;
const PRINT_TABLES: bool = true;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = InvestmentConfig {
        capital: CAPITAL,
        stages: STAGES,
        ..InvestmentConfig::default()
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
    let plan = InvestmentProblem::new(config)?.solve()?;
    if PRINT_TABLES {
        print!("{}", plan.render_tables());
    }
    print!("{plan}");
    Ok(())
}
