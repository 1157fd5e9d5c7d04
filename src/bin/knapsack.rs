//! 0/1 knapsack over four fixed items with capacity 3.

use std::process::ExitCode;

use stagedp::cs::dynamic::knapsack::{Item, KnapsackConfig, KnapsackProblem};

const CAPACITY: usize = 3;
const PRINT_TABLES: bool = true;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = KnapsackConfig {
        items: vec![
            Item::new(1, 2.0),
            Item::new(1, 3.0),
            Item::new(2, 4.0),
            Item::new(1, 5.0),
        ],
        capacity: CAPACITY,
        ..KnapsackConfig::default()
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: KnapsackConfig) -> stagedp::Result<()> {
    let solution = KnapsackProblem::new(config)?.solve()?;
    if PRINT_TABLES {
        print!("{}", solution.render_tables());
    }
    print!("{solution}");
    Ok(())
}
