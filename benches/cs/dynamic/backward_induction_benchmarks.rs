use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use stagedp::cs::dynamic::investment::{InvestmentConfig, InvestmentProblem};
use stagedp::cs::dynamic::knapsack::{Item, KnapsackConfig, KnapsackProblem};
use stagedp::cs::search::SearchStrategy;

fn bench_investment(c: &mut Criterion) {
    let mut group = c.benchmark_group("investment");
    for &steps in &[50usize, 200] {
        for strategy in [SearchStrategy::Linear, SearchStrategy::Binary] {
            let config = InvestmentConfig {
                state_steps: steps,
                decision_steps: steps,
                search: strategy,
                ..InvestmentConfig::default()
            };
            let problem = InvestmentProblem::new(config).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), steps),
                &problem,
                |b, problem| b.iter(|| black_box(problem.solve().unwrap().total_income)),
            );
        }
    }
    group.finish();
}

fn bench_knapsack(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let items: Vec<Item> = (0..100)
        .map(|_| Item::new(rng.gen_range(1..50), rng.gen_range(1.0..100.0)))
        .collect();

    let mut group = c.benchmark_group("knapsack");
    for &capacity in &[100usize, 1000] {
        let config = KnapsackConfig {
            items: items.clone(),
            capacity,
            ..KnapsackConfig::default()
        };
        let problem = KnapsackProblem::new(config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &problem, |b, problem| {
            b.iter(|| black_box(problem.solve().unwrap().value))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_investment, bench_knapsack);
criterion_main!(benches);
