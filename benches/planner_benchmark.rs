#[macro_use]
extern crate criterion;

use criterion::{black_box, BenchmarkId, Criterion};
use elevator_dispatch::{
    BuildingConfig, JointAction, MonteCarloPlanner, PlannerConfig, State,
};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Runs a random walk so the benchmarks start from a busy building
fn warmed_up_state(elevators: usize, floors: usize, ticks: usize) -> State {
    let mut rng = ChaCha8Rng::seed_from_u64(182);
    let config = BuildingConfig::new(elevators, floors, 10, 0.25);
    let mut state = State::new_episode(config).unwrap();
    for _ in 0..ticks {
        let actions = state.legal_actions().unwrap();
        let action = actions.choose(&mut rng).unwrap().clone();
        state = state.step(&action, &mut rng).unwrap();
    }
    state
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    // Joint action sets grow exponentially with the number of elevators
    for elevators in [1usize, 2, 4].iter() {
        let state = warmed_up_state(*elevators, 10, 50);

        group.bench_with_input(
            BenchmarkId::new("legal_actions", elevators),
            elevators,
            |b, &_| b.iter(|| black_box(state.legal_actions())),
        );

        let action: JointAction = state.legal_actions().unwrap()[0].clone();
        group.bench_with_input(BenchmarkId::new("step", elevators), elevators, |b, &_| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            b.iter(|| black_box(state.step(&action, &mut rng)))
        });
    }

    group.finish();
}

fn bench_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner");
    group.measurement_time(Duration::from_secs(10));

    // Test different rollout budgets, sequential and parallel
    for &rollouts in &[50usize, 100, 400] {
        let state = warmed_up_state(2, 10, 50);

        for parallel in [false, true] {
            let config = PlannerConfig::default()
                .with_rollouts(rollouts)
                .with_parallel(parallel);
            let name = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(name, rollouts), &rollouts, |b, &_| {
                let mut rng = ChaCha8Rng::seed_from_u64(11);
                b.iter(|| {
                    let mut planner = MonteCarloPlanner::new(config.clone()).unwrap();
                    black_box(planner.decide(&state, &mut rng))
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_planner);
criterion_main!(benches);
