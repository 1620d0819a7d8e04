//! Runs several seeded episodes with the Monte Carlo planner and with the
//! random baseline, then prints the scores side by side.
//!
//! ```bash
//! RUST_LOG=info cargo run --release --example monte_carlo_dispatch
//! ```

use elevator_dispatch::{
    run_episode, BuildingConfig, DispatchError, MonteCarloPlanner, PlannerConfig, RandomPolicy,
};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EPISODES: u64 = 5;
const TICKS: u64 = 100;

fn main() -> Result<(), DispatchError> {
    env_logger::init();

    let building = BuildingConfig::default()
        .with_elevators(2)
        .with_floors(10)
        .with_capacity(20)
        .with_arrival_intensity(0.25);
    building.validate()?;

    let mut planner = MonteCarloPlanner::new(PlannerConfig::default().with_parallel(true))?;
    let mut baseline = RandomPolicy::new();

    println!(
        "Building: {} elevators, {} floors, capacity {}, intensity {}",
        building.num_elevators, building.num_floors, building.capacity, building.arrival_intensity
    );
    println!("{:>8} {:>14} {:>14}", "episode", "monte-carlo", "random");

    let mut totals = (0.0, 0.0);
    let mut last_planned = None;
    for episode in 0..EPISODES {
        // Each policy starts the episode from the same seed
        let mut rng = ChaCha8Rng::seed_from_u64(episode);
        let planned = run_episode(&building, &mut planner, TICKS, &mut rng)?;
        info!("{}", planner.statistics().summary());

        let mut rng = ChaCha8Rng::seed_from_u64(episode);
        let random = run_episode(&building, &mut baseline, TICKS, &mut rng)?;

        println!("{:>8} {:>14.1} {:>14.1}", episode, planned.score(), random.score());
        totals.0 += planned.score();
        totals.1 += random.score();
        last_planned = Some(planned.final_state);
    }

    println!(
        "{:>8} {:>14.1} {:>14.1}",
        "mean",
        totals.0 / EPISODES as f64,
        totals.1 / EPISODES as f64
    );
    if let Some(state) = last_planned {
        println!("\nFinal state of the last planned episode:\n{}", state);
    }
    Ok(())
}
