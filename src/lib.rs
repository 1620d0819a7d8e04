//! # elevator-dispatch
//!
//! A multi-elevator dispatch simulator with a Monte Carlo rollout planner.
//!
//! Riders arrive stochastically at the floors of a building, each wanting to
//! reach some other floor. Every tick, each elevator is told to stall, move
//! one floor, or open its doors. Every tick a rider spends waiting costs the
//! score that rider's accumulated wait, so a good dispatcher keeps total
//! waiting time low.
//!
//! ## Features
//!
//! - Immutable simulation states with a pure successor function
//! - Legal-action enumeration per elevator and for the whole building
//! - Poisson arrival streams driven by an explicitly passed random generator
//! - A Monte Carlo planner with continuation pruning and optional parallel rollouts
//! - An episode driver that works with any `DispatchPolicy`
//!
//! ## Basic Usage
//!
//! ```
//! use elevator_dispatch::{
//!     run_episode, BuildingConfig, MonteCarloPlanner, PlannerConfig,
//! };
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! fn main() -> Result<(), elevator_dispatch::DispatchError> {
//!     let building = BuildingConfig::default()
//!         .with_elevators(2)
//!         .with_floors(5)
//!         .with_capacity(6)
//!         .with_arrival_intensity(0.2);
//!
//!     // Keep the doctest quick
//!     let config = PlannerConfig::default().with_rollouts(10).with_horizon(3);
//!     let mut planner = MonteCarloPlanner::new(config)?;
//!
//!     let mut rng = ChaCha8Rng::seed_from_u64(182);
//!     let report = run_episode(&building, &mut planner, 5, &mut rng)?;
//!
//!     println!("Final score: {}", report.score());
//!     println!("{}", planner.statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## Stepping by hand
//!
//! ```
//! use elevator_dispatch::{new_episode, Action, JointAction};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let state = new_episode(1, 3, 4, 0.0).unwrap();
//!
//! let legal = state.legal_actions().unwrap();
//! assert!(legal.contains(&JointAction::new(vec![Action::Up])));
//!
//! let next = state.step(&JointAction::new(vec![Action::Up]), &mut rng).unwrap();
//! assert_eq!(next.timestep(), 1);
//! assert_eq!(next.elevators()[0].floor(), 1);
//! assert_eq!(state.elevators()[0].floor(), 0);
//! ```

pub mod action;
pub mod arrivals;
pub mod config;
pub mod episode;
pub mod planner;
pub mod policy;
pub mod state;
pub mod stats;
pub mod transition;
pub mod utils;

pub use action::{legal_actions, Action, JointAction};
pub use arrivals::{Arrival, ArrivalGenerator};
pub use config::{BuildingConfig, PlannerConfig};
pub use episode::{run_episode, EpisodeReport};
pub use planner::{MonteCarloPlanner, RolloutOutcome};
pub use policy::{DispatchPolicy, RandomPolicy};
pub use state::{Elevator, Rider, State};
pub use stats::PlannerStatistics;
pub use transition::step;

/// Error types for the simulator and the planner
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// The building or planner configuration cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A state's contents break the simulation invariants
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A joint action does not cover every elevator exactly once
    #[error("Joint action covers {actual} elevators, expected {expected}")]
    ActionArity { expected: usize, actual: usize },

    /// An elevator index outside the building
    #[error("Elevator {index} does not exist ({num_elevators} elevators)")]
    ElevatorOutOfRange { index: usize, num_elevators: usize },

    /// An action that is not legal for its elevator
    #[error("Action {action} is not legal for elevator {elevator}")]
    IllegalAction { elevator: usize, action: Action },

    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,
}

/// Result type for simulator and planner operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Creates the initial state of an episode
///
/// Shorthand for [`State::new_episode`] with a [`BuildingConfig`] built from
/// the four parameters.
pub fn new_episode(
    num_elevators: usize,
    num_floors: usize,
    capacity: usize,
    arrival_intensity: f64,
) -> Result<State> {
    State::new_episode(BuildingConfig::new(
        num_elevators,
        num_floors,
        capacity,
        arrival_intensity,
    ))
}

/// Score of a state
///
/// Zero or negative; higher is better.
pub fn score(state: &State) -> f64 {
    state.score()
}
