//! Driving loop for a single episode
//!
//! Starting from the initial state, the policy is asked for an action every
//! tick and the action is committed, until the tick budget is spent.

use log::{debug, info};
use rand::RngCore;

use crate::{
    action::JointAction, config::BuildingConfig, policy::DispatchPolicy, state::State, Result,
};

/// What happened during an episode
#[derive(Debug, Clone)]
pub struct EpisodeReport {
    /// State after the last tick
    pub final_state: State,

    /// Committed actions, one per tick
    pub actions: Vec<JointAction>,
}

impl EpisodeReport {
    /// Final score of the episode
    pub fn score(&self) -> f64 {
        self.final_state.score()
    }

    /// Number of ticks simulated
    pub fn ticks(&self) -> u64 {
        self.final_state.timestep()
    }
}

/// Runs one episode of `tick_budget` ticks under `policy`
///
/// The policy is reset before the first tick. Every random draw, for
/// arrivals and for the policy, comes from `rng`.
pub fn run_episode<P, R>(
    config: &BuildingConfig,
    policy: &mut P,
    tick_budget: u64,
    rng: &mut R,
) -> Result<EpisodeReport>
where
    P: DispatchPolicy + ?Sized,
    R: RngCore,
{
    policy.reset();
    let mut state = State::new_episode(config.clone())?;
    let mut actions = Vec::new();

    info!(
        "starting {} episode: {} elevators, {} floors, capacity {}, intensity {}, {} ticks",
        policy.name(),
        config.num_elevators,
        config.num_floors,
        config.capacity,
        config.arrival_intensity,
        tick_budget
    );

    while state.timestep() < tick_budget {
        let action = policy.choose_action(&state, rng)?;
        state = state.step(&action, rng)?;
        debug!(
            "tick {}: took {}, score {}, {} waiting, {} on board",
            state.timestep(),
            action,
            state.score(),
            state.total_waiting(),
            state.total_onboard()
        );
        actions.push(action);
    }

    info!(
        "{} episode finished after {} ticks with score {}",
        policy.name(),
        state.timestep(),
        state.score()
    );
    Ok(EpisodeReport {
        final_state: state,
        actions,
    })
}
