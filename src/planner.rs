//! Monte Carlo rollout planner
//!
//! At each decision point the planner samples many short random futures.
//! Every rollout starts with a uniformly chosen candidate action, then plays
//! uniformly random (pruned) legal actions for a fixed horizon. The first
//! action of the rollout that ends with the best score is committed.

use std::time::Instant;

use log::{debug, trace};
use rand::{seq::SliceRandom, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::{
    action::JointAction,
    config::PlannerConfig,
    policy::{prune_actions, DispatchPolicy},
    state::State,
    stats::PlannerStatistics,
    DispatchError, Result,
};

/// Result of a single rollout
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutOutcome {
    /// Action the rollout started with
    pub first_action: JointAction,

    /// Every action played, starting with `first_action`
    pub trajectory: Vec<JointAction>,

    /// Score of the rollout state after the full horizon
    pub score: f64,
}

/// The Monte Carlo planner
///
/// The planner remembers the last action it committed, which feeds the
/// continuation-pruning heuristic at the next decision. Call
/// [`MonteCarloPlanner::reset`] between episodes.
#[derive(Debug, Clone)]
pub struct MonteCarloPlanner {
    config: PlannerConfig,
    previous: Option<JointAction>,
    statistics: PlannerStatistics,
}

impl MonteCarloPlanner {
    /// Creates a planner, checking the configuration
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(MonteCarloPlanner {
            config,
            previous: None,
            statistics: PlannerStatistics::new(),
        })
    }

    /// The planner configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Statistics accumulated since the last reset
    pub fn statistics(&self) -> &PlannerStatistics {
        &self.statistics
    }

    /// The action committed at the previous decision, if any
    pub fn previous_action(&self) -> Option<&JointAction> {
        self.previous.as_ref()
    }

    /// Clears the remembered action and the statistics
    pub fn reset(&mut self) {
        self.previous = None;
        self.statistics = PlannerStatistics::new();
    }

    /// Candidate first actions for `state`
    ///
    /// These are the legal joint actions, pruned towards continuing the
    /// previously committed action. Never empty.
    pub fn candidates<R: Rng + ?Sized>(&self, state: &State, rng: &mut R) -> Result<Vec<JointAction>> {
        let actions = state.legal_actions()?;
        prune_actions(
            actions,
            self.previous.as_ref(),
            self.config.prune_probability,
            rng,
        )
    }

    /// Chooses the action to commit from `state`
    ///
    /// A single candidate is taken directly. Otherwise the configured number
    /// of rollouts is run and the first action of the best-scoring one is
    /// returned; ties go to the earliest rollout.
    pub fn decide<R: Rng + ?Sized>(&mut self, state: &State, rng: &mut R) -> Result<JointAction> {
        let start = Instant::now();
        let mut candidates = self.candidates(state, rng)?;

        let action = if candidates.len() == 1 {
            self.statistics.forced_decisions += 1;
            candidates.swap_remove(0)
        } else {
            let best = if self.config.parallel {
                self.best_rollout_parallel(state, &candidates, rng)?
            } else {
                self.best_rollout(state, &candidates, rng)?
            };
            self.statistics.rollouts += self.config.num_rollouts;
            self.statistics.simulated_ticks += self.config.num_rollouts * (self.config.horizon + 1);
            self.statistics.last_best_score = Some(best.score);
            debug!(
                "tick {}: {} candidates, best rollout score {} with {}",
                state.timestep(),
                candidates.len(),
                best.score,
                best.first_action
            );
            best.first_action
        };

        self.statistics.decisions += 1;
        self.statistics.total_time += start.elapsed();
        self.previous = Some(action.clone());
        Ok(action)
    }

    /// Runs one rollout from `state`, starting with a random candidate
    pub fn rollout<R: Rng + ?Sized>(
        &self,
        state: &State,
        candidates: &[JointAction],
        rng: &mut R,
    ) -> Result<RolloutOutcome> {
        let first_action = candidates
            .choose(rng)
            .cloned()
            .ok_or(DispatchError::NoLegalActions)?;
        let mut sim_state = state.step(&first_action, rng)?;
        let mut trajectory = Vec::with_capacity(self.config.horizon + 1);
        trajectory.push(first_action.clone());

        for step in 0..self.config.horizon {
            // The continuation heuristic starts fresh inside each rollout.
            let previous = if step == 0 { None } else { trajectory.last() };
            let actions = prune_actions(
                sim_state.legal_actions()?,
                previous,
                self.config.prune_probability,
                rng,
            )?;
            let action = actions
                .choose(rng)
                .cloned()
                .ok_or(DispatchError::NoLegalActions)?;
            sim_state = sim_state.step(&action, rng)?;
            trajectory.push(action);
        }

        trace!(
            "rollout from tick {} starting with {} scored {}",
            state.timestep(),
            first_action,
            sim_state.score()
        );
        Ok(RolloutOutcome {
            first_action,
            trajectory,
            score: sim_state.score(),
        })
    }

    fn best_rollout<R: Rng + ?Sized>(
        &self,
        state: &State,
        candidates: &[JointAction],
        rng: &mut R,
    ) -> Result<RolloutOutcome> {
        let mut best: Option<RolloutOutcome> = None;
        for _ in 0..self.config.num_rollouts {
            let outcome = self.rollout(state, candidates, rng)?;
            if best.as_ref().map_or(true, |b| outcome.score > b.score) {
                best = Some(outcome);
            }
        }
        best.ok_or(DispatchError::NoLegalActions)
    }

    /// Splits the rollouts across the rayon pool
    ///
    /// Rollout `i` draws from ChaCha stream `i` under one base seed, and the
    /// reduction keeps the lowest index on ties, so the choice
    /// does not depend on scheduling.
    fn best_rollout_parallel<R: Rng + ?Sized>(
        &self,
        state: &State,
        candidates: &[JointAction],
        rng: &mut R,
    ) -> Result<RolloutOutcome> {
        let base_seed: u64 = rng.gen();
        let outcomes: Vec<RolloutOutcome> = (0..self.config.num_rollouts)
            .into_par_iter()
            .map(|i| {
                let mut stream = ChaCha8Rng::seed_from_u64(base_seed);
                stream.set_stream(i as u64);
                self.rollout(state, candidates, &mut stream)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut best: Option<RolloutOutcome> = None;
        for outcome in outcomes {
            if best.as_ref().map_or(true, |b| outcome.score > b.score) {
                best = Some(outcome);
            }
        }
        best.ok_or(DispatchError::NoLegalActions)
    }
}

impl DispatchPolicy for MonteCarloPlanner {
    fn choose_action(&mut self, state: &State, rng: &mut dyn RngCore) -> Result<JointAction> {
        self.decide(state, rng)
    }

    fn reset(&mut self) {
        MonteCarloPlanner::reset(self)
    }

    fn name(&self) -> &str {
        "monte-carlo"
    }
}
