//! Dispatch policies
//!
//! A dispatch policy looks at the current state and picks the joint action
//! to commit for the next tick. This module contains:
//! - The `DispatchPolicy` trait consumed by the episode driver
//! - A uniformly random baseline policy
//! - The continuation-pruning heuristic used by the Monte Carlo planner

use rand::RngCore;

use crate::{action::JointAction, state::State, Result};

pub mod pruning;
pub mod random;

pub use pruning::{continuation_candidates, prune_actions};
pub use random::RandomPolicy;

/// Trait for policies that choose the joint action of each tick
pub trait DispatchPolicy: Send {
    /// Chooses a legal joint action for `state`
    ///
    /// All randomness must come from `rng`, so that a seeded generator
    /// reproduces the same decisions.
    fn choose_action(&mut self, state: &State, rng: &mut dyn RngCore) -> Result<JointAction>;

    /// Forgets anything remembered from a previous episode
    fn reset(&mut self) {}

    /// Short name used in logs
    fn name(&self) -> &str;
}

impl<P: DispatchPolicy + ?Sized> DispatchPolicy for Box<P> {
    fn choose_action(&mut self, state: &State, rng: &mut dyn RngCore) -> Result<JointAction> {
        (**self).choose_action(state, rng)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
