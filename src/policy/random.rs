//! Uniformly random dispatch
//!
//! Picks any legal joint action with equal probability. Useful as a
//! baseline to compare planners against.

use rand::{seq::SliceRandom, RngCore};

use crate::{action::JointAction, state::State, DispatchError, Result};

use super::DispatchPolicy;

/// Random dispatch policy
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy
    }
}

impl DispatchPolicy for RandomPolicy {
    fn choose_action(&mut self, state: &State, rng: &mut dyn RngCore) -> Result<JointAction> {
        let actions = state.legal_actions()?;
        actions
            .choose(rng)
            .cloned()
            .ok_or(DispatchError::NoLegalActions)
    }

    fn name(&self) -> &str {
        "random"
    }
}
