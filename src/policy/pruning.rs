//! Continuation pruning
//!
//! Elevators that were moving tend to keep moving the same way. When the
//! previous joint action is known, the planner usually narrows its
//! candidates to those that repeat every previous `Up`/`Down`.

use rand::Rng;

use crate::{action::JointAction, DispatchError, Result};

/// Narrows `actions` to continuations of `previous`
///
/// For every elevator that moved last tick, only candidates repeating that
/// move are kept, unless some remaining candidate opens that elevator's
/// doors, in which case the elevator is left unconstrained. If nothing
/// survives, the unpruned `actions` are returned.
pub fn continuation_candidates(actions: &[JointAction], previous: &JointAction) -> Vec<JointAction> {
    let mut candidates = actions.to_vec();

    for (index, moved) in previous.iter().enumerate() {
        if !moved.is_move() {
            continue;
        }
        let may_open = candidates
            .iter()
            .any(|c| c.get(index).map_or(false, |a| a.is_open()));
        if may_open {
            continue;
        }
        candidates.retain(|c| c.get(index) == Some(moved));
    }

    if candidates.is_empty() {
        actions.to_vec()
    } else {
        candidates
    }
}

/// Applies continuation pruning with probability `prune_probability`
///
/// Without a previous action, or when the coin flip says no, `actions` is
/// returned as is. The result is never empty when `actions` is not. Fails if
/// `prune_probability` is outside `[0, 1]`.
pub fn prune_actions<R: Rng + ?Sized>(
    actions: Vec<JointAction>,
    previous: Option<&JointAction>,
    prune_probability: f64,
    rng: &mut R,
) -> Result<Vec<JointAction>> {
    if !(0.0..=1.0).contains(&prune_probability) {
        return Err(DispatchError::InvalidConfiguration(format!(
            "prune probability must be within [0, 1], got {}",
            prune_probability
        )));
    }
    Ok(match previous {
        Some(previous) if rng.gen_bool(prune_probability) => {
            continuation_candidates(&actions, previous)
        }
        _ => actions,
    })
}
