//! The successor function
//!
//! One call to [`step`] advances simulated time by one tick:
//!
//! 1. every elevator moves or opens its doors
//! 2. on an open-door tick, riders for this floor leave, the rest of the
//!    riders on board are charged, and waiting riders headed the matching
//!    way board while there is room
//! 3. every rider still waiting at any floor is charged
//! 4. new riders arrive
//! 5. queues are put back in longest-wait-first order
//!
//! A charge adds one tick to the rider's wait and lowers the score by the
//! new wait. Riders on board a car that keeps its doors closed are not
//! charged.

use rand::Rng;

use crate::{
    action::{elevator_actions, Action, JointAction},
    state::{Elevator, Rider, State},
    DispatchError, Result,
};

/// Produces the state that follows `state` under `action`
///
/// `state` is left untouched. Fails if `action` does not cover every
/// elevator exactly once or if any per-elevator action is illegal.
pub fn step<R: Rng + ?Sized>(state: &State, action: &JointAction, rng: &mut R) -> Result<State> {
    validate_action(state, action)?;

    let capacity = state.capacity();
    let mut next = state.clone();
    next.timestep += 1;

    let mut penalty: i64 = 0;
    for (elevator, act) in next.elevators.iter_mut().zip(action.iter()) {
        match act {
            Action::Stall => {}
            Action::Up => elevator.floor += 1,
            Action::Down => elevator.floor -= 1,
            Action::OpenUp | Action::OpenDown => {
                penalty += alight(elevator);
                let queue = &mut next.waiting[elevator.floor];
                board(elevator, queue, act == Action::OpenUp, capacity);
            }
        }
    }

    for queue in &mut next.waiting {
        for rider in queue.iter_mut() {
            penalty += rider.age();
        }
    }
    next.score -= penalty;

    let arrivals = next.arrivals().generate(next.timestep, rng);
    for arrival in arrivals {
        next.waiting[arrival.source].push(Rider::new(arrival.destination));
    }

    next.canonicalize();
    Ok(next)
}

/// Checks that `action` is one of the legal joint actions of `state`
pub fn validate_action(state: &State, action: &JointAction) -> Result<()> {
    if action.len() != state.num_elevators() {
        return Err(DispatchError::ActionArity {
            expected: state.num_elevators(),
            actual: action.len(),
        });
    }
    for (index, (elevator, act)) in state.elevators().iter().zip(action.iter()).enumerate() {
        let legal = elevator_actions(
            elevator,
            state.waiting_riders(elevator.floor()),
            state.num_floors(),
        );
        if !legal.contains(&act) {
            return Err(DispatchError::IllegalAction {
                elevator: index,
                action: act,
            });
        }
    }
    Ok(())
}

/// Drops off riders for the current floor and charges everyone else on board
fn alight(elevator: &mut Elevator) -> i64 {
    let floor = elevator.floor;
    let mut penalty = 0;
    elevator.riders.retain_mut(|rider| {
        if rider.destination == floor {
            false
        } else {
            penalty += rider.age();
            true
        }
    });
    penalty
}

/// Moves waiting riders headed the open direction into the car, up to capacity
fn board(elevator: &mut Elevator, queue: &mut Vec<Rider>, going_up: bool, capacity: usize) {
    let floor = elevator.floor;
    let riders = &mut elevator.riders;
    queue.retain(|rider| {
        let heading_up = rider.destination > floor;
        if heading_up == going_up && riders.len() < capacity {
            riders.push(*rider);
            false
        } else {
            true
        }
    });
}
