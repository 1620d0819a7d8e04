//! Elevator actions and legal-action enumeration
//!
//! Each elevator's legal set depends only on its own floor and riders and on
//! the riders waiting at that floor. The joint legal set is the cartesian
//! product of the per-elevator sets.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::{
    state::{Elevator, Rider, State},
    utils::cartesian_product,
    DispatchError, Result,
};

/// What a single elevator does during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Stay put with doors closed
    Stall,
    /// Move one floor up
    Up,
    /// Move one floor down
    Down,
    /// Open doors, admitting riders headed up
    OpenUp,
    /// Open doors, admitting riders headed down
    OpenDown,
}

impl Action {
    /// Returns true for `Up` and `Down`
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Up | Action::Down)
    }

    /// Returns true for `OpenUp` and `OpenDown`
    pub fn is_open(&self) -> bool {
        matches!(self, Action::OpenUp | Action::OpenDown)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Stall => "STALL",
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::OpenUp => "OPEN_UP",
            Action::OpenDown => "OPEN_DOWN",
        };
        f.write_str(name)
    }
}

/// One action per elevator, indexed by elevator position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JointAction(Vec<Action>);

impl JointAction {
    /// Creates a joint action from per-elevator actions
    pub fn new(actions: Vec<Action>) -> Self {
        JointAction(actions)
    }

    /// The per-elevator actions
    pub fn actions(&self) -> &[Action] {
        &self.0
    }

    /// Action for elevator `index`, if present
    pub fn get(&self, index: usize) -> Option<Action> {
        self.0.get(index).copied()
    }

    /// Number of elevators covered
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no elevator is covered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the per-elevator actions
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Action>> for JointAction {
    fn from(actions: Vec<Action>) -> Self {
        JointAction(actions)
    }
}

impl Index<usize> for JointAction {
    type Output = Action;

    fn index(&self, index: usize) -> &Action {
        &self.0[index]
    }
}

impl fmt::Display for JointAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", action)?;
        }
        write!(f, ")")
    }
}

/// Legal actions for one elevator, given the riders waiting at its floor
///
/// The rules:
///
/// - an occupied car never stalls
/// - a car moves down only if no rider on board is headed up, and up only
///   if no rider on board is headed down
/// - a car carrying a rider for the current floor must open; it may not move
/// - a door action is offered in a direction the car could otherwise take,
///   when it must open or when someone waiting here wants that direction
///
/// Actions come out in the order `Stall, Down, OpenDown, Up, OpenUp`.
pub fn elevator_actions(elevator: &Elevator, waiting: &[Rider], num_floors: usize) -> Vec<Action> {
    let floor = elevator.floor();
    let mut can_stall = true;
    let mut can_go_down = floor > 0;
    let mut can_go_up = floor + 1 < num_floors;
    let mut must_open = false;

    for rider in elevator.riders() {
        can_stall = false;
        match rider.destination.cmp(&floor) {
            Ordering::Less => can_go_up = false,
            Ordering::Greater => can_go_down = false,
            Ordering::Equal => must_open = true,
        }
    }

    let waiting_down = waiting.iter().any(|r| r.destination < floor);
    let waiting_up = waiting.iter().any(|r| r.destination > floor);

    let mut actions = Vec::with_capacity(5);
    if can_stall {
        actions.push(Action::Stall);
    }
    if can_go_down {
        if !must_open {
            actions.push(Action::Down);
        }
        if must_open || waiting_down {
            actions.push(Action::OpenDown);
        }
    }
    if can_go_up {
        if !must_open {
            actions.push(Action::Up);
        }
        if must_open || waiting_up {
            actions.push(Action::OpenUp);
        }
    }
    actions
}

/// Legal actions for elevator `index` of `state`
pub fn legal_elevator_actions(state: &State, index: usize) -> Result<Vec<Action>> {
    let elevator = state
        .elevator(index)
        .ok_or(DispatchError::ElevatorOutOfRange {
            index,
            num_elevators: state.num_elevators(),
        })?;
    Ok(elevator_actions(
        elevator,
        state.waiting_riders(elevator.floor()),
        state.num_floors(),
    ))
}

/// Every legal joint action from `state`
///
/// The first elevator varies slowest. Every car of a valid state has at
/// least one legal action, so an empty product is reported as
/// [`DispatchError::NoLegalActions`].
pub fn legal_actions(state: &State) -> Result<Vec<JointAction>> {
    let per_elevator: Vec<Vec<Action>> = state
        .elevators()
        .iter()
        .map(|elevator| {
            elevator_actions(
                elevator,
                state.waiting_riders(elevator.floor()),
                state.num_floors(),
            )
        })
        .collect();

    let joint: Vec<JointAction> = cartesian_product(&per_elevator)
        .into_iter()
        .map(JointAction::new)
        .collect();

    if joint.is_empty() {
        return Err(DispatchError::NoLegalActions);
    }
    Ok(joint)
}
