//! Simulation state: riders, elevators and the per-floor waiting queues.
//!
//! A [`State`] is an immutable snapshot. Successor states are produced by
//! [`State::step`], which never mutates its receiver; every state owns its
//! own copy of the elevators and the waiting queues.

use std::cmp::Reverse;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::Rng;

use crate::{
    action::{self, JointAction},
    arrivals::ArrivalGenerator,
    config::BuildingConfig,
    transition, DispatchError, Result,
};

/// A rider, either waiting at a floor or travelling in an elevator
///
/// The origin of a waiting rider is implied by the queue it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rider {
    /// Floor the rider wants to reach
    pub destination: usize,

    /// Ticks of waiting charged to this rider so far
    pub wait_time: u32,
}

impl Rider {
    /// Creates a freshly arrived rider
    pub fn new(destination: usize) -> Self {
        Rider {
            destination,
            wait_time: 0,
        }
    }

    /// Creates a rider that has already waited `wait_time` ticks
    pub fn with_wait(destination: usize, wait_time: u32) -> Self {
        Rider {
            destination,
            wait_time,
        }
    }

    /// Adds one tick of waiting and returns the penalty it costs
    pub(crate) fn age(&mut self) -> i64 {
        self.wait_time += 1;
        i64::from(self.wait_time)
    }
}

/// A single elevator car
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Elevator {
    pub(crate) floor: usize,
    pub(crate) riders: Vec<Rider>,
}

impl Elevator {
    /// Creates an empty car at `floor`
    pub fn new(floor: usize) -> Self {
        Elevator {
            floor,
            riders: Vec::new(),
        }
    }

    /// Creates a car at `floor` carrying `riders`
    pub fn with_riders(floor: usize, riders: Vec<Rider>) -> Self {
        Elevator { floor, riders }
    }

    /// Current floor of the car
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Riders currently on board, longest wait first
    pub fn riders(&self) -> &[Rider] {
        &self.riders
    }

    /// Returns true if nobody is on board
    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }
}

/// Episode-wide context shared by every state of one episode
#[derive(Debug)]
pub(crate) struct Building {
    pub(crate) config: BuildingConfig,
    pub(crate) arrivals: ArrivalGenerator,
}

/// A snapshot of the simulation at one tick
///
/// The score only ever decreases: every tick of waiting costs the rider's
/// accumulated wait, and there is no reward term.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) building: Arc<Building>,
    pub(crate) timestep: u64,
    pub(crate) score: i64,
    pub(crate) elevators: Vec<Elevator>,
    pub(crate) waiting: Vec<Vec<Rider>>,
}

impl State {
    /// Creates the initial state of an episode
    ///
    /// All elevators start empty at floor 0, every queue is empty and the
    /// score is zero.
    pub fn new_episode(config: BuildingConfig) -> Result<Self> {
        let elevators = vec![Elevator::new(0); config.num_elevators];
        let waiting = vec![Vec::new(); config.num_floors];
        Self::from_parts(config, 0, 0, elevators, waiting)
    }

    /// Assembles a state from explicit contents
    ///
    /// This is how scenarios are set up mid-episode. The contents are
    /// checked against the configuration and the queues are put in
    /// canonical order.
    pub fn from_parts(
        config: BuildingConfig,
        timestep: u64,
        score: i64,
        elevators: Vec<Elevator>,
        waiting: Vec<Vec<Rider>>,
    ) -> Result<Self> {
        config.validate()?;
        let arrivals = ArrivalGenerator::new(config.num_floors, config.arrival_intensity)?;

        if elevators.len() != config.num_elevators {
            return Err(DispatchError::InvalidState(format!(
                "expected {} elevators, got {}",
                config.num_elevators,
                elevators.len()
            )));
        }
        if waiting.len() != config.num_floors {
            return Err(DispatchError::InvalidState(format!(
                "expected {} waiting queues, got {}",
                config.num_floors,
                waiting.len()
            )));
        }
        if score > 0 {
            return Err(DispatchError::InvalidState(format!(
                "score can never be positive, got {}",
                score
            )));
        }
        for (index, elevator) in elevators.iter().enumerate() {
            if elevator.floor >= config.num_floors {
                return Err(DispatchError::InvalidState(format!(
                    "elevator {} is at floor {} outside [0, {})",
                    index, elevator.floor, config.num_floors
                )));
            }
            if elevator.riders.len() > config.capacity {
                return Err(DispatchError::InvalidState(format!(
                    "elevator {} carries {} riders, capacity is {}",
                    index,
                    elevator.riders.len(),
                    config.capacity
                )));
            }
            if let Some(rider) = elevator
                .riders
                .iter()
                .find(|r| r.destination >= config.num_floors)
            {
                return Err(DispatchError::InvalidState(format!(
                    "rider in elevator {} is headed to missing floor {}",
                    index, rider.destination
                )));
            }
            let heading_up = elevator.riders.iter().any(|r| r.destination > elevator.floor);
            let heading_down = elevator.riders.iter().any(|r| r.destination < elevator.floor);
            if heading_up && heading_down {
                return Err(DispatchError::InvalidState(format!(
                    "elevator {} carries riders headed both up and down from floor {}",
                    index, elevator.floor
                )));
            }
        }
        for (floor, queue) in waiting.iter().enumerate() {
            if let Some(rider) = queue
                .iter()
                .find(|r| r.destination >= config.num_floors || r.destination == floor)
            {
                return Err(DispatchError::InvalidState(format!(
                    "rider waiting at floor {} has invalid destination {}",
                    floor, rider.destination
                )));
            }
        }

        let mut state = State {
            building: Arc::new(Building { config, arrivals }),
            timestep,
            score,
            elevators,
            waiting,
        };
        state.canonicalize();
        Ok(state)
    }

    /// Building configuration of this episode
    pub fn config(&self) -> &BuildingConfig {
        &self.building.config
    }

    /// Number of elevators
    pub fn num_elevators(&self) -> usize {
        self.building.config.num_elevators
    }

    /// Number of floors
    pub fn num_floors(&self) -> usize {
        self.building.config.num_floors
    }

    /// Capacity of every car
    pub fn capacity(&self) -> usize {
        self.building.config.capacity
    }

    /// Arrival intensity of the episode
    pub fn arrival_intensity(&self) -> f64 {
        self.building.config.arrival_intensity
    }

    /// Ticks elapsed since the episode started
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Cumulative score (zero or negative)
    pub fn score(&self) -> f64 {
        self.score as f64
    }

    /// Cumulative penalty as an exact integer
    pub fn penalty(&self) -> i64 {
        -self.score
    }

    /// All elevators, indexed by position
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    /// A single elevator, if the index exists
    pub fn elevator(&self, index: usize) -> Option<&Elevator> {
        self.elevators.get(index)
    }

    /// Riders waiting at `floor`, longest wait first
    ///
    /// Floors outside the building have no riders.
    pub fn waiting_riders(&self, floor: usize) -> &[Rider] {
        self.waiting.get(floor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Waiting queues for every floor
    pub fn waiting_queues(&self) -> &[Vec<Rider>] {
        &self.waiting
    }

    /// Total number of riders waiting at any floor
    pub fn total_waiting(&self) -> usize {
        self.waiting.iter().map(Vec::len).sum()
    }

    /// Total number of riders on board any elevator
    pub fn total_onboard(&self) -> usize {
        self.elevators.iter().map(|e| e.riders.len()).sum()
    }

    /// Legal joint actions from this state
    ///
    /// See [`action::legal_actions`].
    pub fn legal_actions(&self) -> Result<Vec<JointAction>> {
        action::legal_actions(self)
    }

    /// Advances the simulation by one tick
    ///
    /// See [`transition::step`].
    pub fn step<R: Rng + ?Sized>(&self, action: &JointAction, rng: &mut R) -> Result<State> {
        transition::step(self, action, rng)
    }

    /// Returns a hash of the simulation contents
    ///
    /// Two states with the same tick, score, elevators and queues have the
    /// same key, which makes states usable for deduplication.
    pub fn state_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    pub(crate) fn arrivals(&self) -> &ArrivalGenerator {
        &self.building.arrivals
    }

    /// Restores the longest-wait-first order of every rider list
    pub(crate) fn canonicalize(&mut self) {
        for queue in &mut self.waiting {
            queue.sort_by_key(|r| Reverse(r.wait_time));
        }
        for elevator in &mut self.elevators {
            elevator.riders.sort_by_key(|r| Reverse(r.wait_time));
        }
    }
}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestep.hash(state);
        self.score.hash(state);
        self.elevators.hash(state);
        self.waiting.hash(state);
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.timestep == other.timestep
            && self.score == other.score
            && self.elevators == other.elevators
            && self.waiting == other.waiting
            && (Arc::ptr_eq(&self.building, &other.building)
                || self.building.config == other.building.config)
    }
}

// Configurations are validated, so the arrival intensity is never NaN.
impl Eq for State {}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time: {}, Score: {}", self.timestep, self.score)?;
        for (index, elevator) in self.elevators.iter().enumerate() {
            writeln!(
                f,
                "El. {}: Floor ({}), Riders ({})",
                index,
                elevator.floor,
                elevator.riders.len()
            )?;
        }
        let counts: Vec<String> = self.waiting.iter().map(|q| q.len().to_string()).collect();
        write!(f, "Riders/floor: [{}]", counts.join(", "))
    }
}
