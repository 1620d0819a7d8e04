//! Configuration options for the simulator and the planner
//!
//! This module defines the parameters that describe a building (fixed for
//! the lifetime of an episode) and the parameters that control the Monte
//! Carlo planner.

use crate::{DispatchError, Result};

/// Static description of a building
///
/// A `BuildingConfig` is validated once when an episode is created and is
/// shared, unchanged, by every state derived from that episode.
///
/// # Example
///
/// ```
/// use elevator_dispatch::BuildingConfig;
///
/// let config = BuildingConfig::default()
///     .with_elevators(2)
///     .with_floors(6)
///     .with_capacity(8)
///     .with_arrival_intensity(0.1);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingConfig {
    /// Number of elevator cars
    pub num_elevators: usize,

    /// Number of floors, numbered `0..num_floors`
    pub num_floors: usize,

    /// Maximum number of riders a single car can carry
    pub capacity: usize,

    /// Poisson rate shared by the three arrival streams
    ///
    /// The same value is used for ground-sourced, ground-destined and
    /// uniform floor-to-floor arrivals.
    pub arrival_intensity: f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            num_elevators: 4,
            num_floors: 10,
            capacity: 20,
            arrival_intensity: 0.25,
        }
    }
}

impl BuildingConfig {
    /// Creates a configuration from its four parameters
    pub fn new(
        num_elevators: usize,
        num_floors: usize,
        capacity: usize,
        arrival_intensity: f64,
    ) -> Self {
        BuildingConfig {
            num_elevators,
            num_floors,
            capacity,
            arrival_intensity,
        }
    }

    /// Sets the number of elevators
    pub fn with_elevators(mut self, num_elevators: usize) -> Self {
        self.num_elevators = num_elevators;
        self
    }

    /// Sets the number of floors
    pub fn with_floors(mut self, num_floors: usize) -> Self {
        self.num_floors = num_floors;
        self
    }

    /// Sets the per-car capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the arrival intensity
    pub fn with_arrival_intensity(mut self, intensity: f64) -> Self {
        self.arrival_intensity = intensity;
        self
    }

    /// Checks that the configuration describes a building that can be simulated
    ///
    /// A building needs at least one elevator, at least two floors (every
    /// rider travels somewhere else), room for at least one rider, and a
    /// finite, non-negative arrival intensity.
    pub fn validate(&self) -> Result<()> {
        if self.num_elevators == 0 {
            return Err(DispatchError::InvalidConfiguration(
                "at least one elevator is required".to_string(),
            ));
        }
        if self.num_floors < 2 {
            return Err(DispatchError::InvalidConfiguration(format!(
                "at least two floors are required, got {}",
                self.num_floors
            )));
        }
        if self.capacity == 0 {
            return Err(DispatchError::InvalidConfiguration(
                "elevator capacity must be positive".to_string(),
            ));
        }
        if !self.arrival_intensity.is_finite() || self.arrival_intensity < 0.0 {
            return Err(DispatchError::InvalidConfiguration(format!(
                "arrival intensity must be a finite non-negative rate, got {}",
                self.arrival_intensity
            )));
        }
        Ok(())
    }
}

/// Configuration for the Monte Carlo planner
///
/// # Example
///
/// ```
/// use elevator_dispatch::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_rollouts(200)
///     .with_horizon(15)
///     .with_prune_probability(0.5)
///     .with_parallel(true);
///
/// assert_eq!(config.num_rollouts, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Number of independent rollouts per decision point
    pub num_rollouts: usize,

    /// Ticks simulated after the first action of each rollout
    pub horizon: usize,

    /// Probability that the continuation-pruning heuristic is applied
    ///
    /// With the remaining probability the full legal set is used.
    pub prune_probability: f64,

    /// Whether to spread rollouts across the rayon thread pool
    ///
    /// Parallel planning is deterministic for a given seed, but draws a
    /// different random stream than sequential planning.
    pub parallel: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            num_rollouts: 100,
            horizon: 10,
            prune_probability: 0.8,
            parallel: false,
        }
    }
}

impl PlannerConfig {
    /// Sets the number of rollouts per decision
    pub fn with_rollouts(mut self, rollouts: usize) -> Self {
        self.num_rollouts = rollouts;
        self
    }

    /// Sets the rollout horizon
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the probability of applying the pruning heuristic
    pub fn with_prune_probability(mut self, probability: f64) -> Self {
        self.prune_probability = probability;
        self
    }

    /// Enables or disables parallel rollouts
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that the planner can run with this configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_rollouts == 0 {
            return Err(DispatchError::InvalidConfiguration(
                "planner needs at least one rollout".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.prune_probability) {
            return Err(DispatchError::InvalidConfiguration(format!(
                "prune probability must lie in [0, 1], got {}",
                self.prune_probability
            )));
        }
        Ok(())
    }
}
