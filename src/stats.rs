//! Statistics collection for the Monte Carlo planner
//!
//! This module provides a structure for collecting and reporting what the
//! planner did across the decisions of an episode.

use std::time::Duration;

/// Statistics collected by the planner
#[derive(Debug, Clone)]
pub struct PlannerStatistics {
    /// Number of decisions made
    pub decisions: usize,

    /// Decisions with a single candidate, taken without rollouts
    pub forced_decisions: usize,

    /// Total number of rollouts performed
    pub rollouts: usize,

    /// Total number of ticks simulated inside rollouts
    pub simulated_ticks: usize,

    /// Total time spent deciding
    pub total_time: Duration,

    /// Terminal score of the winning rollout of the latest sampled decision
    pub last_best_score: Option<f64>,
}

impl PlannerStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        PlannerStatistics {
            decisions: 0,
            forced_decisions: 0,
            rollouts: 0,
            simulated_ticks: 0,
            total_time: Duration::from_secs(0),
            last_best_score: None,
        }
    }

    /// Returns the average time per decision in microseconds
    pub fn avg_time_per_decision_us(&self) -> f64 {
        if self.decisions == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.decisions as f64
    }

    /// Returns the number of rollouts per second
    pub fn rollouts_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.rollouts as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "Planner Statistics:\n\
             - Decisions: {} ({} forced)\n\
             - Rollouts: {}\n\
             - Simulated ticks: {}\n\
             - Total time: {:.3} seconds\n\
             - Avg time per decision: {:.3} µs\n\
             - Rollouts per second: {:.1}",
            self.decisions,
            self.forced_decisions,
            self.rollouts,
            self.simulated_ticks,
            self.total_time.as_secs_f64(),
            self.avg_time_per_decision_us(),
            self.rollouts_per_second()
        )
    }
}

impl Default for PlannerStatistics {
    fn default() -> Self {
        Self::new()
    }
}
