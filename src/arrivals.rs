//! Stochastic rider arrivals
//!
//! Three independent streams share one Poisson rate:
//!
//! - riders appearing at the ground floor, bound for any upper floor
//! - riders appearing at an upper floor, bound for the ground floor
//! - riders travelling between two uniformly chosen distinct floors

use log::trace;
use rand::Rng;
use rand_distr::{Distribution, Poisson};

use crate::{DispatchError, Result};

/// A new rider appearing at `source`, headed for `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arrival {
    pub source: usize,
    pub destination: usize,
}

/// Generates the riders that arrive during a tick
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    num_floors: usize,
    intensity: f64,
    // `None` when the intensity is zero; the distribution needs a positive rate.
    poisson: Option<Poisson<f64>>,
}

impl ArrivalGenerator {
    /// Creates a generator for a building with `num_floors` floors
    ///
    /// Fails if the intensity is negative or not finite, or if the building
    /// has fewer than two floors.
    pub fn new(num_floors: usize, intensity: f64) -> Result<Self> {
        if num_floors < 2 {
            return Err(DispatchError::InvalidConfiguration(format!(
                "arrivals need at least two floors, got {}",
                num_floors
            )));
        }
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(DispatchError::InvalidConfiguration(format!(
                "arrival intensity must be a finite non-negative rate, got {}",
                intensity
            )));
        }
        let poisson = if intensity > 0.0 {
            let distribution = Poisson::new(intensity).map_err(|e| {
                DispatchError::InvalidConfiguration(format!("arrival intensity {}: {}", intensity, e))
            })?;
            Some(distribution)
        } else {
            None
        };

        Ok(ArrivalGenerator {
            num_floors,
            intensity,
            poisson,
        })
    }

    /// The shared Poisson rate
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Draws the arrivals for `timestep`
    ///
    /// Ground-sourced arrivals come first, then ground-destined, then
    /// floor-to-floor. The order is fixed for a fixed random stream.
    pub fn generate<R: Rng + ?Sized>(&self, timestep: u64, rng: &mut R) -> Vec<Arrival> {
        let poisson = match &self.poisson {
            Some(poisson) => poisson,
            None => return Vec::new(),
        };
        let top = self.num_floors;

        let ground_sourced = Self::count(poisson, rng);
        let mut arrivals: Vec<Arrival> = (0..ground_sourced)
            .map(|_| Arrival {
                source: 0,
                destination: rng.gen_range(1..top),
            })
            .collect();

        let ground_destined = Self::count(poisson, rng);
        arrivals.extend((0..ground_destined).map(|_| Arrival {
            source: rng.gen_range(1..top),
            destination: 0,
        }));

        let random = Self::count(poisson, rng);
        for _ in 0..random {
            let source = rng.gen_range(0..top);
            let destination = loop {
                let candidate = rng.gen_range(0..top);
                if candidate != source {
                    break candidate;
                }
            };
            arrivals.push(Arrival {
                source,
                destination,
            });
        }

        trace!(
            "tick {}: {} arrivals ({} from ground, {} to ground, {} between floors)",
            timestep,
            arrivals.len(),
            ground_sourced,
            ground_destined,
            random
        );
        arrivals
    }

    fn count<R: Rng + ?Sized>(poisson: &Poisson<f64>, rng: &mut R) -> usize {
        poisson.sample(rng) as usize
    }
}
