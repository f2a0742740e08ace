//! # Darwinian
//!
//! Genetic search over negotiation proposals for Parley.
//!
//! ## Fitness Formula
//!
//! ```text
//! f(b) = c × (u(b) / u_max) + (1 − c) × (1 − d(b, o)) + u(b) × û(b)
//! c    = α × tp
//! tp   = 1 − (1 − t)^(1/β)
//! ```
//!
//! Where:
//! - u: own utility, u_max: utility of the own best bid
//! - û: opponent utility estimated by the opponent model
//! - d: weighted Euclidean distance to the opponent's last offer o
//! - t: elapsed negotiation time (0-1), tp: time pressure
//!
//! ## Generation
//!
//! Re-score, keep the elite, tournament-select a mating pool, two-point
//! crossover, uniform mutation, then refill the next population from
//! offspring, crossover results and the mating pool.

pub mod controller;
pub mod culling;
pub mod engine;
pub mod fitness;
pub mod operators;
pub mod population;
pub mod telemetry;

pub use controller::ConcessionSchedule;
pub use engine::GeneticSearchEngine;
pub use fitness::FitnessCalculator;
pub use population::{Population, Scored};
pub use telemetry::EvolutionStats;

use parley_common::{ParleyError, Result};
use serde::{Deserialize, Serialize};

/// Default population size
pub const DEFAULT_POPULATION_SIZE: usize = 100;

/// Default mating pool size
pub const DEFAULT_MATING_POOL_SIZE: usize = 80;

/// Number of top candidates the next proposal is drawn from
pub const DEFAULT_SHORTLIST_SIZE: usize = 3;

/// Darwinian configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DarwinianConfig {
    /// Maximum population size
    pub population_size: usize,
    /// Mating pool size (capped at the population size)
    pub mating_pool_size: usize,
    /// Fraction of the population carried over unchanged
    pub elitism: f64,
    /// Probability that a parent pair is recombined
    pub crossover_rate: f64,
    /// Per-issue mutation probability
    pub mutation_rate: f64,
    /// Size of the top-fitness shortlist proposals are drawn from
    pub shortlist_size: usize,
    /// Concession aggressiveness α
    pub concession_alpha: f64,
    /// Time pressure exponent β (tp = 1 − (1 − t)^(1/β))
    pub concession_beta: f64,
}

impl Default for DarwinianConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            mating_pool_size: DEFAULT_MATING_POOL_SIZE,
            elitism: 0.1,
            crossover_rate: 0.6,
            mutation_rate: 0.05,
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
            concession_alpha: 0.5,
            concession_beta: 0.8,
        }
    }
}

impl DarwinianConfig {
    /// Reject sizes of zero and probabilities outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(ParleyError::Config("population_size must be positive".to_string()));
        }
        if self.mating_pool_size == 0 {
            return Err(ParleyError::Config("mating_pool_size must be positive".to_string()));
        }
        if self.shortlist_size == 0 {
            return Err(ParleyError::Config("shortlist_size must be positive".to_string()));
        }
        for (name, rate) in [
            ("elitism", self.elitism),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("concession_alpha", self.concession_alpha),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ParleyError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        if !(self.concession_beta > 0.0 && self.concession_beta.is_finite()) {
            return Err(ParleyError::Config(format!(
                "concession_beta must be positive, got {}",
                self.concession_beta
            )));
        }
        Ok(())
    }

    pub fn schedule(&self) -> ConcessionSchedule {
        ConcessionSchedule::new(self.concession_alpha, self.concession_beta)
    }
}
