//! Elitism: the fittest ⌊fraction × size⌋ members survive unchanged

use crate::population::{Population, Scored};

pub struct ElitismPolicy {
    fraction: f64,
}

impl ElitismPolicy {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }

    pub fn elite_count(&self, population_size: usize) -> usize {
        ((population_size as f64 * self.fraction).floor() as usize).min(population_size)
    }

    /// Fittest members by descending fitness, ties in encounter order
    pub fn select(&self, population: &Population) -> Vec<Scored> {
        population
            .top(self.elite_count(population.len()))
            .into_iter()
            .cloned()
            .collect()
    }
}
