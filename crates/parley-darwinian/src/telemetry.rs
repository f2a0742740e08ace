//! Per-generation evolution statistics

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::population::Population;

/// Summary of one evolution step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generation number of the produced population
    pub generation: u64,
    pub population_size: usize,
    /// Members carried over by elitism
    pub elites: usize,
    /// Mutated offspring that made it into the population
    pub offspring_inserted: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

impl EvolutionStats {
    pub fn collect(population: &Population, elites: usize, offspring_inserted: usize) -> Self {
        Self {
            generation: population.generation(),
            population_size: population.len(),
            elites,
            offspring_inserted,
            best_fitness: population.best().map(|m| m.fitness).unwrap_or(0.0),
            mean_fitness: population.mean_fitness(),
        }
    }

    pub fn emit(&self) {
        debug!(
            generation = self.generation,
            population = self.population_size,
            elites = self.elites,
            offspring = self.offspring_inserted,
            best = self.best_fitness,
            mean = self.mean_fitness,
            "Generation evolved"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::PopulationBuilder;
    use parley_common::{Bid, Domain, Issue};

    #[test]
    fn test_collect() {
        let domain = Domain::new("d", vec![Issue::discrete(1, "x", ["a", "b"])]);
        let mut builder = PopulationBuilder::new(2, 4);
        builder.insert(Bid::from_strs(&domain, &["a"]).unwrap(), Some(0.4));
        builder.insert(Bid::from_strs(&domain, &["b"]).unwrap(), Some(0.8));
        let population = builder.finish(|_| 0.0);

        let stats = EvolutionStats::collect(&population, 1, 1);
        assert_eq!(stats.generation, 4);
        assert_eq!(stats.population_size, 2);
        assert_eq!(stats.best_fitness, 0.8);
        assert!((stats.mean_fitness - 0.6).abs() < 1e-12);
        stats.emit();
    }
}
