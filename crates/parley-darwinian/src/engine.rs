//! Genetic search engine
//!
//! One call to [`GeneticSearchEngine::evolve`] runs a single generation:
//!
//! 1. re-score every member against the round's opponent offer and time pressure
//! 2. carry over the elite
//! 3. fill a mating pool by binary tournament
//! 4. two-point crossover over the population order
//! 5. uniform mutation of the crossover results
//! 6. refill from elites, mutated offspring, crossover results, mating pool

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::instrument;

use parley_common::{Bid, BidRanking, Domain, ParleyError, Result};

use crate::culling::ElitismPolicy;
use crate::fitness::FitnessCalculator;
use crate::operators::{pair_offspring, tournament, uniform_mutation};
use crate::population::{Population, PopulationBuilder};
use crate::telemetry::EvolutionStats;
use crate::DarwinianConfig;

pub struct GeneticSearchEngine {
    config: DarwinianConfig,
    domain: Arc<Domain>,
    elitism: ElitismPolicy,
}

impl GeneticSearchEngine {
    pub fn new(domain: Arc<Domain>, config: DarwinianConfig) -> Result<Self> {
        config.validate()?;
        domain.require_discrete()?;
        let elitism = ElitismPolicy::new(config.elitism);
        Ok(Self {
            config,
            domain,
            elitism,
        })
    }

    pub fn config(&self) -> &DarwinianConfig {
        &self.config
    }

    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    /// Initial population from the most preferred bids of the ranking
    pub fn seed_population(&self, ranking: &BidRanking) -> Population {
        Population::seed(ranking, self.config.population_size)
    }

    /// Run one generation and return the refreshed population
    pub fn evolve<R: Rng>(
        &self,
        population: Population,
        fitness: &FitnessCalculator<'_>,
        opponent_offer: &Bid,
        time_pressure: f64,
        rng: &mut R,
    ) -> Result<Population> {
        self.evolve_with_stats(population, fitness, opponent_offer, time_pressure, rng)
            .map(|(population, _)| population)
    }

    #[instrument(skip_all, fields(generation = population.generation(), time_pressure = time_pressure))]
    pub fn evolve_with_stats<R: Rng>(
        &self,
        population: Population,
        fitness: &FitnessCalculator<'_>,
        opponent_offer: &Bid,
        time_pressure: f64,
        rng: &mut R,
    ) -> Result<(Population, EvolutionStats)> {
        let score = |bid: &Bid| fitness.score(bid, opponent_offer, time_pressure);

        let population = population.rescored(score);
        let elites = self.elitism.select(&population);

        let pool_size = self.config.mating_pool_size.min(population.len());
        let mut mating_pool = tournament(population.members(), pool_size, rng);

        let mut crossed =
            pair_offspring(population.members(), pool_size, self.config.crossover_rate, rng);
        let offspring = crossed
            .iter()
            .map(|bid| uniform_mutation(bid, &self.domain, self.config.mutation_rate, rng))
            .collect::<Result<Vec<_>>>()?;

        let generation = population.generation() + 1;
        let mut next = PopulationBuilder::new(self.config.population_size, generation);

        for elite in &elites {
            next.insert(elite.bid.clone(), Some(elite.fitness));
        }

        let mut offspring_inserted = 0;
        for bid in offspring {
            if next.is_full() {
                break;
            }
            let cached = population.fitness(&bid);
            if next.insert(bid, cached) {
                offspring_inserted += 1;
            }
        }

        crossed.shuffle(rng);
        for bid in crossed {
            if next.is_full() {
                break;
            }
            let cached = population.fitness(&bid);
            next.insert(bid, cached);
        }

        mating_pool.shuffle(rng);
        for member in mating_pool {
            if next.is_full() {
                break;
            }
            next.insert(member.bid, Some(member.fitness));
        }

        let next = next.finish(score);
        if next.is_empty() {
            return Err(ParleyError::PopulationExhausted { generation });
        }

        let stats = EvolutionStats::collect(&next, elites.len(), offspring_inserted);
        stats.emit();
        Ok((next, stats))
    }
}
