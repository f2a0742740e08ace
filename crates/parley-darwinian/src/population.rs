//! Population snapshots
//!
//! A population is immutable once built: every generation consumes the
//! previous snapshot and returns a new one, so callers never observe a
//! partially rewritten population.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use parley_common::{Bid, BidRanking};

/// A bid with its fitness score
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub bid: Bid,
    pub fitness: f64,
}

/// Bounded, duplicate-free set of scored bids in insertion order
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Scored>,
    index: HashMap<Bid, usize>,
    capacity: usize,
    generation: u64,
}

impl Population {
    /// Seed from the `capacity` most preferred bids of the ranking, fitness 0
    pub fn seed(ranking: &BidRanking, capacity: usize) -> Self {
        let mut builder = PopulationBuilder::new(capacity, 0);
        for bid in ranking.top(capacity) {
            builder.insert(bid.clone(), Some(0.0));
        }
        builder.finish(|_| 0.0)
    }

    /// New snapshot with every member re-scored by `score`
    pub fn rescored(self, mut score: impl FnMut(&Bid) -> f64) -> Self {
        let Population {
            members,
            index,
            capacity,
            generation,
        } = self;
        let members = members
            .into_iter()
            .map(|member| {
                let fitness = score(&member.bid);
                Scored {
                    bid: member.bid,
                    fitness,
                }
            })
            .collect();
        Self {
            members,
            index,
            capacity,
            generation,
        }
    }

    /// Members sorted by descending fitness; ties keep insertion order
    pub fn ranked(&self) -> Vec<&Scored> {
        let mut ranked: Vec<&Scored> = self.members.iter().collect();
        ranked.sort_by_key(|member| std::cmp::Reverse(OrderedFloat(member.fitness)));
        ranked
    }

    /// Up to `k` fittest members
    pub fn top(&self, k: usize) -> Vec<&Scored> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }

    pub fn best(&self) -> Option<&Scored> {
        self.ranked().into_iter().next()
    }

    pub fn fitness(&self, bid: &Bid) -> Option<f64> {
        self.index.get(bid).map(|&i| self.members[i].fitness)
    }

    pub fn contains(&self, bid: &Bid) -> bool {
        self.index.contains_key(bid)
    }

    pub fn members(&self) -> &[Scored] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of generations evolved since seeding
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.fitness).sum::<f64>() / self.members.len() as f64
    }
}

/// Accumulates the next generation; `None` fitness marks an unscored entry
pub struct PopulationBuilder {
    members: Vec<(Bid, Option<f64>)>,
    index: HashMap<Bid, usize>,
    capacity: usize,
    generation: u64,
}

impl PopulationBuilder {
    pub fn new(capacity: usize, generation: u64) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            capacity,
            generation,
        }
    }

    /// Insert unless full or already present; returns whether the bid was added
    pub fn insert(&mut self, bid: Bid, fitness: Option<f64>) -> bool {
        if self.is_full() || self.index.contains_key(&bid) {
            return false;
        }
        self.index.insert(bid.clone(), self.members.len());
        self.members.push((bid, fitness));
        true
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Score the unscored entries and freeze the snapshot
    pub fn finish(self, mut score: impl FnMut(&Bid) -> f64) -> Population {
        let members = self
            .members
            .into_iter()
            .map(|(bid, fitness)| {
                let fitness = fitness.unwrap_or_else(|| score(&bid));
                Scored { bid, fitness }
            })
            .collect();
        Population {
            members,
            index: self.index,
            capacity: self.capacity,
            generation: self.generation,
        }
    }
}
