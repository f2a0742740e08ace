//! Genetic operators
//!
//! Every operator draws its randomness from the caller's RNG so a seeded
//! session replays exactly.

pub mod crossover;
pub mod mutation;
pub mod selection;

pub use crossover::{pair_offspring, two_point};
pub use mutation::uniform_mutation;
pub use selection::tournament;
