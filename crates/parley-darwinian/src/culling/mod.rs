//! Survivor selection between generations
pub mod elitism;

pub use self::elitism::ElitismPolicy;
