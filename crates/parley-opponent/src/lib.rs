//! # Opponent
//!
//! Online inference of the counterpart's preferences from the offers it makes.
//!
//! ## Estimated Utility
//!
//! ```text
//! û(bid) = Σ_i ŵ_i × r_i(bid[i])
//! ```
//!
//! Where:
//! - r_i(v): rank score of value v, `(n − rank + 1) / n` with values ranked by
//!   descending observed frequency (competition ranking, ties share a rank)
//! - ŵ_i: issue weight from the Herfindahl concentration `Σ_v (f_v / N)²`,
//!   normalized across issues
//!
//! Issues on which the opponent keeps repeating the same value concentrate
//! their frequencies and are assumed to matter more to it.

pub mod frequency;
pub mod statistics;

pub use frequency::FrequencyOpponentModel;
pub use statistics::IssueStatistics;

use parley_common::{Bid, Result};
use serde::{Deserialize, Serialize};

/// Estimator of the opponent's utility for any bid
pub trait OpponentModel {
    /// Record a bid offered by the opponent
    fn update(&mut self, bid: &Bid) -> Result<()>;

    /// Opponent utility of `bid` as currently estimated, in [0, 1]
    fn estimated_utility(&self, bid: &Bid) -> f64;

    /// Number of opponent bids observed so far
    fn observed_bids(&self) -> u64;
}

/// How the model turns concentration scores into issue weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentWeighting {
    /// Normalized concentration scores become the live issue weights
    #[default]
    Concentration,
    /// Issue weights stay at 1/issueCount; concentration is still tracked
    Uniform,
}

impl std::str::FromStr for OpponentWeighting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "concentration" => Ok(Self::Concentration),
            "uniform" => Ok(Self::Uniform),
            other => Err(format!("unknown opponent weighting '{}'", other)),
        }
    }
}
