//! # Preference
//!
//! Infers the agent's own additive utility function from a partial, ordinal
//! bid ranking.
//!
//! ## Linear Program
//!
//! ```text
//! minimize   Σ_k z_k
//! subject to z_k + Σ_i x(i, higher_k[i]) − Σ_i x(i, lower_k[i]) ≥ 0   for each adjacent pair k
//!            Σ_i x(i, best[i]) = 1
//!            x ≥ 0, z ≥ 0
//! ```
//!
//! Where:
//! - x(i, v): utility contribution of value v on issue i
//! - z_k: slack absorbing ranking inconsistencies the additive model cannot express
//! - best: the maximal bid of the ranking
//!
//! The solved contributions are translated to be non-negative, each issue's
//! maximum contribution becomes its weight, values are rescaled to [0, 1] and
//! the weights are normalized to sum to 1.

pub mod estimator;
pub mod program;

pub use estimator::LinearProgramEstimator;
pub use program::{ContributionProgram, ProgramSolution};

use std::sync::Arc;

use parley_common::{AdditiveUtility, BidRanking, Domain, Result};

/// Estimate an additive utility for `domain` from `ranking`
pub fn estimate(domain: Arc<Domain>, ranking: &BidRanking) -> Result<AdditiveUtility> {
    LinearProgramEstimator::new(domain)?.estimate(ranking)
}
