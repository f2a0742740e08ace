//! Linear-programming utility estimator
//!
//! Turns the solved contribution program into a normalized additive utility.

use std::sync::Arc;

use parley_common::{AdditiveUtility, BidRanking, Domain, Result, UTILITY_EPSILON};
use tracing::{debug, instrument, warn};

use crate::program::{ContributionProgram, ProgramSolution};

/// Estimates the agent's own utility from its elicited bid ranking
pub struct LinearProgramEstimator {
    domain: Arc<Domain>,
}

impl LinearProgramEstimator {
    /// Create an estimator; every issue of `domain` must be discrete
    pub fn new(domain: Arc<Domain>) -> Result<Self> {
        domain.require_discrete()?;
        Ok(Self { domain })
    }

    /// Solve the ranking program and normalize the result
    #[instrument(skip_all, fields(domain = %self.domain.name, bids = ranking.len()))]
    pub fn estimate(&self, ranking: &BidRanking) -> Result<AdditiveUtility> {
        let mut solution = ContributionProgram::new(&self.domain)?.solve(ranking)?;

        if solution.objective > UTILITY_EPSILON {
            debug!(
                total_slack = solution.objective,
                "Ranking is not fully representable by an additive utility"
            );
        }

        Self::translate_non_negative(&mut solution);
        let utility = self.build_utility(solution.contributions)?;

        debug!(weights = ?utility.weights(), "Estimated own utility");
        Ok(utility)
    }

    /// Shift every contribution by the magnitude of the most negative one
    fn translate_non_negative(solution: &mut ProgramSolution) {
        let most_negative = solution.most_negative();
        if most_negative < 0.0 {
            warn!(shift = -most_negative, "Negative contributions in LP solution, translating");
            for eval in solution.contributions.iter_mut().flatten() {
                *eval -= most_negative;
            }
        }
    }

    /// Issue weight = largest contribution of the issue; values rescaled to [0, 1]
    fn build_utility(&self, contributions: Vec<Vec<f64>>) -> Result<AdditiveUtility> {
        let weights = contributions
            .iter()
            .map(|row| row.iter().copied().fold(0.0, f64::max))
            .collect();

        let mut utility = AdditiveUtility::from_parts(self.domain.clone(), weights, contributions)?;
        utility.scale_values_to_unit();
        utility.normalize_weights();
        Ok(utility)
    }
}
