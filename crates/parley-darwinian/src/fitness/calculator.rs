//! Fitness calculation: f = c × (u / u_max) + (1 − c) × (1 − d) + u × û

use parley_common::{AdditiveUtility, Bid, UTILITY_EPSILON};
use parley_opponent::OpponentModel;

/// Scores proposals against the opponent's last offer
pub struct FitnessCalculator<'a> {
    utility: &'a AdditiveUtility,
    opponent: &'a dyn OpponentModel,
    max_utility: f64,
    alpha: f64,
}

impl<'a> FitnessCalculator<'a> {
    pub fn new(
        utility: &'a AdditiveUtility,
        opponent: &'a dyn OpponentModel,
        max_utility: f64,
        alpha: f64,
    ) -> Self {
        Self {
            utility,
            opponent,
            max_utility,
            alpha,
        }
    }

    /// Weighted Euclidean distance between two bids in own-utility space
    ///
    /// Only issues whose value evaluations differ contribute.
    pub fn distance(&self, bid: &Bid, opponent_offer: &Bid) -> f64 {
        (0..self.utility.evaluators().len())
            .map(|issue| {
                let own = self.utility.evaluation_of(issue, bid);
                let theirs = self.utility.evaluation_of(issue, opponent_offer);
                if own == theirs {
                    0.0
                } else {
                    let d = self.utility.weight(issue) * (own - theirs);
                    d * d
                }
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Fitness of `bid` given the opponent's last offer and the current time pressure
    pub fn score(&self, bid: &Bid, opponent_offer: &Bid, time_pressure: f64) -> f64 {
        let concession = self.alpha * time_pressure;
        let own = self.utility.utility(bid);
        let relative_own = if self.max_utility > UTILITY_EPSILON {
            own / self.max_utility
        } else {
            0.0
        };
        let closeness = 1.0 - self.distance(bid, opponent_offer);
        let nash_product = own * self.opponent.estimated_utility(bid);

        concession * relative_own + (1.0 - concession) * closeness + nash_product
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_common::{Domain, Issue, Result};
    use std::sync::Arc;

    /// Opponent model with a fixed estimate
    struct FixedOpponent(f64);

    impl OpponentModel for FixedOpponent {
        fn update(&mut self, _bid: &Bid) -> Result<()> {
            Ok(())
        }

        fn estimated_utility(&self, _bid: &Bid) -> f64 {
            self.0
        }

        fn observed_bids(&self) -> u64 {
            0
        }
    }

    fn utility() -> AdditiveUtility {
        let domain = Arc::new(Domain::new(
            "lease",
            vec![
                Issue::discrete(1, "rent", ["high", "low"]),
                Issue::discrete(2, "term", ["short", "long"]),
            ],
        ));
        AdditiveUtility::from_parts(domain, vec![0.6, 0.4], vec![vec![1.0, 0.0], vec![0.25, 1.0]])
            .unwrap()
    }

    #[test]
    fn test_distance() {
        let utility = utility();
        let opponent = FixedOpponent(0.5);
        let calc = FitnessCalculator::new(&utility, &opponent, 1.0, 0.5);
        let domain = utility.domain().clone();

        let a = Bid::from_strs(&domain, &["high", "long"]).unwrap();
        let b = Bid::from_strs(&domain, &["low", "short"]).unwrap();
        assert_eq!(calc.distance(&a, &a), 0.0);

        let expected = ((0.6f64 * 1.0).powi(2) + (0.4f64 * 0.75).powi(2)).sqrt();
        assert!((calc.distance(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_score_components() {
        let utility = utility();
        let opponent = FixedOpponent(0.5);
        let calc = FitnessCalculator::new(&utility, &opponent, 1.0, 0.5);
        let domain = utility.domain().clone();
        let best = Bid::from_strs(&domain, &["high", "long"]).unwrap();

        // identical to the opponent offer, no time pressure: closeness term + nash product
        let early = calc.score(&best, &best, 0.0);
        assert!((early - (1.0 + 0.5)).abs() < 1e-12);

        // full time pressure: c = 0.5
        let late = calc.score(&best, &best, 1.0);
        assert!((late - (0.5 * 1.0 + 0.5 * 1.0 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_time_pressure_shifts_weight_to_self() {
        let utility = utility();
        let opponent = FixedOpponent(0.0);
        let calc = FitnessCalculator::new(&utility, &opponent, 1.0, 1.0);
        let domain = utility.domain().clone();

        let mine = Bid::from_strs(&domain, &["high", "long"]).unwrap();
        let theirs = Bid::from_strs(&domain, &["low", "short"]).unwrap();

        // early on, echoing the opponent scores better than insisting
        assert!(calc.score(&theirs, &theirs, 0.0) > calc.score(&mine, &theirs, 0.0));
        // at the deadline, own utility dominates
        assert!(calc.score(&mine, &theirs, 1.0) > calc.score(&theirs, &theirs, 1.0));
    }

    #[test]
    fn test_zero_max_utility_is_total() {
        let utility = utility();
        let opponent = FixedOpponent(0.0);
        let calc = FitnessCalculator::new(&utility, &opponent, 0.0, 0.5);
        let bid = Bid::from_strs(utility.domain(), &["low", "short"]).unwrap();
        assert!(calc.score(&bid, &bid, 1.0).is_finite());
    }
}
