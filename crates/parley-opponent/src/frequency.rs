//! Frequency-based opponent model

use std::sync::Arc;

use parley_common::{Bid, Domain, DomainError, Result};
use tracing::{instrument, trace};

use crate::statistics::IssueStatistics;
use crate::{OpponentModel, OpponentWeighting};

/// Opponent model built from value frequencies of received offers
#[derive(Debug, Clone)]
pub struct FrequencyOpponentModel {
    issues: Vec<IssueStatistics>,
    weights: Vec<f64>,
    /// Normalized concentration scores of the last update
    concentration_weights: Vec<f64>,
    weighting: OpponentWeighting,
    observed: u64,
}

impl FrequencyOpponentModel {
    /// Zero counters, uniform rank scores and uniform issue weights
    pub fn new(domain: Arc<Domain>, weighting: OpponentWeighting) -> Result<Self> {
        domain.require_discrete()?;
        let issues = domain
            .issues
            .iter()
            .map(IssueStatistics::new)
            .collect::<Result<Vec<_>>>()?;
        let uniform = vec![1.0 / issues.len().max(1) as f64; issues.len()];

        Ok(Self {
            issues,
            weights: uniform.clone(),
            concentration_weights: uniform,
            weighting,
            observed: 0,
        })
    }

    /// Issue weights used by [`OpponentModel::estimated_utility`]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Normalized concentration scores, whatever the weighting mode
    pub fn concentration_weights(&self) -> &[f64] {
        &self.concentration_weights
    }

    pub fn issue(&self, index: usize) -> Option<&IssueStatistics> {
        self.issues.get(index)
    }

    fn refresh_weights(&mut self) {
        let total: f64 = self.issues.iter().map(IssueStatistics::concentration).sum();
        if total <= 0.0 {
            return;
        }
        self.concentration_weights = self
            .issues
            .iter()
            .map(|stats| stats.concentration() / total)
            .collect();

        if self.weighting == OpponentWeighting::Concentration {
            self.weights = self.concentration_weights.clone();
        }
    }
}

impl OpponentModel for FrequencyOpponentModel {
    #[instrument(skip_all, fields(observed = self.observed))]
    fn update(&mut self, bid: &Bid) -> Result<()> {
        if bid.len() != self.issues.len() {
            return Err(DomainError::InvalidBid(format!(
                "expected {} values, got {}",
                self.issues.len(),
                bid.len()
            ))
            .into());
        }

        // Resolve every value first so a bad bid leaves the statistics untouched
        let positions = self
            .issues
            .iter()
            .zip(bid.values())
            .map(|(stats, value)| stats.position(value))
            .collect::<Result<Vec<_>>>()?;

        self.observed += 1;
        for (stats, position) in self.issues.iter_mut().zip(positions) {
            stats.observe(position);
            stats.rerank(self.observed);
        }
        self.refresh_weights();

        trace!(weights = ?self.weights, "Opponent model updated");
        Ok(())
    }

    fn estimated_utility(&self, bid: &Bid) -> f64 {
        self.issues
            .iter()
            .zip(&self.weights)
            .enumerate()
            .map(|(index, (stats, weight))| {
                let score = bid
                    .value(index)
                    .and_then(|value| stats.rank_score(value))
                    .unwrap_or(0.0);
                weight * score
            })
            .sum()
    }

    fn observed_bids(&self) -> u64 {
        self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_common::{Issue, Value};
    use proptest::prelude::*;

    fn domain() -> Arc<Domain> {
        Arc::new(Domain::new(
            "car",
            vec![
                Issue::discrete(1, "colour", ["black", "white", "red"]),
                Issue::discrete(2, "engine", ["petrol", "diesel", "electric"]),
                Issue::discrete(3, "warranty", ["1y", "3y"]),
            ],
        ))
    }

    fn bid(domain: &Domain, values: &[&str]) -> Bid {
        Bid::from_strs(domain, values).unwrap()
    }

    #[test]
    fn test_uniform_prior() {
        let domain = domain();
        let model = FrequencyOpponentModel::new(domain.clone(), OpponentWeighting::default()).unwrap();

        for w in model.weights() {
            assert!((w - 1.0 / 3.0).abs() < 1e-12);
        }
        let estimate = model.estimated_utility(&bid(&domain, &["red", "diesel", "1y"]));
        assert!((estimate - 1.0).abs() < 1e-12);
        assert_eq!(model.observed_bids(), 0);
    }

    #[test]
    fn test_frequent_value_ranks_higher() {
        let domain = domain();
        let mut model = FrequencyOpponentModel::new(domain.clone(), OpponentWeighting::Concentration).unwrap();

        model.update(&bid(&domain, &["black", "petrol", "1y"])).unwrap();
        model.update(&bid(&domain, &["black", "diesel", "3y"])).unwrap();
        model.update(&bid(&domain, &["white", "electric", "1y"])).unwrap();

        let colour = model.issue(0).unwrap();
        assert_eq!(colour.frequency(&Value::from("black")), Some(2));
        assert!(colour.rank_score(&Value::from("black")) > colour.rank_score(&Value::from("white")));
        assert!(colour.rank_score(&Value::from("white")) > colour.rank_score(&Value::from("red")));

        // engine: all three values tied at one observation each
        let engine = model.issue(1).unwrap();
        assert!(engine.rank_scores().iter().all(|s| (s - 1.0).abs() < 1e-12));

        let likely = model.estimated_utility(&bid(&domain, &["black", "petrol", "1y"]));
        let unlikely = model.estimated_utility(&bid(&domain, &["red", "petrol", "3y"]));
        assert!(likely > unlikely);
    }

    #[test]
    fn test_concentrated_issue_gets_more_weight() {
        let domain = domain();
        let mut model = FrequencyOpponentModel::new(domain.clone(), OpponentWeighting::Concentration).unwrap();

        // colour never changes, engine always changes
        model.update(&bid(&domain, &["red", "petrol", "1y"])).unwrap();
        model.update(&bid(&domain, &["red", "diesel", "3y"])).unwrap();
        model.update(&bid(&domain, &["red", "electric", "1y"])).unwrap();

        let weights = model.weights();
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(weights[0] > weights[2]);
        assert!(weights[2] > weights[1]);
    }

    #[test]
    fn test_uniform_weighting_keeps_prior_weights() {
        let domain = domain();
        let mut model = FrequencyOpponentModel::new(domain.clone(), OpponentWeighting::Uniform).unwrap();

        model.update(&bid(&domain, &["red", "petrol", "1y"])).unwrap();
        model.update(&bid(&domain, &["red", "diesel", "1y"])).unwrap();

        for w in model.weights() {
            assert!((w - 1.0 / 3.0).abs() < 1e-12);
        }
        assert!(model.concentration_weights()[0] > model.concentration_weights()[1]);
    }

    #[test]
    fn test_unknown_value_leaves_model_untouched() {
        let domain = domain();
        let mut model = FrequencyOpponentModel::new(domain.clone(), OpponentWeighting::Concentration).unwrap();
        let good = bid(&domain, &["red", "petrol", "1y"]);
        let bad = good.with_overrides([(2, Value::from("10y"))]);

        assert!(model.update(&bad).is_err());
        assert_eq!(model.observed_bids(), 0);
        assert_eq!(model.issue(0).unwrap().frequency(&Value::from("red")), Some(0));
    }

    proptest! {
        #[test]
        fn prop_rank_monotone_in_frequency(
            offers in prop::collection::vec((0usize..3, 0usize..3, 0usize..2), 1..40)
        ) {
            let domain = domain();
            let mut model = FrequencyOpponentModel::new(domain.clone(), OpponentWeighting::Concentration).unwrap();
            for (c, e, w) in &offers {
                let values = vec![
                    domain.issues[0].values().unwrap()[*c].clone(),
                    domain.issues[1].values().unwrap()[*e].clone(),
                    domain.issues[2].values().unwrap()[*w].clone(),
                ];
                model.update(&Bid::new(&domain, values).unwrap()).unwrap();
            }

            for index in 0..domain.issue_count() {
                let stats = model.issue(index).unwrap();
                let freqs = stats.frequencies();
                let scores = stats.rank_scores();
                for a in 0..freqs.len() {
                    prop_assert!(scores[a] > 0.0 && scores[a] <= 1.0);
                    for b in 0..freqs.len() {
                        if freqs[a] >= freqs[b] {
                            prop_assert!(scores[a] >= scores[b]);
                        }
                    }
                }
            }
            prop_assert!((model.weights().iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}
