//! AdditiveUtility - weighted sum of per-issue value evaluations
//!
//! ```text
//! u(bid) = Σ_i w_i × e_i(bid[i])
//! ```
//!
//! Once normalized, weights sum to 1 and every issue has at least one value
//! evaluated at 1, so `0 ≤ u(bid) ≤ 1` for every bid in the domain.

use std::sync::Arc;

use serde::Serialize;

use super::bid::Bid;
use super::issue::{Domain, Value};
use crate::error::{DomainError, Result};
use crate::UTILITY_EPSILON;

/// Weight and value evaluations of a single issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueEvaluator {
    /// Issue weight (0-1)
    pub weight: f64,
    /// Evaluation per value, aligned with the issue's value order
    pub evaluations: Vec<f64>,
}

impl IssueEvaluator {
    /// Largest value evaluation of this issue
    pub fn max_evaluation(&self) -> f64 {
        self.evaluations
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Index of the best value; earliest wins on ties
    fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, eval) in self.evaluations.iter().enumerate() {
            if *eval > self.evaluations[best] {
                best = i;
            }
        }
        best
    }
}

/// Additive utility space over a discrete domain
#[derive(Debug, Clone, Serialize)]
pub struct AdditiveUtility {
    #[serde(skip)]
    domain: Arc<Domain>,
    evaluators: Vec<IssueEvaluator>,
}

impl AdditiveUtility {
    /// Uniform weights (1/issueCount) and all value evaluations at zero
    pub fn zeroed(domain: Arc<Domain>) -> Result<Self> {
        domain.require_discrete()?;
        let weight = 1.0 / domain.issue_count().max(1) as f64;
        let evaluators = domain
            .issues
            .iter()
            .map(|issue| {
                let count = issue.values().map(<[Value]>::len).unwrap_or(0);
                IssueEvaluator {
                    weight,
                    evaluations: vec![0.0; count],
                }
            })
            .collect();
        Ok(Self { domain, evaluators })
    }

    /// Build from explicit weights and evaluations (aligned with domain order)
    pub fn from_parts(
        domain: Arc<Domain>,
        weights: Vec<f64>,
        evaluations: Vec<Vec<f64>>,
    ) -> Result<Self> {
        domain.require_discrete()?;
        if weights.len() != domain.issue_count() || evaluations.len() != domain.issue_count() {
            return Err(DomainError::ShapeMismatch(format!(
                "{} issues, {} weights, {} evaluation rows",
                domain.issue_count(),
                weights.len(),
                evaluations.len()
            ))
            .into());
        }

        let mut evaluators = Vec::with_capacity(weights.len());
        for ((issue, weight), evals) in domain.issues.iter().zip(weights).zip(evaluations) {
            if evals.len() != issue.values()?.len() {
                return Err(DomainError::ShapeMismatch(format!(
                    "issue '{}' has {} values but {} evaluations",
                    issue.name,
                    issue.values()?.len(),
                    evals.len()
                ))
                .into());
            }
            evaluators.push(IssueEvaluator {
                weight,
                evaluations: evals,
            });
        }

        Ok(Self { domain, evaluators })
    }

    /// Utility of a bid; values unknown to the domain contribute nothing
    pub fn utility(&self, bid: &Bid) -> f64 {
        self.evaluators
            .iter()
            .enumerate()
            .map(|(i, evaluator)| evaluator.weight * self.evaluation_of(i, bid))
            .sum()
    }

    /// Unweighted evaluation of issue `index` for the value the bid assigns to it
    pub fn evaluation_of(&self, index: usize, bid: &Bid) -> f64 {
        bid.value(index)
            .and_then(|value| self.evaluation(index, value))
            .unwrap_or(0.0)
    }

    /// Unweighted evaluation of `value` on issue `index`
    pub fn evaluation(&self, index: usize, value: &Value) -> Option<f64> {
        let position = self.domain.issue(index)?.position(value)?;
        self.evaluators.get(index)?.evaluations.get(position).copied()
    }

    pub fn set_evaluation(&mut self, index: usize, value: &Value, evaluation: f64) -> Result<()> {
        let issue = self
            .domain
            .issue(index)
            .ok_or_else(|| DomainError::ShapeMismatch(format!("no issue at index {}", index)))?;
        let position = issue.position(value).ok_or_else(|| DomainError::UnknownValue {
            issue: issue.name.clone(),
            value: value.to_string(),
        })?;
        self.evaluators[index].evaluations[position] = evaluation;
        Ok(())
    }

    pub fn weight(&self, index: usize) -> f64 {
        self.evaluators.get(index).map(|e| e.weight).unwrap_or(0.0)
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) {
        if let Some(evaluator) = self.evaluators.get_mut(index) {
            evaluator.weight = weight;
        }
    }

    pub fn weights(&self) -> Vec<f64> {
        self.evaluators.iter().map(|e| e.weight).collect()
    }

    /// Rescale weights to sum to 1; falls back to uniform when they sum to zero
    pub fn normalize_weights(&mut self) {
        let total: f64 = self.evaluators.iter().map(|e| e.weight).sum();
        if total > UTILITY_EPSILON {
            for evaluator in &mut self.evaluators {
                evaluator.weight /= total;
            }
        } else {
            let uniform = 1.0 / self.evaluators.len().max(1) as f64;
            for evaluator in &mut self.evaluators {
                evaluator.weight = uniform;
            }
        }
    }

    /// Divide each issue's evaluations by the issue maximum
    ///
    /// An issue whose evaluations are all zero is indifferent; every value is set to 1.
    pub fn scale_values_to_unit(&mut self) {
        for evaluator in &mut self.evaluators {
            let max = evaluator.max_evaluation();
            if max > UTILITY_EPSILON {
                for eval in &mut evaluator.evaluations {
                    *eval = (*eval / max).clamp(0.0, 1.0);
                }
            } else {
                evaluator.evaluations.iter_mut().for_each(|eval| *eval = 1.0);
            }
        }
    }

    /// Exact maximum-utility bid: the best value of every issue
    pub fn max_utility_bid(&self) -> Result<Bid> {
        let mut values = Vec::with_capacity(self.evaluators.len());
        for (issue, evaluator) in self.domain.issues.iter().zip(&self.evaluators) {
            let issue_values = issue.values()?;
            values.push(issue_values[evaluator.best_index()].clone());
        }
        Bid::new(&self.domain, values)
    }

    pub fn evaluators(&self) -> &[IssueEvaluator] {
        &self.evaluators
    }

    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }
}
