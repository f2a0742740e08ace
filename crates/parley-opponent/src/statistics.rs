//! Per-issue frequency statistics of the opponent's offers

use parley_common::{DomainError, Issue, Result, Value};

/// Observed value frequencies and derived rank scores of one issue
#[derive(Debug, Clone)]
pub struct IssueStatistics {
    name: String,
    values: Vec<Value>,
    frequencies: Vec<u64>,
    rank_scores: Vec<f64>,
    concentration: f64,
}

impl IssueStatistics {
    /// Zero counters and a uniform prior (every rank score 1.0)
    pub fn new(issue: &Issue) -> Result<Self> {
        let values = issue.values()?.to_vec();
        let count = values.len();
        Ok(Self {
            name: issue.name.clone(),
            values,
            frequencies: vec![0; count],
            rank_scores: vec![1.0; count],
            concentration: 0.0,
        })
    }

    /// Position of `value`, or `UnknownValue`
    pub fn position(&self, value: &Value) -> Result<usize> {
        self.values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| {
                DomainError::UnknownValue {
                    issue: self.name.clone(),
                    value: value.to_string(),
                }
                .into()
            })
    }

    /// Increment the counter at `position`
    pub(crate) fn observe(&mut self, position: usize) {
        self.frequencies[position] += 1;
    }

    /// Recompute rank scores and the concentration index over `total` observed bids
    pub(crate) fn rerank(&mut self, total: u64) {
        let count = self.values.len() as f64;
        self.rank_scores = competition_ranks(&self.frequencies)
            .into_iter()
            .map(|rank| (count - rank as f64 + 1.0) / count)
            .collect();

        self.concentration = if total == 0 {
            0.0
        } else {
            self.frequencies
                .iter()
                .map(|&f| {
                    let share = f as f64 / total as f64;
                    share * share
                })
                .sum()
        };
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self, value: &Value) -> Option<u64> {
        let position = self.position(value).ok()?;
        Some(self.frequencies[position])
    }

    pub fn rank_score(&self, value: &Value) -> Option<f64> {
        let position = self.position(value).ok()?;
        Some(self.rank_scores[position])
    }

    pub fn rank_scores(&self) -> &[f64] {
        &self.rank_scores
    }

    pub fn frequencies(&self) -> &[u64] {
        &self.frequencies
    }

    /// Sum of squared frequency shares (Herfindahl index)
    pub fn concentration(&self) -> f64 {
        self.concentration
    }
}

/// Standard competition ranking by descending frequency ("1224")
///
/// A value's rank is one plus the number of values observed strictly more often.
pub fn competition_ranks(frequencies: &[u64]) -> Vec<usize> {
    frequencies
        .iter()
        .map(|f| 1 + frequencies.iter().filter(|other| *other > f).count())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_ranks() {
        assert_eq!(competition_ranks(&[3, 3, 1]), vec![1, 1, 3]);
        assert_eq!(competition_ranks(&[3, 0, 0]), vec![1, 2, 2]);
        assert_eq!(competition_ranks(&[0, 5, 2, 5]), vec![4, 1, 3, 1]);
        assert_eq!(competition_ranks(&[0, 0]), vec![1, 1]);
    }

    #[test]
    fn test_rerank_scores_and_concentration() {
        let issue = Issue::discrete(1, "colour", ["red", "green", "blue"]);
        let mut stats = IssueStatistics::new(&issue).unwrap();
        assert_eq!(stats.rank_scores(), &[1.0, 1.0, 1.0]);

        for position in [0, 0, 0, 1] {
            stats.observe(position);
        }
        stats.rerank(4);

        assert_eq!(stats.frequencies(), &[3, 1, 0]);
        let scores = stats.rank_scores();
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert!((scores[1] - 2.0 / 3.0).abs() < 1e-12);
        assert!((scores[2] - 1.0 / 3.0).abs() < 1e-12);
        // (3/4)² + (1/4)²
        assert!((stats.concentration() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_value() {
        let issue = Issue::discrete(1, "colour", ["red", "green"]);
        let stats = IssueStatistics::new(&issue).unwrap();
        assert!(stats.position(&Value::from("purple")).is_err());
        assert_eq!(stats.frequency(&Value::from("red")), Some(0));
    }
}
