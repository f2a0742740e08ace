//! BidRanking - elicited, ordered sample of the agent's own preferences
//!
//! Bids are ordered from least to most preferred. The last bid is the
//! designated maximal bid used to anchor utility estimation.

use serde::{Deserialize, Serialize};

use super::bid::Bid;
use crate::error::{ParleyError, Result};

/// Ordered sample of bids, least preferred first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bid>", into = "Vec<Bid>")]
pub struct BidRanking {
    bids: Vec<Bid>,
}

impl BidRanking {
    /// Create a ranking; at least one bid is required
    pub fn new(bids: Vec<Bid>) -> Result<Self> {
        if bids.is_empty() {
            return Err(ParleyError::InsufficientPreferenceData(
                "bid ranking is empty, no maximal bid available".to_string(),
            ));
        }
        Ok(Self { bids })
    }

    /// Most preferred bid
    pub fn maximal_bid(&self) -> &Bid {
        &self.bids[self.bids.len() - 1]
    }

    /// Least preferred bid
    pub fn minimal_bid(&self) -> &Bid {
        &self.bids[0]
    }

    /// Adjacent `(lower, higher)` pairs in ranking order
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (&Bid, &Bid)> + '_ {
        self.bids.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Number of adjacent comparisons
    pub fn comparison_count(&self) -> usize {
        self.bids.len().saturating_sub(1)
    }

    /// Up to `n` most preferred bids, most preferred first
    pub fn top(&self, n: usize) -> impl Iterator<Item = &Bid> + '_ {
        self.bids.iter().rev().take(n)
    }

    /// Bids from least to most preferred
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }
}

impl TryFrom<Vec<Bid>> for BidRanking {
    type Error = ParleyError;

    fn try_from(bids: Vec<Bid>) -> Result<Self> {
        Self::new(bids)
    }
}

impl From<BidRanking> for Vec<Bid> {
    fn from(ranking: BidRanking) -> Self {
        ranking.bids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::issue::{Domain, Issue};

    fn bids() -> Vec<Bid> {
        let domain = Domain::new("d", vec![Issue::discrete(1, "colour", ["red", "green", "blue"])]);
        ["red", "green", "blue"]
            .iter()
            .map(|v| Bid::from_strs(&domain, &[v]).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_ranking_rejected() {
        let err = BidRanking::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ParleyError::InsufficientPreferenceData(_)));
    }

    #[test]
    fn test_maximal_and_pairs() {
        let bids = bids();
        let ranking = BidRanking::new(bids.clone()).unwrap();

        assert_eq!(ranking.maximal_bid(), &bids[2]);
        assert_eq!(ranking.minimal_bid(), &bids[0]);
        assert_eq!(ranking.comparison_count(), 2);

        let pairs: Vec<_> = ranking.adjacent_pairs().collect();
        assert_eq!(pairs[0], (&bids[0], &bids[1]));
        assert_eq!(pairs[1], (&bids[1], &bids[2]));
    }

    #[test]
    fn test_top_is_most_preferred_first() {
        let bids = bids();
        let ranking = BidRanking::new(bids.clone()).unwrap();

        let top: Vec<_> = ranking.top(2).collect();
        assert_eq!(top, vec![&bids[2], &bids[1]]);
        assert_eq!(ranking.top(10).count(), 3);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let parsed: std::result::Result<BidRanking, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());
    }
}
