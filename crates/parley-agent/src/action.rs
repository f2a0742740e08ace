//! Actions exchanged with the host runtime

use std::fmt;

use parley_common::Bid;
use serde::{Deserialize, Serialize};

/// Kind of action the host allows on a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Accept,
    Offer,
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "bid", rename_all = "snake_case")]
pub enum Action {
    /// Accept the opponent's last offer
    Accept(Bid),
    /// Propose a bid
    Offer(Bid),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Accept(_) => ActionKind::Accept,
            Action::Offer(_) => ActionKind::Offer,
        }
    }

    pub fn bid(&self) -> &Bid {
        match self {
            Action::Accept(bid) | Action::Offer(bid) => bid,
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Action::Accept(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Accept(bid) => write!(f, "Accept({})", bid),
            Action::Offer(bid) => write!(f, "Offer({})", bid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_common::{Domain, Issue};

    #[test]
    fn test_kind_and_serde() {
        let domain = Domain::new("d", vec![Issue::discrete(1, "x", ["a", "b"])]);
        let bid = Bid::from_strs(&domain, &["b"]).unwrap();
        let action = Action::Offer(bid.clone());

        assert_eq!(action.kind(), ActionKind::Offer);
        assert_eq!(action.bid(), &bid);
        assert!(!action.is_accept());

        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"offer\""));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
