//! Per-session negotiation state

use std::collections::HashSet;

use parley_common::Bid;
use parley_darwinian::ConcessionSchedule;
use serde::Serialize;
use uuid::Uuid;

/// Where the session is in the turn protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationPhase {
    /// No opponent offer received yet
    NoOffer,
    /// At least one opponent offer to evaluate
    Evaluating,
}

/// Session state owned by the agent
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    last_received_offer: Option<Bid>,
    /// Offers sent by this agent, in sending order and without duplicates
    sent_offers: Vec<Bid>,
    sent_index: HashSet<Bid>,
    max_bid: Bid,
    max_utility: f64,
    schedule: ConcessionSchedule,
    turns: u64,
}

impl SessionState {
    pub fn new(max_bid: Bid, max_utility: f64, schedule: ConcessionSchedule) -> Self {
        Self {
            id: Uuid::new_v4(),
            last_received_offer: None,
            sent_offers: Vec::new(),
            sent_index: HashSet::new(),
            max_bid,
            max_utility,
            schedule,
            turns: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> NegotiationPhase {
        if self.last_received_offer.is_some() {
            NegotiationPhase::Evaluating
        } else {
            NegotiationPhase::NoOffer
        }
    }

    pub fn last_received_offer(&self) -> Option<&Bid> {
        self.last_received_offer.as_ref()
    }

    pub fn record_received(&mut self, bid: Bid) {
        self.last_received_offer = Some(bid);
    }

    /// Remember a sent offer; returns false if it was sent before
    pub fn record_sent(&mut self, bid: &Bid) -> bool {
        if !self.sent_index.insert(bid.clone()) {
            return false;
        }
        self.sent_offers.push(bid.clone());
        true
    }

    pub fn has_sent(&self, bid: &Bid) -> bool {
        self.sent_index.contains(bid)
    }

    pub fn sent_offers(&self) -> &[Bid] {
        &self.sent_offers
    }

    /// Own maximal-utility bid
    pub fn max_bid(&self) -> &Bid {
        &self.max_bid
    }

    pub fn max_utility(&self) -> f64 {
        self.max_utility
    }

    pub fn schedule(&self) -> &ConcessionSchedule {
        &self.schedule
    }

    /// Turns decided so far
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub(crate) fn next_turn(&mut self) -> u64 {
        self.turns += 1;
        self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_common::{Domain, Issue};

    #[test]
    fn test_phase_and_history() {
        let domain = Domain::new("d", vec![Issue::discrete(1, "x", ["a", "b", "c"])]);
        let bid = |v: &str| Bid::from_strs(&domain, &[v]).unwrap();
        let mut session = SessionState::new(bid("c"), 1.0, ConcessionSchedule::new(0.5, 0.8));

        assert_eq!(session.phase(), NegotiationPhase::NoOffer);
        assert!(session.record_sent(&bid("c")));
        assert!(session.record_sent(&bid("b")));
        assert!(!session.record_sent(&bid("c")));
        assert_eq!(session.sent_offers(), &[bid("c"), bid("b")]);
        assert!(session.has_sent(&bid("b")));
        assert!(!session.has_sent(&bid("a")));

        session.record_received(bid("a"));
        assert_eq!(session.phase(), NegotiationPhase::Evaluating);
        assert_eq!(session.last_received_offer(), Some(&bid("a")));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let domain = Domain::new("d", vec![Issue::discrete(1, "x", ["a"])]);
        let bid = Bid::from_strs(&domain, &["a"]).unwrap();
        let schedule = ConcessionSchedule::new(0.5, 0.8);
        let a = SessionState::new(bid.clone(), 1.0, schedule);
        let b = SessionState::new(bid, 1.0, schedule);
        assert_ne!(a.id(), b.id());
    }
}
