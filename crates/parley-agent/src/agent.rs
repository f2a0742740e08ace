//! Negotiation agent: owns the session and decides one action per turn

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use parley_common::{
    AdditiveUtility, Bid, BidRanking, Domain, DomainError, ParleyError, Result, UTILITY_EPSILON,
};
use parley_darwinian::{FitnessCalculator, GeneticSearchEngine, Population, Scored};
use parley_opponent::{FrequencyOpponentModel, OpponentModel};
use parley_preference::LinearProgramEstimator;

use crate::action::{Action, ActionKind};
use crate::config::AgentConfig;
use crate::session::SessionState;

/// Negotiation agent for one bilateral session
///
/// All randomness is drawn from the single RNG `R` owned by the agent.
pub struct NegotiationAgent<R: Rng = StdRng> {
    config: AgentConfig,
    utility: AdditiveUtility,
    opponent: FrequencyOpponentModel,
    engine: GeneticSearchEngine,
    population: Population,
    session: SessionState,
    last_candidate: Option<Scored>,
    rng: R,
}

impl NegotiationAgent<StdRng> {
    /// Build an agent with an RNG seeded from `config.seed`, or from entropy
    pub fn initialize(
        domain: Arc<Domain>,
        ranking: &BidRanking,
        config: AgentConfig,
    ) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(domain, ranking, config, rng)
    }
}

impl<R: Rng> NegotiationAgent<R> {
    /// Estimate own preferences from the ranking and seed the population
    pub fn with_rng(
        domain: Arc<Domain>,
        ranking: &BidRanking,
        config: AgentConfig,
        rng: R,
    ) -> Result<Self> {
        let utility = LinearProgramEstimator::new(domain.clone())?.estimate(ranking)?;
        Self::with_utility(domain, ranking, utility, config, rng)
    }

    /// Start from a known own utility instead of estimating one
    ///
    /// The ranking still seeds the population.
    pub fn with_utility(
        domain: Arc<Domain>,
        ranking: &BidRanking,
        utility: AdditiveUtility,
        config: AgentConfig,
        rng: R,
    ) -> Result<Self> {
        if utility.domain().as_ref() != domain.as_ref() {
            return Err(DomainError::ShapeMismatch(format!(
                "utility is defined over domain '{}', session uses '{}'",
                utility.domain().name,
                domain.name
            ))
            .into());
        }
        let engine = GeneticSearchEngine::new(domain.clone(), config.darwinian.clone())?;
        let opponent = FrequencyOpponentModel::new(domain.clone(), config.opponent_weighting)?;

        let max_bid = utility.max_utility_bid()?;
        let max_utility = utility.utility(&max_bid);
        let population = engine.seed_population(ranking);
        let session = SessionState::new(max_bid, max_utility, config.darwinian.schedule());

        info!(
            session = %session.id(),
            domain = %domain.name,
            ranked_bids = ranking.len(),
            population = population.len(),
            max_utility,
            "Negotiation agent initialized"
        );

        Ok(Self {
            config,
            utility,
            opponent,
            engine,
            population,
            session,
            last_candidate: None,
            rng,
        })
    }

    /// Own utility function estimated at initialization
    pub fn estimate_own_utility(&self) -> &AdditiveUtility {
        &self.utility
    }

    /// Record an opponent offer and feed it to the opponent model
    ///
    /// A bid outside the domain is rejected and leaves the session untouched.
    pub fn on_opponent_offer(&mut self, bid: Bid) -> Result<()> {
        self.opponent.update(&bid)?;
        debug!(session = %self.session.id(), bid = %bid, "Opponent offer received");
        self.session.record_received(bid);
        Ok(())
    }

    /// Decide this turn's action
    ///
    /// `elapsed` is the negotiation clock as a fraction of the deadline.
    /// When no allowed kind can be produced the call fails before the turn
    /// counter or the population move.
    #[instrument(skip(self, allowed), fields(session = %self.session.id(), turn = self.session.turns() + 1))]
    pub fn decide_action(&mut self, allowed: &[ActionKind], elapsed: f64) -> Result<Action> {
        if !self.can_act(allowed) {
            return Err(ParleyError::NoAllowedAction);
        }
        self.session.next_turn();
        let preferred = self.preferred_action(elapsed)?;
        let action = self.restrict_to(preferred, allowed)?;

        if let Action::Offer(bid) = &action {
            self.session.record_sent(bid);
        }
        debug!(action = %action, utility = self.utility.utility(action.bid()), "Action decided");
        Ok(action)
    }

    fn preferred_action(&mut self, elapsed: f64) -> Result<Action> {
        let offer = match self.session.last_received_offer() {
            Some(offer) => offer.clone(),
            None => return Ok(Action::Offer(self.session.max_bid().clone())),
        };

        let offered_utility = self.utility.utility(&offer);
        if offered_utility >= self.session.max_utility() - UTILITY_EPSILON {
            debug!(offered_utility, "Offer matches own best bid");
            return Ok(Action::Accept(offer));
        }
        if self.session.has_sent(&offer) {
            debug!("Opponent replayed one of our offers");
            return Ok(Action::Accept(offer));
        }

        let candidate = self.evolve_candidate(&offer, elapsed)?;
        let candidate_utility = self.utility.utility(&candidate.bid);
        debug!(
            fitness = candidate.fitness,
            candidate_utility,
            offered_utility,
            "Shortlist candidate drawn"
        );

        let action = if candidate_utility >= offered_utility {
            Action::Offer(candidate.bid.clone())
        } else {
            Action::Accept(offer)
        };
        self.last_candidate = Some(candidate);
        Ok(action)
    }

    /// Run one generation and draw a candidate from the top-K shortlist
    fn evolve_candidate(&mut self, offer: &Bid, elapsed: f64) -> Result<Scored> {
        let schedule = *self.session.schedule();
        let time_pressure = schedule.time_pressure(elapsed);
        let calculator = FitnessCalculator::new(
            &self.utility,
            &self.opponent,
            self.session.max_utility(),
            schedule.alpha(),
        );

        // replaced only once the generation succeeded
        let next = self.engine.evolve(
            self.population.clone(),
            &calculator,
            offer,
            time_pressure,
            &mut self.rng,
        )?;

        let shortlist = next.top(self.config.darwinian.shortlist_size);
        if shortlist.is_empty() {
            return Err(ParleyError::PopulationExhausted {
                generation: next.generation(),
            });
        }
        let candidate = shortlist[self.rng.gen_range(0..shortlist.len())].clone();

        self.population = next;
        Ok(candidate)
    }

    /// Any preferred action maps onto an offer, and onto an accept once an offer was received
    fn can_act(&self, allowed: &[ActionKind]) -> bool {
        allowed.contains(&ActionKind::Offer)
            || (allowed.contains(&ActionKind::Accept)
                && self.session.last_received_offer().is_some())
    }

    /// Map the preferred action onto what the host allows this turn
    fn restrict_to(&self, preferred: Action, allowed: &[ActionKind]) -> Result<Action> {
        if allowed.contains(&preferred.kind()) {
            return Ok(preferred);
        }

        match preferred {
            // offering the bid we would accept signals agreement
            Action::Accept(bid) if allowed.contains(&ActionKind::Offer) => Ok(Action::Offer(bid)),
            Action::Offer(_) if allowed.contains(&ActionKind::Accept) => self
                .session
                .last_received_offer()
                .cloned()
                .map(Action::Accept)
                .ok_or(ParleyError::NoAllowedAction),
            _ => Err(ParleyError::NoAllowedAction),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn opponent(&self) -> &FrequencyOpponentModel {
        &self.opponent
    }

    /// Candidate drawn on the most recent evolving turn, with its fitness
    pub fn last_candidate(&self) -> Option<&Scored> {
        self.last_candidate.as_ref()
    }
}
