//! Parley self-play demo
//!
//! Two agents with opposed preferences negotiate a synthetic supply
//! contract. Each only sees a partial ranking of its own preferences.

use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parley_agent::{Action, ActionKind, AgentConfig, NegotiationAgent, PARLEY_VERSION};
use parley_common::{AdditiveUtility, Bid, BidRanking, Domain, Issue};

const MAX_TURNS: u32 = 200;
const RANKED_BIDS: usize = 40;
const DEFAULT_SEED: u64 = 7;

fn contract_domain() -> Arc<Domain> {
    Arc::new(Domain::new(
        "supply-contract",
        vec![
            Issue::discrete(1, "price", ["low", "fair", "high", "premium"]),
            Issue::discrete(2, "delivery", ["1d", "3d", "1w", "2w"]),
            Issue::discrete(3, "warranty", ["none", "1y", "3y"]),
            Issue::discrete(4, "payment", ["upfront", "30d", "60d"]),
        ],
    ))
}

fn buyer_utility(domain: &Arc<Domain>) -> Result<AdditiveUtility> {
    Ok(AdditiveUtility::from_parts(
        domain.clone(),
        vec![0.4, 0.25, 0.2, 0.15],
        vec![
            vec![1.0, 0.7, 0.3, 0.0],
            vec![1.0, 0.8, 0.4, 0.0],
            vec![0.0, 0.6, 1.0],
            vec![0.0, 0.6, 1.0],
        ],
    )?)
}

fn seller_utility(domain: &Arc<Domain>) -> Result<AdditiveUtility> {
    Ok(AdditiveUtility::from_parts(
        domain.clone(),
        vec![0.5, 0.1, 0.15, 0.25],
        vec![
            vec![0.0, 0.4, 0.8, 1.0],
            vec![0.2, 0.6, 1.0, 0.9],
            vec![1.0, 0.5, 0.0],
            vec![1.0, 0.5, 0.0],
        ],
    )?)
}

/// Partial ranking: a random sample of bids ordered by the true utility
fn sample_ranking(
    domain: &Domain,
    truth: &AdditiveUtility,
    rng: &mut StdRng,
) -> Result<BidRanking> {
    let mut bids: Vec<Bid> = Vec::with_capacity(RANKED_BIDS);
    for _ in 0..RANKED_BIDS {
        let mut values = Vec::with_capacity(domain.issue_count());
        for issue in &domain.issues {
            let choices = issue.values()?;
            values.push(choices[rng.gen_range(0..choices.len())].clone());
        }
        let bid = Bid::new(domain, values)?;
        if !bids.contains(&bid) {
            bids.push(bid);
        }
    }
    bids.sort_by(|a, b| truth.utility(a).total_cmp(&truth.utility(b)));
    // the best bid is always elicited
    let best = truth.max_utility_bid()?;
    bids.retain(|bid| bid != &best);
    bids.push(best);
    Ok(BidRanking::new(bids)?)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Parley self-play v{}", PARLEY_VERSION);

    let config = AgentConfig::load()?;
    info!("Loaded configuration: {:?}", config);
    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    let mut rng = StdRng::seed_from_u64(seed);

    let domain = contract_domain();
    let buyer_truth = buyer_utility(&domain)?;
    let seller_truth = seller_utility(&domain)?;

    let buyer_ranking = sample_ranking(&domain, &buyer_truth, &mut rng)?;
    let seller_ranking = sample_ranking(&domain, &seller_truth, &mut rng)?;

    let mut buyer = NegotiationAgent::initialize(
        domain.clone(),
        &buyer_ranking,
        AgentConfig {
            seed: Some(seed),
            ..config.clone()
        },
    )?;
    let mut seller = NegotiationAgent::initialize(
        domain.clone(),
        &seller_ranking,
        AgentConfig {
            seed: Some(seed.wrapping_add(1)),
            ..config
        },
    )?;

    info!(
        buyer = ?buyer.estimate_own_utility().weights(),
        seller = ?seller.estimate_own_utility().weights(),
        "Estimated issue weights"
    );

    for turn in 0..MAX_TURNS {
        let elapsed = f64::from(turn) / f64::from(MAX_TURNS);
        let (name, actor, other) = if turn % 2 == 0 {
            ("buyer", &mut buyer, &mut seller)
        } else {
            ("seller", &mut seller, &mut buyer)
        };

        let allowed: &[ActionKind] = if actor.session().last_received_offer().is_some() {
            &[ActionKind::Accept, ActionKind::Offer]
        } else {
            &[ActionKind::Offer]
        };

        match actor.decide_action(allowed, elapsed)? {
            Action::Offer(bid) => {
                info!(
                    turn,
                    party = name,
                    bid = %bid,
                    buyer_utility = buyer_truth.utility(&bid),
                    seller_utility = seller_truth.utility(&bid),
                    "Offer"
                );
                other.on_opponent_offer(bid)?;
            }
            Action::Accept(bid) => {
                info!(
                    turn,
                    party = name,
                    bid = %bid,
                    buyer_utility = buyer_truth.utility(&bid),
                    seller_utility = seller_truth.utility(&bid),
                    "Agreement reached"
                );
                return Ok(());
            }
        }
    }

    warn!(turns = MAX_TURNS, "Deadline reached without agreement");
    Ok(())
}
