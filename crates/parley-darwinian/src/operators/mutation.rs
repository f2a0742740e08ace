//! Per-issue uniform mutation

use rand::seq::SliceRandom;
use rand::Rng;

use parley_common::{Bid, Domain, Result};

/// Replace each issue's value, with probability `rate`, by a uniform draw
/// from the issue's full value set
///
/// The result is a new bid built from `bid` plus the drawn overrides.
pub fn uniform_mutation<R: Rng>(
    bid: &Bid,
    domain: &Domain,
    rate: f64,
    rng: &mut R,
) -> Result<Bid> {
    let mut overrides = Vec::new();

    for (index, issue) in domain.issues.iter().enumerate() {
        let values = issue.values()?;
        if rng.gen::<f64>() < rate {
            if let Some(value) = values.choose(rng) {
                overrides.push((index, value.clone()));
            }
        }
    }

    Ok(bid.with_overrides(overrides))
}
