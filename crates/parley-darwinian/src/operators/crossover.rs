//! Two-point crossover over issue positions

use rand::Rng;

use parley_common::Bid;

use crate::population::Scored;

/// Swap the values of every issue in a random inclusive range `[start, end]`
pub fn two_point<R: Rng>(first: &Bid, second: &Bid, rng: &mut R) -> (Bid, Bid) {
    let issues = first.len().min(second.len());
    if issues == 0 {
        return (first.clone(), second.clone());
    }

    let a = rng.gen_range(0..issues);
    let b = rng.gen_range(0..issues);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    let from_second = (start..=end).filter_map(|i| second.value(i).map(|v| (i, v.clone())));
    let from_first = (start..=end).filter_map(|i| first.value(i).map(|v| (i, v.clone())));
    (first.with_overrides(from_second), second.with_overrides(from_first))
}

/// Pair members in population order, `(0, 1), (2, 3), …` for indices below `pool_size`
///
/// The partner of the last member wraps to index 0. Each pair is recombined
/// with probability `rate`, otherwise both parents pass through unchanged.
pub fn pair_offspring<R: Rng>(
    members: &[Scored],
    pool_size: usize,
    rate: f64,
    rng: &mut R,
) -> Vec<Bid> {
    let len = members.len();
    let pool_size = pool_size.min(len);
    let mut offspring = Vec::with_capacity(pool_size + 1);

    for i in (0..pool_size).step_by(2) {
        let partner = if i + 1 == len { 0 } else { i + 1 };
        let first = &members[i].bid;
        let second = &members[partner].bid;

        if rng.gen::<f64>() < rate {
            let (a, b) = two_point(first, second, rng);
            offspring.push(a);
            offspring.push(b);
        } else {
            offspring.push(first.clone());
            offspring.push(second.clone());
        }
    }

    offspring
}
