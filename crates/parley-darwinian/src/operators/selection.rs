//! Binary tournament selection

use rand::Rng;

use crate::population::Scored;

/// Fill a mating pool of `size` by binary tournaments over `members`
///
/// The first contestant wins only with strictly higher fitness.
pub fn tournament<R: Rng>(members: &[Scored], size: usize, rng: &mut R) -> Vec<Scored> {
    if members.is_empty() {
        return Vec::new();
    }

    (0..size)
        .map(|_| {
            let first = &members[rng.gen_range(0..members.len())];
            let second = &members[rng.gen_range(0..members.len())];
            if first.fitness > second.fitness {
                first.clone()
            } else {
                second.clone()
            }
        })
        .collect()
}
