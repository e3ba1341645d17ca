//! 随机数源
//!
//! A scenario threads exactly one generator through assignment and emission.

use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
