//! Random index source used by tier construction and draws.
//!
//! Production code draws from [`StdRng`]; tests script the trait directly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Return a value in `0..upper`. `upper` must be non-zero.
    fn index(&mut self, upper: usize) -> usize;
}

impl RandomSource for StdRng {
    fn index(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0, "index upper bound must be non-zero");
        self.random_range(0..upper.max(1))
    }
}

/// Reproducible generator for a fixed seed, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
