//! Random-source seam for the generator.
//!
//! The generator only ever asks for "an index below `bound`" or "a coin flip",
//! so any [`rand::Rng`] works, and tests can script the draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Fair coin flip
    fn next_bool(&mut self) -> bool {
        self.next_index(2) == 1
    }
}

impl<R: Rng> RandomSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }

    fn next_bool(&mut self) -> bool {
        self.random_bool(0.5)
    }
}

/// Build the generator RNG: seeded for reproducible runs, OS-seeded otherwise.
///
/// `StdRng` is a ChaCha-based CSPRNG, so the unseeded form is suitable for
/// real passwords.
pub fn std_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
