//! Random sources for shuffle traversal
//!
//! Shuffle never permutes a collection up front. Each "next" draws one index,
//! so the draw is abstracted behind `RandomSource` and tests can script it.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Source of uniformly distributed indices
pub trait RandomSource: Send {
    /// Uniform index in `0..bound`
    ///
    /// Callers never pass `bound == 0`.
    fn index(&mut self, bound: usize) -> usize;
}

/// Thread-local RNG (default for real sessions)
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&mut self, bound: usize) -> usize {
        thread_rng().gen_range(0..bound)
    }
}

/// Seeded RNG for reproducible sequences
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Uniform index in `0..len` that is never `exclude`
///
/// Draws once from `len - 1` slots and skips over the excluded one, so the
/// result is uniform without rejection. Requires `len > 1` and `exclude < len`.
pub(crate) fn index_excluding(random: &mut dyn RandomSource, len: usize, exclude: usize) -> usize {
    let drawn = random.index(len - 1);
    if drawn >= exclude {
        drawn + 1
    } else {
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Fixed(usize);

    impl RandomSource for Fixed {
        fn index(&mut self, bound: usize) -> usize {
            self.0.min(bound - 1)
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);

        let first: Vec<usize> = (0..20).map(|_| a.index(10)).collect();
        let second: Vec<usize> = (0..20).map(|_| b.index(10)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn thread_random_stays_in_bounds() {
        let mut random = ThreadRandom;
        for _ in 0..200 {
            assert!(random.index(7) < 7);
        }
    }

    #[test]
    fn excluding_skips_over_excluded_slot() {
        assert_eq!(index_excluding(&mut Fixed(0), 3, 0), 1);
        assert_eq!(index_excluding(&mut Fixed(1), 3, 1), 2);
        assert_eq!(index_excluding(&mut Fixed(1), 3, 2), 1);
    }

    #[test]
    fn excluding_covers_every_other_index() {
        let mut random = SeededRandom::new(7);
        let seen: HashSet<usize> = (0..500)
            .map(|_| index_excluding(&mut random, 5, 2))
            .collect();

        assert!(!seen.contains(&2));
        assert_eq!(seen.len(), 4);
    }
}
