//! Randomness capability
//!
//! Sessions only need three things from a random source: shuffle a slice,
//! pick an index, and draw an integer in a range. Anything implementing
//! `rand::Rng` provides them; sessions themselves run on `Pcg32`.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Uniform random operations used by the orchestrators
pub trait Randomness {
    /// Fisher-Yates shuffle in place
    fn shuffle_slice<T>(&mut self, items: &mut [T]);

    /// Uniform index in `0..len`, None when `len == 0`
    fn pick_index(&mut self, len: usize) -> Option<usize>;

    /// Uniform integer in `lo..hi` (returns `lo` for an empty range)
    fn int_in_range(&mut self, lo: u32, hi: u32) -> u32;
}

impl<R: Rng + ?Sized> Randomness for R {
    fn shuffle_slice<T>(&mut self, items: &mut [T]) {
        items.shuffle(self);
    }

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.random_range(0..len))
        }
    }

    fn int_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo { lo } else { self.random_range(lo..hi) }
    }
}

/// Seed record for a session RNG, kept so a run can be replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Fresh seed from the thread RNG (no fixed seed requirement)
    pub fn from_entropy() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_index_empty() {
        let mut rng = RngState::new(1).to_rng();
        assert_eq!(rng.pick_index(0), None);
        for _ in 0..100 {
            let i = rng.pick_index(3).unwrap();
            assert!(i < 3);
        }
    }

    #[test]
    fn test_int_in_range_bounds() {
        let mut rng = RngState::new(7).to_rng();
        assert_eq!(rng.int_in_range(5, 5), 5);
        for _ in 0..100 {
            let v = rng.int_in_range(2, 6);
            assert!((2..6).contains(&v));
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = RngState::new(42).to_rng();
        let mut items: Vec<u32> = (0..16).collect();
        rng.shuffle_slice(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let mut a: Vec<u32> = (0..10).collect();
        let mut b = a.clone();
        RngState::new(99).to_rng().shuffle_slice(&mut a);
        RngState::new(99).to_rng().shuffle_slice(&mut b);
        assert_eq!(a, b);
    }
}
