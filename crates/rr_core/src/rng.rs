// crates/rr_core/src/rng.rs
//
// Seedable, integer-only RNG for every random choice the engine makes
// (bye tiebreaks, roster shuffles, partner/matchup tiebreaks, court order).
//
// The RNG is an explicit dependency of each component, never a global:
// callers seed it for reproducible runs or draw from OS entropy otherwise.
// Unbiased ranges via rejection sampling; no floating point.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Engine RNG (ChaCha20).
///
/// The mapping from a `u64` seed to the 32-byte ChaCha seed is explicit:
/// `seed.to_le_bytes()` into the first 8 bytes, the rest zero. This keeps a
/// given seed producing the same schedule on every platform.
#[derive(Debug, Clone)]
pub struct SchedRng {
    rng: ChaCha20Rng,
}

impl SchedRng {
    /// Construct from a 64-bit seed.
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
        }
    }

    /// Construct from OS entropy (non-reproducible runs).
    #[cfg(feature = "entropy")]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Raw 64-bit draw used as a random secondary sort key.
    #[inline]
    pub fn tiebreak(&mut self) -> u64 {
        self.next_u64()
    }

    /// Unbiased integer in [0, n). Returns `None` if `n == 0`.
    ///
    /// Let `threshold = 2^64 mod n` (computed via `wrapping_neg() % n`).
    /// Accept `x` if `x >= threshold`; then `x % n` is uniformly distributed.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// In-place Fisher–Yates shuffle:
    /// for i in (1..len).rev() { j ~ U{0..=i}; swap(i, j) }
    pub fn shuffle_in_place<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        if len <= 1 {
            return;
        }
        for i in (1..len).rev() {
            let j = match self.gen_range((i as u64) + 1) {
                Some(v) => v as usize,
                None => unreachable!("gen_range(>0) must return Some"),
            };
            slice.swap(i, j);
        }
    }

    /// Shuffled copy of `items`.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle_in_place(&mut out);
        out
    }
}
