//! RNG oracle for deterministic random number generation.
//!
//! Target selection is the only random mechanic in the simulation. Routing it
//! through a trait keeps the battle replayable: given the same seed, the same
//! rosters produce the same sequence of targets.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Pick an index into a collection of `len` elements.
    ///
    /// Returns `None` for an empty collection.
    fn pick_index(&self, seed: u64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32(seed) as usize % len)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 32-bit output from 64-bit state, a single
/// multiply plus xorshift and rotate. Stateless by design; callers derive a
/// fresh seed per draw with [`compute_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the LCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then a random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Compute a deterministic seed from battle state components.
///
/// # Arguments
///
/// * `battle_seed` - Base seed fixed at battle start (for replay)
/// * `nonce` - Draw sequence number (increments each random draw)
/// * `actor_id` - Combatant the draw belongs to
/// * `context` - Distinguishes multiple independent draws in one action
pub fn compute_seed(battle_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64/FxHash-style combiners followed by an avalanche step.
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_output() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn pick_index_stays_in_bounds() {
        let rng = PcgRng;
        for seed in 0..256u64 {
            let idx = rng.pick_index(seed, 3).unwrap();
            assert!(idx < 3);
        }
        assert_eq!(rng.pick_index(7, 0), None);
    }

    #[test]
    fn compute_seed_varies_by_component() {
        let base = compute_seed(1, 2, 3, 4);
        assert_ne!(base, compute_seed(2, 2, 3, 4));
        assert_ne!(base, compute_seed(1, 3, 3, 4));
        assert_ne!(base, compute_seed(1, 2, 4, 4));
        assert_ne!(base, compute_seed(1, 2, 3, 5));
    }
}
