//! Deterministic pseudo-random stream for chunk generation
//!
//! Chunk layout must be bit-identical for the same (world seed, chunk)
//! pair on every platform, so generation cannot draw from `rand`'s
//! version-dependent distributions. This is a plain linear congruential
//! recurrence with fixed constants; its sequence is the compatibility
//! contract for saved worlds.

/// Linear congruential generator yielding floats in `[0, 1)`.
///
/// `seed = (seed * 1103515245 + 12345) mod 2^31`, the classic glibc
/// constants. State is kept in a `u64` so the multiply never overflows
/// before the mask.
#[derive(Debug, Clone)]
pub struct ChunkRng {
    seed: u64,
}

const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;
const MODULUS: u64 = 1 << 31;

impl ChunkRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed: seed % MODULUS,
        }
    }

    /// Next value in `[0, 1)`
    pub fn next(&mut self) -> f32 {
        self.seed = (self
            .seed
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT))
            & (MODULUS - 1);
        // take the top 23 bits so the quotient is exact in f32; dividing
        // the raw 31-bit state could round up to 1.0
        (self.seed >> 8) as f32 / (1u32 << 23) as f32
    }

    /// Uniform value in `[lo, hi)`
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next() * (hi - lo)
    }

    /// Uniform integer in `[lo, hi]` (inclusive)
    pub fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next() * (hi - lo + 1) as f32) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ChunkRng::new(12_345);
        let mut b = ChunkRng::new(12_345);
        for _ in 0..1000 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = ChunkRng::new(1);
        let mut b = ChunkRng::new(2);
        let diverges = (0..16).any(|_| a.next() != b.next());
        assert!(diverges);
    }

    #[test]
    fn test_output_stays_in_unit_interval() {
        let mut rng = ChunkRng::new(987_654_321);
        for _ in 0..10_000 {
            let v = rng.next();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_range_u32_hits_both_endpoints() {
        let mut rng = ChunkRng::new(7);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..10_000 {
            match rng.range_u32(3, 5) {
                3 => seen_lo = true,
                5 => seen_hi = true,
                4 => {}
                other => panic!("out of range: {other}"),
            }
        }
        assert!(seen_lo && seen_hi);
    }

    #[test]
    fn test_known_first_value() {
        // Pin the recurrence itself: seed 1 -> (1103515245 + 12345) mod 2^31
        let mut rng = ChunkRng::new(1);
        let state = (MULTIPLIER + INCREMENT) % MODULUS;
        let expected = (state >> 8) as f32 / (1u32 << 23) as f32;
        assert_eq!(rng.next(), expected);
    }
}
