//! Jump-multiplying linear congruential generator.
//!
//! Drives the Odocrypt key schedule. A plain LCG gives every seed the same
//! sequence from a different starting point; this generator advances its
//! multiplicand and addend on every draw, yielding the 1st, 3rd, 6th, 10th,
//! ... outputs of the base LCG, so every seed produces a distinct sequence.

use crate::consts::{BASE_ADDEND, BASE_MULTIPLICAND};

/// Deterministic schedule generator.
///
/// Owned by exactly one schedule build; never shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdoRandom {
    current: u64,
    multiplicand: u64,
    addend: u64,
}

impl OdoRandom {
    /// Creates a generator seeded with an epoch key.
    ///
    /// # Parameters
    /// - `seed`: The epoch key.
    pub fn new(seed: u32) -> Self {
        OdoRandom {
            current: u64::from(seed),
            multiplicand: 1,
            addend: 0,
        }
    }

    /// Advances the generator and returns the high 32 bits of the new state.
    pub fn next_u32(&mut self) -> u32 {
        self.addend = self
            .addend
            .wrapping_add(self.multiplicand.wrapping_mul(BASE_ADDEND));
        self.multiplicand = self.multiplicand.wrapping_mul(BASE_MULTIPLICAND);
        self.current = self
            .current
            .wrapping_mul(self.multiplicand)
            .wrapping_add(self.addend);
        (self.current >> 32) as u32
    }

    /// Returns a value in `[0, n)` by scaling one 32-bit draw.
    ///
    /// # Parameters
    /// - `n`: Exclusive upper bound. `0` always yields `0`.
    pub fn next_bounded(&mut self, n: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(n)) >> 32) as u32
    }

    /// Returns a 64-bit value built from two draws, high word first.
    pub fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        (hi << 32) | u64::from(self.next_u32())
    }

    /// Shuffles `arr` in place, one bounded draw per position.
    ///
    /// Position `i` (from 1 upward) is swapped with a position drawn from
    /// `[0, i]`. Applied to an identity array this yields a permutation.
    ///
    /// # Parameters
    /// - `arr`: The slice to shuffle.
    ///
    /// # Panics
    /// Panics if `arr` holds more than `u32::MAX` elements, since bounded
    /// draws are 32-bit.
    pub fn shuffle<T>(&mut self, arr: &mut [T]) {
        for i in 1..draw_len(arr.len()) {
            let j = self.next_bounded(i + 1) as usize;
            arr.swap(i as usize, j);
        }
    }
}

/// Converts a slice length to the 32-bit range of bounded draws.
fn draw_len(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(len) => len,
        Err(_) => panic!("cannot shuffle {} elements with 32-bit draws", len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_seed() {
        let mut r1 = OdoRandom::new(12345);
        let mut r2 = OdoRandom::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.next_u32(), r2.next_u32());
        }
    }

    #[test]
    fn test_first_draws_seed_one() {
        let mut r = OdoRandom::new(1);
        assert_eq!(r.next_u32(), 1817669548);
        assert_eq!(r.next_u32(), 2784682393);
        assert_eq!(r.next_u32(), 2149679590);
        assert_eq!(r.next_u32(), 852293493);
    }

    #[test]
    fn test_first_draws_seed_zero() {
        let mut r = OdoRandom::new(0);
        assert_eq!(r.next_u32(), 335903614);
        assert_eq!(r.next_u32(), 2599843874);
    }

    #[test]
    fn test_next_u64_high_word_first() {
        let mut r = OdoRandom::new(1);
        assert_eq!(r.next_u64(), 0x6c57_6fac_a5fa_e199);
    }

    #[test]
    fn test_next_bounded_range() {
        let mut r = OdoRandom::new(42);
        for bound in [1u32, 2, 3, 7, 10, 63, 64, 1000, 1024] {
            for _ in 0..200 {
                let val = r.next_bounded(bound);
                assert!(val < bound, "next_bounded({}) returned {}", bound, val);
            }
        }
    }

    #[test]
    fn test_next_bounded_zero() {
        let mut r = OdoRandom::new(42);
        assert_eq!(r.next_bounded(0), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut r = OdoRandom::new(7);
        let mut arr: Vec<u16> = (0..1024).collect();
        r.shuffle(&mut arr);
        let mut sorted = arr.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..1024).collect::<Vec<u16>>());
        assert_ne!(arr, sorted, "shuffle left the identity untouched");
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut r = OdoRandom::new(7);
        let before = r.clone();
        let mut empty: [u8; 0] = [];
        r.shuffle(&mut empty);
        let mut single = [9u8];
        r.shuffle(&mut single);
        assert_eq!(single, [9]);
        assert_eq!(r, before, "no draws expected for length <= 1");
    }

    #[test]
    fn test_shuffle_draws_once_per_position() {
        let mut r = OdoRandom::new(9);
        let mut expected = r.clone();
        let mut arr = [0u8; 64];
        r.shuffle(&mut arr);
        for _ in 1..64 {
            expected.next_u32();
        }
        assert_eq!(r, expected);
    }

    #[test]
    fn test_draw_len_in_range() {
        assert_eq!(draw_len(0), 0);
        assert_eq!(draw_len(1024), 1024);
        assert_eq!(draw_len(u32::MAX as usize), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "32-bit draws")]
    fn test_draw_len_rejects_oversized() {
        draw_len(u32::MAX as usize + 1);
    }

    #[test]
    fn test_different_seeds_are_not_shifted_copies() {
        let mut a = OdoRandom::new(1);
        let seq_a: Vec<u32> = (0..64).map(|_| a.next_u32()).collect();
        let mut b = OdoRandom::new(2);
        let first_b = b.next_u32();
        assert!(!seq_a.contains(&first_b));
    }
}
