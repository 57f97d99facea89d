//! Key schedule: every table the cipher needs, derived from one epoch key.
//!
//! A [`Schedule`] is built once per epoch and is read-only afterwards, so a
//! single instance can be shared across any number of hashing threads.

use std::fmt;

use tracing::debug;

use crate::consts::{
    LARGE_SBOX_COUNT, LARGE_SBOX_SIZE, PBOX_SUBROUNDS, ROTATION_COUNT, ROUNDS, SMALL_SBOX_COUNT,
    SMALL_SBOX_SIZE, STATE_SIZE, WORD_BITS, WORD_PAIRS,
};
use crate::error::OdoCryptError;
use crate::random::OdoRandom;

/// One small substitution table: a permutation of `[0, 64)`.
pub type SmallSbox = [u8; SMALL_SBOX_SIZE];

/// One large substitution table: a permutation of `[0, 1024)`.
pub type LargeSbox = [u16; LARGE_SBOX_SIZE];

/// The full small sbox layer, four tables per state word.
pub type SmallSboxes = [SmallSbox; SMALL_SBOX_COUNT];

/// The full large sbox layer, one table per state word.
pub type LargeSboxes = [LargeSbox; LARGE_SBOX_COUNT];

/// Permutation descriptor for one masked-swap / shuffle / rotate network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbox {
    mask: [[u64; WORD_PAIRS]; PBOX_SUBROUNDS],
    rotation: [[u32; WORD_PAIRS]; PBOX_SUBROUNDS - 1],
}

impl Pbox {
    /// Draws all masks, then all rotations in `[1, 63]`.
    fn generate(random: &mut OdoRandom) -> Self {
        let mut mask = [[0u64; WORD_PAIRS]; PBOX_SUBROUNDS];
        for subround in mask.iter_mut() {
            for m in subround.iter_mut() {
                *m = random.next_u64();
            }
        }
        let mut rotation = [[0u32; WORD_PAIRS]; PBOX_SUBROUNDS - 1];
        for subround in rotation.iter_mut() {
            for r in subround.iter_mut() {
                *r = random.next_bounded(WORD_BITS - 1) + 1;
            }
        }
        Pbox { mask, rotation }
    }

    /// Swap masks, one row per subround, one mask per word pair.
    pub fn mask(&self) -> &[[u64; WORD_PAIRS]; PBOX_SUBROUNDS] {
        &self.mask
    }

    /// Rotation amounts for the even word of each pair, one row per subround
    /// except the last.
    pub fn rotation(&self) -> &[[u32; WORD_PAIRS]; PBOX_SUBROUNDS - 1] {
        &self.rotation
    }
}

/// Key-dependent tables driving every round of the cipher.
#[derive(Clone, PartialEq, Eq)]
pub struct Schedule {
    key: u32,
    permutation: [Pbox; 2],
    small_sboxes: Box<SmallSboxes>,
    large_sboxes: Box<LargeSboxes>,
    rotations: [u32; ROTATION_COUNT],
    round_keys: [u16; ROUNDS],
}

impl Schedule {
    /// Builds the schedule for an epoch key.
    ///
    /// Deterministic and total: the same key always yields the same tables.
    /// Draw order is fixed: small sboxes, large sboxes, both pboxes, the
    /// rotation set, then the round keys.
    ///
    /// # Parameters
    /// - `epoch_key`: The 32-bit key of the current shape-change period.
    pub fn new(epoch_key: u32) -> Self {
        let mut random = OdoRandom::new(epoch_key);

        let mut small_sboxes: Box<SmallSboxes> =
            Box::new([[0; SMALL_SBOX_SIZE]; SMALL_SBOX_COUNT]);
        for sbox in small_sboxes.iter_mut() {
            *sbox = std::array::from_fn(|i| i as u8);
            random.shuffle(sbox);
        }

        let mut large_sboxes: Box<LargeSboxes> =
            Box::new([[0; LARGE_SBOX_SIZE]; LARGE_SBOX_COUNT]);
        for sbox in large_sboxes.iter_mut() {
            *sbox = std::array::from_fn(|i| i as u16);
            random.shuffle(sbox);
        }

        let first = Pbox::generate(&mut random);
        let second = Pbox::generate(&mut random);
        let rotations = generate_rotations(&mut random);

        let mut round_keys = [0u16; ROUNDS];
        for key in round_keys.iter_mut() {
            *key = random.next_bounded(1 << STATE_SIZE) as u16;
        }

        let schedule = Schedule {
            key: epoch_key,
            permutation: [first, second],
            small_sboxes,
            large_sboxes,
            rotations,
            round_keys,
        };
        debug_assert!(
            schedule.validate().is_ok(),
            "schedule for key {} violates its invariants",
            epoch_key
        );
        debug!(
            epoch_key,
            rotations = ?schedule.rotations,
            "built odocrypt schedule"
        );
        schedule
    }

    /// Checks the structural invariants of the schedule.
    ///
    /// # Errors
    /// - [`OdoCryptError::SboxNotBijective`] if any sbox repeats or misses a value.
    /// - [`OdoCryptError::InvalidRotationSet`] if a rotation is zero or out of
    ///   range, two rotations are equal, or their sum is even.
    pub fn validate(&self) -> Result<(), OdoCryptError> {
        let sboxes_ok = self.small_sboxes.iter().all(|t| is_bijection(t.as_slice()))
            && self.large_sboxes.iter().all(|t| is_bijection(t.as_slice()));
        if !sboxes_ok {
            return Err(OdoCryptError::SboxNotBijective);
        }
        if !is_valid_rotation_set(&self.rotations) {
            return Err(OdoCryptError::InvalidRotationSet);
        }
        Ok(())
    }

    /// Returns the epoch key the schedule was built from.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// Returns the two permutation descriptors, in round order.
    pub fn permutation(&self) -> &[Pbox; 2] {
        &self.permutation
    }

    /// Returns the 40 small sboxes.
    pub fn small_sboxes(&self) -> &SmallSboxes {
        &self.small_sboxes
    }

    /// Returns the 10 large sboxes, one per state word.
    pub fn large_sboxes(&self) -> &LargeSboxes {
        &self.large_sboxes
    }

    /// Returns the rotation set of the linear mixing step.
    pub fn rotations(&self) -> &[u32; ROTATION_COUNT] {
        &self.rotations
    }

    /// Returns the per-round keys.
    pub fn round_keys(&self) -> &[u16; ROUNDS] {
        &self.round_keys
    }

    /// Builds the inverse of every sbox, for decryption.
    pub(crate) fn inverse_sboxes(&self) -> InverseSboxes {
        let mut small: Box<SmallSboxes> =
            Box::new([[0; SMALL_SBOX_SIZE]; SMALL_SBOX_COUNT]);
        for (inverse, table) in small.iter_mut().zip(self.small_sboxes.iter()) {
            *inverse = invert_table(table, |i| i as u8);
        }
        let mut large: Box<LargeSboxes> =
            Box::new([[0; LARGE_SBOX_SIZE]; LARGE_SBOX_COUNT]);
        for (inverse, table) in large.iter_mut().zip(self.large_sboxes.iter()) {
            *inverse = invert_table(table, |i| i as u16);
        }
        InverseSboxes { small, large }
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("key", &self.key)
            .field("rotations", &self.rotations)
            .finish_non_exhaustive()
    }
}

/// Inverse substitution tables, derived from a [`Schedule`].
pub(crate) struct InverseSboxes {
    pub(crate) small: Box<SmallSboxes>,
    pub(crate) large: Box<LargeSboxes>,
}

/// Picks the rotation set: five amounts from a shuffled `[1, 63]`, then the
/// first later candidate that makes the sum odd.
fn generate_rotations(random: &mut OdoRandom) -> [u32; ROTATION_COUNT] {
    let mut candidates: [u32; WORD_BITS as usize - 1] = std::array::from_fn(|i| i as u32 + 1);
    random.shuffle(&mut candidates);

    let mut rotations = [0u32; ROTATION_COUNT];
    rotations[..ROTATION_COUNT - 1].copy_from_slice(&candidates[..ROTATION_COUNT - 1]);
    let sum: u32 = rotations[..ROTATION_COUNT - 1].iter().sum();

    // The 58 remaining candidates hold both parities, so the scan always hits.
    rotations[ROTATION_COUNT - 1] = candidates[ROTATION_COUNT - 1];
    for &candidate in &candidates[ROTATION_COUNT - 1..] {
        if (candidate + sum) % 2 == 1 {
            rotations[ROTATION_COUNT - 1] = candidate;
            break;
        }
    }
    rotations
}

fn is_bijection<T: Copy + Into<usize>>(table: &[T]) -> bool {
    let mut seen = vec![false; table.len()];
    for &value in table {
        let value: usize = value.into();
        if value >= table.len() || seen[value] {
            return false;
        }
        seen[value] = true;
    }
    true
}

fn is_valid_rotation_set(rotations: &[u32]) -> bool {
    let in_range = rotations.iter().all(|&r| (1..WORD_BITS).contains(&r));
    let distinct = rotations
        .iter()
        .enumerate()
        .all(|(i, r)| !rotations[..i].contains(r));
    let sum: u32 = rotations.iter().sum();
    in_range && distinct && sum % 2 == 1
}

fn invert_table<T, const N: usize>(table: &[T; N], from_index: impl Fn(usize) -> T) -> [T; N]
where
    T: Copy + Default + Into<usize>,
{
    let mut inverse = [T::default(); N];
    for (input, &output) in table.iter().enumerate() {
        inverse[output.into()] = from_index(input);
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_build() {
        assert_eq!(Schedule::new(1), Schedule::new(1));
        assert_ne!(Schedule::new(1), Schedule::new(2));
    }

    #[test]
    fn test_table_sizes() {
        let s = Schedule::new(1);
        assert_eq!(s.small_sboxes().len(), 40);
        assert_eq!(s.large_sboxes().len(), 10);
        assert_eq!(s.rotations().len(), 6);
        assert_eq!(s.round_keys().len(), 84);
        assert_eq!(s.key(), 1);
    }

    #[test]
    fn test_key_one_snapshot() {
        let s = Schedule::new(1);
        assert_eq!(s.rotations(), &[45, 47, 55, 5, 63, 56]);
        assert_eq!(&s.round_keys()[..5], &[667, 636, 439, 314, 825]);
        assert_eq!(&s.small_sboxes()[0][..8], &[7, 54, 28, 60, 55, 19, 32, 37]);
        assert_eq!(
            &s.large_sboxes()[0][..8],
            &[214, 296, 155, 442, 483, 647, 757, 180]
        );
        assert_eq!(s.permutation()[0].mask()[0][0], 0x7f42_e301_7d2f_963e);
        assert_eq!(s.permutation()[0].rotation()[0][0], 1);
        assert_eq!(s.permutation()[1].mask()[5][4], 0x1c03_8e88_7805_2114);
    }

    #[test]
    fn test_invariants_hold_for_many_keys() {
        for key in (0..64u32).chain([u32::MAX, 1_560_384_000, 0x8000_0000]) {
            let s = Schedule::new(key);
            assert_eq!(s.validate(), Ok(()), "invariants broken for key {}", key);
        }
    }

    #[test]
    fn test_pbox_rotations_non_zero() {
        let s = Schedule::new(3);
        for pbox in s.permutation() {
            for row in pbox.rotation() {
                assert!(row.iter().all(|&r| (1..64).contains(&r)));
            }
        }
    }

    #[test]
    fn test_round_keys_fit_state_width() {
        let s = Schedule::new(5);
        assert!(s.round_keys().iter().all(|&k| k < (1 << STATE_SIZE)));
    }

    #[test]
    fn test_validate_detects_broken_sbox() {
        let mut s = Schedule::new(1);
        s.small_sboxes[3][0] = s.small_sboxes[3][1];
        assert_eq!(s.validate(), Err(OdoCryptError::SboxNotBijective));

        let mut s = Schedule::new(1);
        s.large_sboxes[9][1023] = s.large_sboxes[9][0];
        assert_eq!(s.validate(), Err(OdoCryptError::SboxNotBijective));
    }

    #[test]
    fn test_validate_detects_broken_rotations() {
        let mut s = Schedule::new(1);
        s.rotations[1] = s.rotations[0];
        assert_eq!(s.validate(), Err(OdoCryptError::InvalidRotationSet));

        let mut s = Schedule::new(1);
        s.rotations[0] = 0;
        assert_eq!(s.validate(), Err(OdoCryptError::InvalidRotationSet));

        let mut s = Schedule::new(1);
        s.rotations = [1, 2, 3, 4, 5, 7];
        assert_eq!(s.validate(), Err(OdoCryptError::InvalidRotationSet));
    }

    #[test]
    fn test_inverse_sboxes_roundtrip() {
        let s = Schedule::new(11);
        let inv = s.inverse_sboxes();
        for (table, inverse) in s.small_sboxes().iter().zip(inv.small.iter()) {
            for value in 0..SMALL_SBOX_SIZE {
                assert_eq!(inverse[table[value] as usize] as usize, value);
            }
        }
        for (table, inverse) in s.large_sboxes().iter().zip(inv.large.iter()) {
            for value in 0..LARGE_SBOX_SIZE {
                assert_eq!(inverse[table[value] as usize] as usize, value);
            }
        }
    }

    #[test]
    fn test_debug_is_compact() {
        let text = format!("{:?}", Schedule::new(1));
        assert!(text.starts_with("Schedule { key: 1"));
        assert!(text.len() < 200);
    }
}
