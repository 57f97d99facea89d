//! OdoCrypt: key-scheduled 800-bit cipher and its 256-bit hash.
//!
//! Orchestrates the state transforms over 84 rounds and chains the cipher
//! output into Keccak-p[800] to produce the proof-of-work digest.

use std::sync::OnceLock;

use crate::consts::{BLOCK_SIZE, HASH_SIZE, KECCAK_P800_STATE_BYTES};
use crate::error::OdoCryptError;
use crate::finalize;
use crate::schedule::{InverseSboxes, Schedule};
use crate::state;

/// Odocrypt cipher bound to one epoch's schedule.
///
/// # Architecture
///
/// Each of the 84 rounds runs the first pbox, the sbox layer, the second
/// pbox, the linear mix and the round key. The state is pre-mixed once
/// before the first round.
///
/// The schedule is immutable, so one instance can hash from many threads
/// at once. Inverse sboxes for [`decrypt`](Self::decrypt) are built on
/// first use.
pub struct OdoCrypt {
    schedule: Schedule,
    inverse: OnceLock<InverseSboxes>,
}

impl OdoCrypt {
    /// Builds the cipher for an epoch key.
    ///
    /// # Examples
    ///
    /// ```
    /// use odocrypt::OdoCrypt;
    ///
    /// let odo = OdoCrypt::new(1);
    /// assert_eq!(odo.key(), 1);
    /// ```
    pub fn new(epoch_key: u32) -> Self {
        Self::from_schedule(Schedule::new(epoch_key))
    }

    /// Wraps an already built schedule.
    pub fn from_schedule(schedule: Schedule) -> Self {
        OdoCrypt {
            schedule,
            inverse: OnceLock::new(),
        }
    }

    /// Returns the epoch key of the schedule.
    pub fn key(&self) -> u32 {
        self.schedule.key()
    }

    /// Returns the underlying schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Encrypts one 80-byte block.
    ///
    /// # Examples
    ///
    /// ```
    /// use odocrypt::OdoCrypt;
    ///
    /// let odo = OdoCrypt::new(1);
    /// let plain = [0u8; 80];
    /// let cipher = odo.encrypt(&plain);
    /// assert_ne!(cipher, plain);
    /// assert_eq!(odo.decrypt(&cipher), plain);
    /// ```
    pub fn encrypt(&self, plain: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        encrypt(&self.schedule, plain)
    }

    /// Decrypts one 80-byte block (inverse of [`encrypt`](Self::encrypt)).
    pub fn decrypt(&self, cipher: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let s = &self.schedule;
        let [first, second] = s.permutation();
        let inverse = self.inverse.get_or_init(|| s.inverse_sboxes());

        let mut st = state::unpack(cipher);
        for &round_key in s.round_keys().iter().rev() {
            state::inject_round_key(&mut st, round_key);
            state::linear_mix_inverse(&mut st, s.rotations());
            state::apply_permutation_inverse(&mut st, second);
            state::apply_substitution(&mut st, &inverse.small, &inverse.large);
            state::apply_permutation_inverse(&mut st, first);
        }
        state::pre_mix(&mut st);
        state::pack(&st)
    }

    /// Hashes up to 80 bytes into a 32-byte digest.
    ///
    /// The input is copied into a zeroed 100-byte buffer followed by a single
    /// `0x01` marker byte. The first 80 bytes are encrypted in place, the
    /// whole buffer goes through Keccak-p[800] with 12 rounds, and the first
    /// 32 bytes are the digest.
    ///
    /// # Errors
    /// Returns [`OdoCryptError::InputTooLong`] if `data` exceeds 80 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use odocrypt::OdoCrypt;
    ///
    /// let odo = OdoCrypt::new(1);
    /// let digest = odo.hash(b"block header").unwrap();
    /// assert_eq!(digest.len(), 32);
    /// assert!(odo.hash(&[0u8; 81]).is_err());
    /// ```
    pub fn hash(&self, data: &[u8]) -> Result<[u8; HASH_SIZE], OdoCryptError> {
        hash(&self.schedule, data)
    }

    /// Hashes a full 80-byte block header.
    pub fn hash_header(&self, header: &[u8; BLOCK_SIZE]) -> [u8; HASH_SIZE] {
        digest(&self.schedule, header)
    }
}

/// Encrypts one 80-byte block under `schedule`.
pub fn encrypt(schedule: &Schedule, plain: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let [first, second] = schedule.permutation();

    let mut st = state::unpack(plain);
    state::pre_mix(&mut st);
    for &round_key in schedule.round_keys() {
        state::apply_permutation(&mut st, first);
        state::apply_substitution(&mut st, schedule.small_sboxes(), schedule.large_sboxes());
        state::apply_permutation(&mut st, second);
        state::linear_mix(&mut st, schedule.rotations());
        state::inject_round_key(&mut st, round_key);
    }
    state::pack(&st)
}

/// Hashes up to 80 bytes under `schedule`.
///
/// # Errors
/// Returns [`OdoCryptError::InputTooLong`] if `data` exceeds 80 bytes; the
/// input is never truncated.
pub fn hash(schedule: &Schedule, data: &[u8]) -> Result<[u8; HASH_SIZE], OdoCryptError> {
    if data.len() > BLOCK_SIZE {
        return Err(OdoCryptError::InputTooLong {
            len: data.len(),
            max: BLOCK_SIZE,
        });
    }
    Ok(digest(schedule, data))
}

/// Pads, encrypts and finalizes. `data` must not exceed the block.
fn digest(schedule: &Schedule, data: &[u8]) -> [u8; HASH_SIZE] {
    debug_assert!(data.len() <= BLOCK_SIZE);

    let mut buffer = [0u8; KECCAK_P800_STATE_BYTES];
    buffer[..data.len()].copy_from_slice(data);
    buffer[data.len()] = 1;

    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&buffer[..BLOCK_SIZE]);
    buffer[..BLOCK_SIZE].copy_from_slice(&encrypt(schedule, &block));

    finalize::keccak_p800_12(&mut buffer);

    let mut out = [0u8; HASH_SIZE];
    out.copy_from_slice(&buffer[..HASH_SIZE]);
    out
}

impl std::fmt::Debug for OdoCrypt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdoCrypt")
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}
