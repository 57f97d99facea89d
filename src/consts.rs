//! Cipher dimensions and generator constants.
//!
//! Every size used by the schedule builder, the state transforms and the
//! hash entry point derives from the values in this module.

/// Number of cipher rounds.
pub const ROUNDS: usize = 84;

/// Width in bits of the small sboxes (suited to FPGA logic elements).
pub const SMALL_SBOX_WIDTH: u32 = 6;

/// Width in bits of the large sboxes (suited to FPGA RAM elements).
pub const LARGE_SBOX_WIDTH: u32 = 10;

/// Number of masked-swap subrounds in one pbox.
pub const PBOX_SUBROUNDS: usize = 6;

/// Generator of the multiplicative group modulo [`STATE_SIZE`] used by the
/// word shuffle.
pub const PBOX_M: usize = 3;

/// Multiplicative inverse of [`PBOX_M`] modulo [`STATE_SIZE`].
pub const INV_PBOX_M: usize = 7;

/// Number of rotations XORed together in the linear mixing step. Must be even.
pub const ROTATION_COUNT: usize = 6;

/// Bits per state word.
pub const WORD_BITS: u32 = 64;

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 80;

/// Cipher block size in bits.
pub const BLOCK_BITS: usize = 8 * BLOCK_SIZE;

/// Number of 64-bit words in the cipher state.
pub const STATE_SIZE: usize = BLOCK_BITS / WORD_BITS as usize;

/// Number of adjacent word pairs touched by masked swaps and pbox rotations.
pub const WORD_PAIRS: usize = STATE_SIZE / 2;

/// Number of small sboxes in a schedule.
pub const SMALL_SBOX_COUNT: usize =
    BLOCK_BITS / (SMALL_SBOX_WIDTH + LARGE_SBOX_WIDTH) as usize;

/// Number of large sboxes in a schedule, one per state word.
pub const LARGE_SBOX_COUNT: usize = STATE_SIZE;

/// Entries in one small sbox.
pub const SMALL_SBOX_SIZE: usize = 1 << SMALL_SBOX_WIDTH;

/// Entries in one large sbox.
pub const LARGE_SBOX_SIZE: usize = 1 << LARGE_SBOX_WIDTH;

/// Small/large field pairs packed into each state word.
pub const SBOX_PAIRS_PER_WORD: usize = SMALL_SBOX_COUNT / STATE_SIZE;

/// Size in bytes of the digest returned by the hash.
pub const HASH_SIZE: usize = 32;

/// Size in bytes of the Keccak-p[800] state used for finalization.
pub const KECCAK_P800_STATE_BYTES: usize = 100;

/// Number of 32-bit lanes in the Keccak-p[800] state.
pub const KECCAK_P800_LANES: usize = 25;

/// Rounds of Keccak-p[800] applied after the cipher.
pub const KECCAK_P800_ROUNDS: usize = 12;

/// Default shape-change interval: ten days, in seconds.
pub const SHAPECHANGE_INTERVAL: u32 = 10 * 24 * 60 * 60;

/// LCG multiplier of the schedule generator.
pub const BASE_MULTIPLICAND: u64 = 6364136223846793005;

/// LCG increment of the schedule generator.
pub const BASE_ADDEND: u64 = 1442695040888963407;

const _: () = assert!(STATE_SIZE * 8 == BLOCK_SIZE);
const _: () = assert!(STATE_SIZE % 2 == 0);
const _: () = assert!(ROTATION_COUNT % 2 == 0);
const _: () = assert!(
    SBOX_PAIRS_PER_WORD * (SMALL_SBOX_WIDTH + LARGE_SBOX_WIDTH) as usize == WORD_BITS as usize
);
const _: () = assert!((PBOX_M * INV_PBOX_M) % STATE_SIZE == 1);
const _: () = assert!(BLOCK_SIZE < KECCAK_P800_STATE_BYTES);
const _: () = assert!(KECCAK_P800_LANES * 4 == KECCAK_P800_STATE_BYTES);
// Round keys carry one bit per word in a u16.
const _: () = assert!(STATE_SIZE <= 16);
