//! Byte-to-word conversion utilities.
//!
//! Converts between byte buffers and the little-endian word arrays used by
//! the cipher state (64-bit words) and the Keccak-p[800] state (32-bit lanes).

use crate::consts::{BLOCK_SIZE, KECCAK_P800_LANES, KECCAK_P800_STATE_BYTES, STATE_SIZE};

/// Converts an 80-byte block into ten little-endian `u64` words.
///
/// Word `i` is built from bytes `8*i .. 8*i + 8`, least significant first.
pub(crate) fn bytes_to_words(bytes: &[u8; BLOCK_SIZE]) -> [u64; STATE_SIZE] {
    let mut words = [0u64; STATE_SIZE];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        *word = u64::from_le_bytes(raw);
    }
    words
}

/// Converts ten `u64` words into an 80-byte block (inverse of [`bytes_to_words`]).
pub(crate) fn words_to_bytes(words: &[u64; STATE_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut bytes = [0u8; BLOCK_SIZE];
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Loads a 100-byte buffer as 25 little-endian `u32` Keccak lanes.
pub(crate) fn bytes_to_lanes(bytes: &[u8; KECCAK_P800_STATE_BYTES]) -> [u32; KECCAK_P800_LANES] {
    let mut lanes = [0u32; KECCAK_P800_LANES];
    for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(4)) {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(chunk);
        *lane = u32::from_le_bytes(raw);
    }
    lanes
}

/// Stores 25 Keccak lanes back into a 100-byte buffer.
pub(crate) fn lanes_to_bytes(
    lanes: &[u32; KECCAK_P800_LANES],
    bytes: &mut [u8; KECCAK_P800_STATE_BYTES],
) {
    for (chunk, lane) in bytes.chunks_exact_mut(4).zip(lanes.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_words_little_endian() {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes[..8].copy_from_slice(&[0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01]);
        bytes[79] = 0x80;
        let words = bytes_to_words(&bytes);
        assert_eq!(words[0], 0x0123_4567_89AB_CDEF);
        assert_eq!(words[9], 0x8000_0000_0000_0000);
        assert!(words[1..9].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_words_roundtrip() {
        let mut bytes = [0u8; BLOCK_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        assert_eq!(words_to_bytes(&bytes_to_words(&bytes)), bytes);
    }

    #[test]
    fn test_bytes_to_lanes_little_endian() {
        let mut bytes = [0u8; KECCAK_P800_STATE_BYTES];
        bytes[..4].copy_from_slice(&[0x78, 0x56, 0x34, 0x12]);
        bytes[99] = 0xFF;
        let lanes = bytes_to_lanes(&bytes);
        assert_eq!(lanes[0], 0x1234_5678);
        assert_eq!(lanes[24], 0xFF00_0000);
    }

    #[test]
    fn test_lanes_roundtrip() {
        let mut bytes = [0u8; KECCAK_P800_STATE_BYTES];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let lanes = bytes_to_lanes(&bytes);
        let mut back = [0u8; KECCAK_P800_STATE_BYTES];
        lanes_to_bytes(&lanes, &mut back);
        assert_eq!(back, bytes);
    }
}
