//! Keccak-p[800] finalization of the hash buffer.

use crate::consts::{KECCAK_P800_ROUNDS, KECCAK_P800_STATE_BYTES};
use crate::utils::converter;

/// Applies Keccak-p[800] with 12 rounds to a 100-byte buffer in place.
///
/// The buffer is read as 25 little-endian 32-bit lanes.
pub(crate) fn keccak_p800_12(buffer: &mut [u8; KECCAK_P800_STATE_BYTES]) {
    let mut lanes = converter::bytes_to_lanes(buffer);
    keccak::keccak_p(&mut lanes, KECCAK_P800_ROUNDS);
    converter::lanes_to_bytes(&lanes, buffer);
}
