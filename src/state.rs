//! State transform primitives.
//!
//! The cipher state is ten 64-bit words. Every primitive here rewrites the
//! state in place and is a bijection on the 800-bit state; the `_inverse`
//! variants undo the steps that are not their own inverse.

use crate::consts::{
    BLOCK_SIZE, INV_PBOX_M, LARGE_SBOX_WIDTH, PBOX_M, PBOX_SUBROUNDS, ROTATION_COUNT,
    SBOX_PAIRS_PER_WORD, SMALL_SBOX_WIDTH, STATE_SIZE, WORD_PAIRS,
};
use crate::schedule::{LargeSboxes, Pbox, SmallSboxes};
use crate::utils::bits;
use crate::utils::converter;

/// The 800-bit cipher state.
pub type State = [u64; STATE_SIZE];

/// Reads an 80-byte block as ten little-endian words.
pub fn unpack(bytes: &[u8; BLOCK_SIZE]) -> State {
    converter::bytes_to_words(bytes)
}

/// Writes the state back as an 80-byte block.
pub fn pack(state: &State) -> [u8; BLOCK_SIZE] {
    converter::words_to_bytes(state)
}

/// Spreads every word into all others.
///
/// XORs all words together, folds the high half of the result onto the low
/// half, and XORs that into each word. With an even word count the XOR of
/// all words is unchanged, so applying it twice restores the state.
pub fn pre_mix(state: &mut State) {
    let mut total = state.iter().fold(0u64, |acc, &w| acc ^ w);
    total ^= total >> 32;
    for word in state.iter_mut() {
        *word ^= total;
    }
}

/// Swaps the bits selected by `mask[i]` between words `2i` and `2i + 1`.
pub fn masked_swap(state: &mut State, mask: &[u64; WORD_PAIRS]) {
    for (pair, &m) in state.chunks_exact_mut(2).zip(mask.iter()) {
        let swap = m & (pair[0] ^ pair[1]);
        pair[0] ^= swap;
        pair[1] ^= swap;
    }
}

/// Moves word `i` to position `(m * i) % 10`.
///
/// # Parameters
/// - `m`: Multiplier, coprime with the word count.
pub fn word_shuffle(state: &mut State, m: usize) {
    let mut next = [0u64; STATE_SIZE];
    for (i, &word) in state.iter().enumerate() {
        next[(m * i) % STATE_SIZE] = word;
    }
    *state = next;
}

/// Rotates each even word left by its pair's amount. Odd words stay put.
pub fn pbox_rotate(state: &mut State, rotation: &[u32; WORD_PAIRS]) {
    for (pair, &r) in state.chunks_exact_mut(2).zip(rotation.iter()) {
        pair[0] = pair[0].rotate_left(r);
    }
}

/// Inverse of [`pbox_rotate`].
pub fn pbox_rotate_inverse(state: &mut State, rotation: &[u32; WORD_PAIRS]) {
    for (pair, &r) in state.chunks_exact_mut(2).zip(rotation.iter()) {
        pair[0] = pair[0].rotate_right(r);
    }
}

/// Runs one permutation network: five subrounds of masked swap, word
/// shuffle and rotation, then a final masked swap with the sixth mask.
pub fn apply_permutation(state: &mut State, pbox: &Pbox) {
    let subrounds = pbox.mask()[..PBOX_SUBROUNDS - 1].iter().zip(pbox.rotation());
    for (mask, rotation) in subrounds {
        masked_swap(state, mask);
        word_shuffle(state, PBOX_M);
        pbox_rotate(state, rotation);
    }
    masked_swap(state, &pbox.mask()[PBOX_SUBROUNDS - 1]);
}

/// Inverse of [`apply_permutation`].
pub fn apply_permutation_inverse(state: &mut State, pbox: &Pbox) {
    masked_swap(state, &pbox.mask()[PBOX_SUBROUNDS - 1]);
    let subrounds = pbox.mask()[..PBOX_SUBROUNDS - 1].iter().zip(pbox.rotation());
    for (mask, rotation) in subrounds.rev() {
        pbox_rotate_inverse(state, rotation);
        word_shuffle(state, INV_PBOX_M);
        masked_swap(state, mask);
    }
}

/// Substitutes every field of every word.
///
/// From the least significant bit up, each word holds four pairs of a 6-bit
/// field and a 10-bit field. The 6-bit fields go through consecutive small
/// sboxes (40 across the state); the 10-bit fields of word `i` all go
/// through large sbox `i`.
pub fn apply_substitution(state: &mut State, small: &SmallSboxes, large: &LargeSboxes) {
    let layers = small.chunks_exact(SBOX_PAIRS_PER_WORD).zip(large.iter());
    for (word, (small_sboxes, large_sbox)) in state.iter_mut().zip(layers) {
        let mut next = 0u64;
        let mut pos = 0;
        for small_sbox in small_sboxes {
            let field = bits::field(*word, pos, SMALL_SBOX_WIDTH);
            next |= u64::from(small_sbox[field]) << pos;
            pos += SMALL_SBOX_WIDTH;

            let field = bits::field(*word, pos, LARGE_SBOX_WIDTH);
            next |= u64::from(large_sbox[field]) << pos;
            pos += LARGE_SBOX_WIDTH;
        }
        *word = next;
    }
}

/// Linear rotate-and-XOR diffusion.
///
/// Word `i` becomes word `i + 1` (wrapping) XOR every rotation of the
/// original word `i` by the amounts in `rotations`.
pub fn linear_mix(state: &mut State, rotations: &[u32; ROTATION_COUNT]) {
    let mut next = *state;
    next.rotate_left(1);
    for (out, &word) in next.iter_mut().zip(state.iter()) {
        for &r in rotations {
            *out ^= word.rotate_left(r);
        }
    }
    *state = next;
}

/// Inverse of [`linear_mix`].
///
/// With `R` the rotation polynomial of `rotations`, the mix is
/// `y[i] = x[i + 1] ^ R(x[i])`. Walking the ring expresses `x[i]` through
/// `x[0]` and leaves `(1 + R^10) x[0]` known. `R` has an even number of
/// terms, so `1 + R^10` has an odd number and is invertible.
pub fn linear_mix_inverse(state: &mut State, rotations: &[u32; ROTATION_COUNT]) {
    let mixer = bits::rotation_polynomial(rotations);
    let ring = bits::ROTATION_IDENTITY ^ bits::rotation_pow(mixer, STATE_SIZE as u32);
    let Some(solver) = bits::rotation_inverse(ring) else {
        unreachable!("rotation set with an even term count always yields a unit");
    };

    let mut offset = 0u64;
    for &word in &state[..STATE_SIZE - 1] {
        offset = word ^ bits::rotation_apply(mixer, offset);
    }
    let known = state[STATE_SIZE - 1] ^ bits::rotation_apply(mixer, offset);

    let mut prev = [0u64; STATE_SIZE];
    prev[0] = bits::rotation_apply(solver, known);
    for i in 0..STATE_SIZE - 1 {
        prev[i + 1] = state[i] ^ bits::rotation_apply(mixer, prev[i]);
    }
    *state = prev;
}

/// XORs bit `i` of `key` into the lowest bit of word `i`.
pub fn inject_round_key(state: &mut State, key: u16) {
    for (i, word) in state.iter_mut().enumerate() {
        *word ^= u64::from((key >> i) & 1);
    }
}
