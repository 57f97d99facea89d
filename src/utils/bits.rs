//! Bit-field and rotation-polynomial utilities for 64-bit words.
//!
//! A rotation polynomial is a `u64` whose set bit `k` stands for "rotate left
//! by `k`". Applying one to a word XORs together those rotations of the word,
//! which is multiplication in GF(2)[x]/(x^64 + 1). Composition of two such
//! maps is therefore the same operation applied to the polynomials.

/// The identity rotation polynomial (rotate by zero).
pub(crate) const ROTATION_IDENTITY: u64 = 1;

/// Extracts the `width`-bit field of `word` starting at bit `pos`.
///
/// # Parameters
/// - `word`: Source word.
/// - `pos`: Lowest bit of the field (0..64).
/// - `width`: Field width in bits (1..64).
pub(crate) fn field(word: u64, pos: u32, width: u32) -> usize {
    ((word >> pos) & ((1u64 << width) - 1)) as usize
}

/// Builds the rotation polynomial with one term per rotation amount.
///
/// Amounts are taken modulo 64; repeated amounts cancel.
pub(crate) fn rotation_polynomial(rotations: &[u32]) -> u64 {
    rotations
        .iter()
        .fold(0u64, |poly, &r| poly ^ (1u64 << (r % 64)))
}

/// Applies the rotation polynomial `poly` to `value`.
///
/// # Returns
/// The XOR of `value` rotated left by every bit position set in `poly`.
pub(crate) fn rotation_apply(poly: u64, value: u64) -> u64 {
    let mut out = 0u64;
    let mut terms = poly;
    while terms != 0 {
        out ^= value.rotate_left(terms.trailing_zeros());
        terms &= terms - 1;
    }
    out
}

/// Raises a rotation polynomial to the power `exp`.
pub(crate) fn rotation_pow(poly: u64, exp: u32) -> u64 {
    (0..exp).fold(ROTATION_IDENTITY, |acc, _| rotation_apply(poly, acc))
}

/// Inverts a rotation polynomial.
///
/// Since x^64 + 1 = (x + 1)^64 over GF(2), a polynomial is a unit exactly
/// when it has an odd number of terms. Writing such a unit as `1 + n`, the
/// part `n` is nilpotent with `n^64 = 0`, so the inverse is
/// `(1 + n)(1 + n^2)(1 + n^4)(1 + n^8)(1 + n^16)(1 + n^32)`.
///
/// # Returns
/// The inverse, or `None` if `poly` has an even number of terms.
pub(crate) fn rotation_inverse(poly: u64) -> Option<u64> {
    if poly.count_ones() % 2 == 0 {
        return None;
    }
    let mut nilpotent = poly ^ ROTATION_IDENTITY;
    let mut inverse = ROTATION_IDENTITY;
    for _ in 0..6 {
        inverse = rotation_apply(inverse, ROTATION_IDENTITY ^ nilpotent);
        nilpotent = rotation_apply(nilpotent, nilpotent);
    }
    Some(inverse)
}
