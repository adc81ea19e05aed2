//! Field helpers (component C1): a lazily-growing `2^i` lookup table, the
//! Boolean-to-field conversion, matching of most-significant bits between
//! two equal-length bit vectors, and the overflow-tracking addition used by
//! `ADDMOD` on fixed-width words.
//!
//! Mirrors `PowersOf2.hpp` from the original implementation.

use ff::PrimeField;

/// Accidental use of a pointer value as a bit index is a real failure mode
/// in the original C++ (`TL<PowersOf2<FR>>::singleton()->lookUp(ptr)`); we
/// keep the same sanity cap the original asserts on.
const MAX_POWER_INDEX: usize = 1024;

/// Per-task cache of `F::from(2).pow(i)`, indexed by `i`, extended lazily
/// by doubling the last entry.
pub struct PowersOfTwo<F: PrimeField> {
    lut: Vec<F>,
}

impl<F: PrimeField> Default for PowersOfTwo<F> {
    fn default() -> Self {
        PowersOfTwo { lut: vec![F::one()] }
    }
}

impl<F: PrimeField> PowersOfTwo<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `2^index` as a field element, extending the cache as needed.
    pub fn lookup(&mut self, index: usize) -> F {
        assert!(
            index < MAX_POWER_INDEX,
            "power-of-two index {} looks like a bug (cap is {})",
            index,
            MAX_POWER_INDEX
        );

        while self.lut.len() <= index {
            let last = *self.lut.last().unwrap();
            self.lut.push(last + last);
        }

        self.lut[index]
    }

    /// `F`-valued encoding of an unsigned integer, built from the powers of
    /// two it is the sum of.
    pub fn number(&mut self, mut n: u64) -> F {
        let mut accum = F::zero();
        let mut i = 0usize;
        while n != 0 {
            if n & 1 == 1 {
                accum += self.lookup(i);
            }
            n >>= 1;
            i += 1;
        }
        accum
    }

    /// `F`-valued encoding of a little-endian bit vector, `sum(2^i * bits[i])`.
    pub fn from_bits(&mut self, bits: &[bool]) -> F {
        let mut accum = F::zero();
        for (i, &b) in bits.iter().enumerate() {
            if b {
                accum += self.lookup(i);
            }
        }
        accum
    }
}

/// `F::one()` for `true`, `F::zero()` for `false`.
pub fn bool_to<F: PrimeField>(b: bool) -> F {
    if b {
        F::one()
    } else {
        F::zero()
    }
}

/// Number of equal high-order bits between two equal-length little-endian
/// bit vectors; `None` if the lengths differ (the original returns `-1`).
pub fn match_msb(a: &[bool], b: &[bool]) -> Option<usize> {
    if a.len() != b.len() {
        return None;
    }
    for i in (0..a.len()).rev() {
        if a[i] != b[i] {
            return Some(a.len() - 1 - i);
        }
    }
    Some(a.len())
}

/// Overflow-tracking addition used by `ADDMOD`: folds `b` into the
/// low/high word pair `(hi, lo)`, carrying any overflow of `lo + b` into
/// `hi`. Mirrors `addover()` in the original, generalized over word width
/// via plain `u128` arithmetic (always wide enough for our word sizes).
pub fn overflow_add(hi: &mut u128, lo: &mut u128, b: u128, word_bits: u32) {
    let sum = *lo + b;
    let mask = if word_bits >= 128 {
        u128::MAX
    } else {
        (1u128 << word_bits) - 1
    };
    *hi += sum >> word_bits;
    *lo = sum & mask;
}
