//! Fixed-width unsigned word algebra (component C4/C5 specialisation):
//! one generic `CircuitWord` parameterised by [`ValueSort`] stands in for
//! the original's three separate `Alg_uint8`/`Alg_uint32`/`Alg_uint64`
//! specialisations (Design Notes §9: replace template-per-type dispatch
//! with an enum discriminator and `match`).
//!
//! A word's terms are always the per-bit `Terms::Bits` representation —
//! bitwise ops need individual bit lanes, and `ADDMOD` temporarily widens
//! past the nominal width to carry overflow (§4.5), truncated back down
//! on demand via [`CircuitWord::mod_width`] (`rank1_xword`).

use crate::algebra::{Alg, Scalar, Term, Terms, ValueSort, Visibility};
use crate::builder::R1csBuilder;
use crate::ops::BitwiseOp;
use ff::PrimeField;

#[derive(Clone, Debug)]
pub struct CircuitWord<F: PrimeField>(pub(crate) Alg<F>);

fn mask(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn bit_logical(op: BitwiseOp, x: bool, y: bool) -> bool {
    use crate::ops::{eval_logical, LogicalOp};
    let logical = match op {
        BitwiseOp::And => LogicalOp::And,
        BitwiseOp::Or => LogicalOp::Or,
        BitwiseOp::Xor => LogicalOp::Xor,
        BitwiseOp::Same => LogicalOp::Same,
        BitwiseOp::Cmplmnt => LogicalOp::Cmplmnt,
        _ => unreachable!("bit_logical is only called for the per-bit logical group"),
    };
    eval_logical(logical, x, y)
}

impl<F: PrimeField> CircuitWord<F> {
    pub fn sort(&self) -> ValueSort {
        self.0.value.sort()
    }

    /// Nominal bit width of the value sort (8/32/64).
    pub fn width(&self) -> usize {
        self.sort().size_bits()
    }

    /// Length of the term vector, which may exceed `width()` for a
    /// not-yet-truncated `ADDMOD` result.
    pub fn bit_len(&self) -> usize {
        self.bits().len()
    }

    fn bits(&self) -> &[Term<F>] {
        self.0.terms.as_bits().expect("CircuitWord always carries a bit vector")
    }

    pub fn value_u64(&self) -> u64 {
        match &self.0.value {
            Scalar::U8(v) => *v as u64,
            Scalar::U32(v) => *v as u64,
            Scalar::U64(v) => *v,
            _ => panic!("CircuitWord value is not a fixed-width unsigned sort"),
        }
    }

    pub fn witness(&self) -> F {
        self.0.witness
    }

    fn scalar_of(sort: ValueSort, v: u64) -> Scalar {
        match sort {
            ValueSort::U8 => Scalar::U8(v as u8),
            ValueSort::U32 => Scalar::U32(v as u32),
            ValueSort::U64 => Scalar::U64(v),
            _ => panic!("CircuitWord only supports U8/U32/U64 sorts"),
        }
    }

    fn assert_untruncated(&self) {
        assert_eq!(self.bit_len(), self.width(), "operand carries un-truncated ADDMOD overflow bits; call mod_width() first");
    }

    /// A compile-time constant: no variable, no constraint (invariant I5).
    pub fn constant(b: &mut R1csBuilder<F>, sort: ValueSort, value: u64) -> Self {
        let value = value & mask(sort.size_bits());
        let scalar = Self::scalar_of(sort, value);
        let bits = scalar.to_bits_le();
        let witness = b.powers_of_two().from_bits(&bits);
        let terms: Vec<Term<F>> = bits.iter().map(|&bit| Term::constant(crate::field::bool_to(bit))).collect();
        Self(Alg { value: scalar, witness, split_bits: bits, terms: Terms::Bits(terms) })
    }

    /// *Input bless*: each bit becomes its own public-input or auxiliary
    /// variable with a booleanity constraint (I1); constants allocate
    /// nothing.
    pub fn bless(b: &mut R1csBuilder<F>, sort: ValueSort, value: u64, vis: Visibility) -> Self {
        if vis == Visibility::Constant {
            return Self::constant(b, sort, value);
        }
        let value = value & mask(sort.size_bits());
        let scalar = Self::scalar_of(sort, value);
        let bits = scalar.to_bits_le();
        let witness = b.powers_of_two().from_bits(&bits);
        let terms: Vec<Term<F>> = bits
            .iter()
            .map(|&bit| {
                let w = crate::field::bool_to(bit);
                let t = match vis {
                    Visibility::Public => b.create_public_variable(w),
                    Visibility::Private => b.create_variable(w),
                    Visibility::Constant => unreachable!(),
                };
                b.add_booleanity(t);
                t
            })
            .collect();
        Self(Alg { value: scalar, witness, split_bits: bits, terms: Terms::Bits(terms) })
    }

    fn per_bit(b: &mut R1csBuilder<F>, op: BitwiseOp, x: &Self, y: &Self) -> Self {
        assert_eq!(x.sort(), y.sort(), "bitwise operands must share a width");
        x.assert_untruncated();
        y.assert_untruncated();
        let width = x.width();
        let xbits = x.bits().to_vec();
        let ybits = y.bits().to_vec();
        let xv = x.value_u64();
        let yv = y.value_u64();

        let mut out_bits = Vec::with_capacity(width);
        let mut out_val: u64 = 0;
        for i in 0..width {
            let xb = (xv >> i) & 1 == 1;
            let yb = (yv >> i) & 1 == 1;
            let bit_val = bit_logical(op, xb, yb);
            if bit_val {
                out_val |= 1 << i;
            }
            let t = b.create_result_bitwise(op, xbits[i], ybits[i], crate::field::bool_to(bit_val));
            out_bits.push(t);
        }
        let sort = x.sort();
        let scalar = Self::scalar_of(sort, out_val);
        let witness = b.powers_of_two().number(out_val);
        Self(Alg { value: scalar, witness, split_bits: scalar.to_bits_le(), terms: Terms::Bits(out_bits) })
    }

    pub fn and(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::per_bit(b, BitwiseOp::And, x, y)
    }

    pub fn or(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::per_bit(b, BitwiseOp::Or, x, y)
    }

    pub fn xor(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::per_bit(b, BitwiseOp::Xor, x, y)
    }

    pub fn same(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::per_bit(b, BitwiseOp::Same, x, y)
    }

    pub fn not(b: &mut R1csBuilder<F>, x: &Self) -> Self {
        x.assert_untruncated();
        let width = x.width();
        let xbits = x.bits().to_vec();
        let xv = x.value_u64();
        let mut out_bits = Vec::with_capacity(width);
        let mut out_val: u64 = 0;
        for i in 0..width {
            let xb = (xv >> i) & 1 == 1;
            let bit_val = !xb;
            if bit_val {
                out_val |= 1 << i;
            }
            let t = b.create_result_bitwise(BitwiseOp::Cmplmnt, xbits[i], xbits[i], crate::field::bool_to(bit_val));
            out_bits.push(t);
        }
        let sort = x.sort();
        let scalar = Self::scalar_of(sort, out_val);
        let witness = b.powers_of_two().number(out_val);
        Self(Alg { value: scalar, witness, split_bits: scalar.to_bits_le(), terms: Terms::Bits(out_bits) })
    }

    /// `ADDMOD`: a scalar `ADD` gate whose result bits are allowed to carry
    /// one bit of overflow past the nominal width, per §4.5. The returned
    /// value is already reduced mod `2^width` (the canonical word value);
    /// the extra bit lives only in the term vector until [`Self::mod_width`]
    /// drops it.
    pub fn addmod(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        assert_eq!(x.sort(), y.sort(), "ADDMOD operands must share a width");
        let sort = x.sort();
        let width = sort.size_bits();

        let xt = b.arg_scalar(&x.0);
        let yt = b.arg_scalar(&y.0);

        let sum: u128 = x.value_u64() as u128 + y.value_u64() as u128;
        let sum_bits: Vec<bool> = (0..=width).map(|i| (sum >> i) & 1 == 1).collect();
        let sum_witness = b.powers_of_two().from_bits(&sum_bits);

        let z = b.create_result_bitwise(BitwiseOp::Addmod, xt, yt, sum_witness);
        let bits = b.scalar_to_bits(z, &sum_bits);

        let canonical_val = (sum as u64) & mask(width);
        let scalar = Self::scalar_of(sort, canonical_val);
        Self(Alg { value: scalar, witness: sum_witness, split_bits: sum_bits, terms: Terms::Bits(bits) })
    }

    /// `rank1_xword` truncation back to the nominal width, dropping the
    /// `ADDMOD` overflow bit(s). A no-op if there is nothing to truncate.
    pub fn mod_width(&self, _b: &mut R1csBuilder<F>) -> Self {
        let width = self.width();
        if self.bit_len() == width {
            return self.clone();
        }
        let bits = crate::rank1::xword(self.bits(), width);
        Self(Alg {
            value: self.0.value.clone(),
            witness: self.0.witness,
            split_bits: self.0.value.to_bits_le(),
            terms: Terms::Bits(bits),
        })
    }

    fn permute(&self, b: &mut R1csBuilder<F>, op: BitwiseOp, n: usize) -> Self {
        self.assert_untruncated();
        let width = self.width();
        assert!(n <= width, "{:?} count {} exceeds word width {}", op, n, width);
        let bits = b.permute_bits(op, self.bits(), n);

        let v = self.value_u64();
        let out_val = match op {
            BitwiseOp::Shl => {
                if n >= width {
                    0
                } else {
                    (v << n) & mask(width)
                }
            }
            BitwiseOp::Shr => {
                if n >= width {
                    0
                } else {
                    v >> n
                }
            }
            BitwiseOp::Rotl => {
                let n = n % width.max(1);
                if n == 0 {
                    v
                } else {
                    ((v << n) | (v >> (width - n))) & mask(width)
                }
            }
            BitwiseOp::Rotr => {
                let n = n % width.max(1);
                if n == 0 {
                    v
                } else {
                    ((v >> n) | (v << (width - n))) & mask(width)
                }
            }
            _ => unreachable!(),
        };

        let sort = self.sort();
        let scalar = Self::scalar_of(sort, out_val);
        let witness = b.powers_of_two().number(out_val);
        Self(Alg { value: scalar, witness, split_bits: scalar.to_bits_le(), terms: Terms::Bits(bits) })
    }

    pub fn shl(&self, b: &mut R1csBuilder<F>, n: usize) -> Self {
        self.permute(b, BitwiseOp::Shl, n)
    }

    pub fn shr(&self, b: &mut R1csBuilder<F>, n: usize) -> Self {
        self.permute(b, BitwiseOp::Shr, n)
    }

    pub fn rotl(&self, b: &mut R1csBuilder<F>, n: usize) -> Self {
        self.permute(b, BitwiseOp::Rotl, n)
    }

    pub fn rotr(&self, b: &mut R1csBuilder<F>, n: usize) -> Self {
        self.permute(b, BitwiseOp::Rotr, n)
    }

    /// `xtime`: AES's `{02} *` in `GF(2^8)`, i.e. `SHL(x, 1)` conditionally
    /// reduced by the irreducible polynomial `0x1b` when the vacated high
    /// bit was set. Grounded on `AES_Cipher.hpp`'s `MixColumns` and, for the
    /// circuit path specifically, `BitwiseAST.hpp`'s VAR `xtime`
    /// (`XOR(_SHL(a,1), _AND(modpoly, _bitmask(testbit(a, MSB))))`): the
    /// byte is an allocated variable, so the reduction must be constrained
    /// branchlessly for every witness, not selected on the concrete value
    /// of this one witness's high bit.
    pub fn xtime(&self, b: &mut R1csBuilder<F>) -> Self {
        assert_eq!(self.width(), 8, "xtime is only defined over GF(2^8) bytes");
        let shifted = self.shl(b, 1);

        let msb = self.bits()[7];
        let high_bit = (self.value_u64() >> 7) & 1 == 1;
        let split_bits = vec![high_bit; 8];
        let witness = b.powers_of_two().from_bits(&split_bits);
        let bitmask = Self(Alg {
            value: Scalar::U8(if high_bit { 0xff } else { 0x00 }),
            witness,
            split_bits,
            terms: Terms::Bits(vec![msb; 8]),
        });

        let modpoly = Self::constant(b, ValueSort::U8, 0x1b);
        let reduction = Self::and(b, &bitmask, &modpoly);
        Self::xor(b, &shifted, &reduction)
    }

    /// Bit-parallel whole-value equality (§4.5): `SAME` per bit, folded
    /// with `safeAND`.
    pub fn eq(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> crate::algebra::boolean::CircuitBool<F> {
        assert_eq!(x.sort(), y.sort());
        x.assert_untruncated();
        y.assert_untruncated();
        let width = x.width();
        let xv = x.value_u64();
        let yv = y.value_u64();
        let xbits = x.bits();
        let ybits = y.bits();

        let mut same_terms = Vec::with_capacity(width);
        let mut same_witness = Vec::with_capacity(width);
        for i in 0..width {
            let xb = (xv >> i) & 1 == 1;
            let yb = (yv >> i) & 1 == 1;
            let same = xb == yb;
            same_witness.push(same);
            same_terms.push(b.create_result_bitwise(BitwiseOp::Same, xbits[i], ybits[i], crate::field::bool_to(same)));
        }
        let value = same_witness.iter().all(|&s| s);
        let term = b.safe_and(&same_terms, &same_witness);
        crate::algebra::boolean::CircuitBool::from_term(value, term)
    }

    pub fn neq(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> crate::algebra::boolean::CircuitBool<F> {
        assert_eq!(x.sort(), y.sort());
        x.assert_untruncated();
        y.assert_untruncated();
        let width = x.width();
        let xv = x.value_u64();
        let yv = y.value_u64();
        let xbits = x.bits();
        let ybits = y.bits();

        let mut xor_terms = Vec::with_capacity(width);
        let mut xor_witness = Vec::with_capacity(width);
        for i in 0..width {
            let xb = (xv >> i) & 1 == 1;
            let yb = (yv >> i) & 1 == 1;
            let differ = xb != yb;
            xor_witness.push(differ);
            xor_terms.push(b.create_result_bitwise(BitwiseOp::Xor, xbits[i], ybits[i], crate::field::bool_to(differ)));
        }
        let value = xor_witness.iter().any(|&d| d);
        let term = b.safe_or(&xor_terms, &xor_witness);
        crate::algebra::boolean::CircuitBool::from_term(value, term)
    }

    /// Zero-extends a narrower word, truncates a wider one, or replicates
    /// a single `bool` bit across every target position (`rank1_xword`).
    pub fn convert(&self, b: &mut R1csBuilder<F>, target: ValueSort) -> Self {
        self.assert_untruncated();
        let target_width = target.size_bits();
        let bits = crate::rank1::xword(self.bits(), target_width);

        let out_val = if self.sort() == ValueSort::Bool {
            if self.0.value.as_bool() {
                mask(target_width)
            } else {
                0
            }
        } else {
            self.value_u64() & mask(target_width)
        };

        let scalar = Self::scalar_of(target, out_val);
        let witness = b.powers_of_two().number(out_val);
        Self(Alg { value: scalar, witness, split_bits: scalar.to_bits_le(), terms: Terms::Bits(bits) })
    }

    /// `bless(array_of_small, wide_var)`: partitions this word's term and
    /// bit vectors into `width() / chunk.size_bits()` narrower words,
    /// little-endian chunk order (chunk 0 holds the low bits).
    pub fn split_into(&self, b: &mut R1csBuilder<F>, chunk: ValueSort) -> Vec<Self> {
        self.assert_untruncated();
        let width = self.width();
        let chunk_width = chunk.size_bits();
        assert_eq!(width % chunk_width, 0, "word width must divide evenly into the chunk width");
        let n = width / chunk_width;
        let bits = self.bits();
        let v = self.value_u64();

        (0..n)
            .map(|i| {
                let chunk_bits = bits[i * chunk_width..(i + 1) * chunk_width].to_vec();
                let chunk_val = (v >> (i * chunk_width)) & mask(chunk_width);
                let scalar = Self::scalar_of(chunk, chunk_val);
                let witness = b.powers_of_two().number(chunk_val);
                Self(Alg { value: scalar, witness, split_bits: scalar.to_bits_le(), terms: Terms::Bits(chunk_bits) })
            })
            .collect()
    }

    /// Inverse of [`Self::split_into`]: concatenates narrower words,
    /// little-endian chunk order, into one wider word.
    pub fn join(b: &mut R1csBuilder<F>, chunks: &[Self], target: ValueSort) -> Self {
        let chunk_width = chunks.first().map(|c| c.width()).unwrap_or(0);
        assert_eq!(chunk_width * chunks.len(), target.size_bits(), "chunk widths must exactly fill the target width");

        let mut bits = Vec::with_capacity(target.size_bits());
        let mut out_val: u64 = 0;
        for (i, c) in chunks.iter().enumerate() {
            c.assert_untruncated();
            bits.extend_from_slice(c.bits());
            out_val |= c.value_u64() << (i * chunk_width);
        }

        let scalar = Self::scalar_of(target, out_val);
        let witness = b.powers_of_two().number(out_val);
        Self(Alg { value: scalar, witness, split_bits: scalar.to_bits_le(), terms: Terms::Bits(bits) })
    }

    /// `cond ? t : f` (§4.8 ternary), per bit.
    pub fn select(b: &mut R1csBuilder<F>, cond: &crate::algebra::boolean::CircuitBool<F>, t: &Self, f: &Self) -> Self {
        assert_eq!(t.sort(), f.sort());
        t.assert_untruncated();
        f.assert_untruncated();
        let width = t.width();
        let cond_term = cond.term();
        let tv = t.value_u64();
        let fv = f.value_u64();
        let tbits = t.bits();
        let fbits = f.bits();

        let mut out_bits = Vec::with_capacity(width);
        let mut out_val: u64 = 0;
        for i in 0..width {
            let tb = (tv >> i) & 1 == 1;
            let fb = (fv >> i) & 1 == 1;
            let bit_val = if cond.value() { tb } else { fb };
            if bit_val {
                out_val |= 1 << i;
            }
            out_bits.push(crate::rank1::select(b, cond_term, tbits[i], fbits[i], crate::field::bool_to(bit_val)));
        }

        let sort = t.sort();
        let scalar = Self::scalar_of(sort, out_val);
        let witness = b.powers_of_two().number(out_val);
        Self(Alg { value: scalar, witness, split_bits: scalar.to_bits_le(), terms: Terms::Bits(out_bits) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use blstrs::Scalar as Fr;

    #[test]
    fn rotr_xor_shl_matches_plain_word_arithmetic() {
        let mut b = R1csBuilder::<Fr>::new();
        let x_val: u32 = 0x1234_5678;
        let x = CircuitWord::bless(&mut b, ValueSort::U32, x_val as u64, Visibility::Public);

        let rotated = x.rotr(&mut b, 7);
        let shifted = x.shl(&mut b, 3);
        let y = CircuitWord::xor(&mut b, &rotated, &shifted);

        let expected = x_val.rotate_right(7) ^ x_val.wrapping_shl(3);
        assert_eq!(y.value_u64() as u32, expected);

        let expected_word = CircuitWord::constant(&mut b, ValueSort::U32, expected as u64);
        let eq = CircuitWord::eq(&mut b, &y, &expected_word);
        dsl::assert_true(&mut b, &eq);
        assert!(b.is_satisfied());
    }
}
