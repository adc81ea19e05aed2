//! Shared substrate for the per-type algebras (component C4): the `Term`
//! (an R1 term, §3), the `Terms` representation an `Alg` carries (a single
//! scalar term or a per-bit vector of terms), the tagged application-value
//! enum `Scalar` that stands in for the original's `VAL` template
//! parameter, and `Alg` itself.
//!
//! Concrete typed façades live in sibling modules: [`boolean`], [`bigint`],
//! [`uint`].

pub mod bigint;
pub mod boolean;
pub mod uint;

use crate::lc::{Index, LinearCombination, Variable};
use ff::PrimeField;
use num_bigint::BigUint;

/// Maximum bit width this core supports for `BigInt` values (Design Notes
/// §9: "the bit width is small (<= 128 for big-ints in this core)").
pub const BIGINT_MAX_BITS: usize = 128;

/// The reserved identity variable `x0 = 1`.
pub fn one_var() -> Variable {
    Variable::new_unchecked(Index::Input(0))
}

/// How a blessed value's terms are allocated: [`R1csBuilder::create_public_variable`]
/// (fresh public-input id(s), each bit booleanity-constrained if split),
/// [`R1csBuilder::create_variable`] (auxiliary id(s), same constraints, not
/// part of the public prefix), or a compile-time constant (no id, no
/// constraint at all — invariant I5). Mirrors the three *bless* constructors
/// of §4.4: input bless (public or private) and the constant constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Constant,
}

/// A single R1 term: either a constant (`c . x0`) or a variable reference
/// (`coeff . xi`, `i >= 1`).
#[derive(Clone, Copy, Debug)]
pub struct Term<F: PrimeField> {
    var: Variable,
    coeff: F,
}

impl<F: PrimeField> Term<F> {
    pub fn constant(c: F) -> Self {
        Term { var: one_var(), coeff: c }
    }

    pub fn variable(var: Variable, coeff: F) -> Self {
        debug_assert!(
            var.get_unchecked() != Index::Input(0),
            "Term::variable must not be given the identity variable; use Term::constant"
        );
        Term { var, coeff }
    }

    /// `i >= 1`: this term references an allocated variable rather than
    /// the constant `x0`.
    pub fn is_variable(&self) -> bool {
        self.var.get_unchecked() != Index::Input(0)
    }

    /// A constant term whose coefficient is the field zero.
    pub fn zero_term(&self) -> bool {
        !self.is_variable() && bool::from(self.coeff.is_zero())
    }

    pub fn coeff(&self) -> F {
        self.coeff
    }

    pub fn var(&self) -> Variable {
        self.var
    }

    pub fn to_lc(self) -> LinearCombination<F> {
        LinearCombination::zero() + (self.coeff, self.var)
    }
}

/// The representation an `Alg` carries: either one scalar term, or
/// `size_bits(value)` per-bit terms (little-endian).
#[derive(Clone, Debug)]
pub enum Terms<F: PrimeField> {
    Scalar(Term<F>),
    Bits(Vec<Term<F>>),
}

impl<F: PrimeField> Terms<F> {
    pub fn as_scalar(&self) -> Option<Term<F>> {
        match self {
            Terms::Scalar(t) => Some(*t),
            Terms::Bits(_) => None,
        }
    }

    pub fn as_bits(&self) -> Option<&[Term<F>]> {
        match self {
            Terms::Bits(b) => Some(b),
            Terms::Scalar(_) => None,
        }
    }
}

/// Which sort of application value an `Alg`/expression carries. Stands in
/// for the closed set of `VAL` template instantiations in the original
/// (`bool`, `BigInt`, `uint8_t`, `uint32_t`, `uint64_t`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueSort {
    Bool,
    U8,
    U32,
    U64,
    Big,
}

impl ValueSort {
    /// `sizeBits(v)`: 1 for `bool`, 8/32/64 for fixed words,
    /// [`BIGINT_MAX_BITS`] for `BigInt`.
    pub fn size_bits(self) -> usize {
        match self {
            ValueSort::Bool => 1,
            ValueSort::U8 => 8,
            ValueSort::U32 => 32,
            ValueSort::U64 => 64,
            ValueSort::Big => BIGINT_MAX_BITS,
        }
    }
}

/// A concrete application-layer value, tagged with its [`ValueSort`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    Bool(bool),
    U8(u8),
    U32(u32),
    U64(u64),
    Big(BigUint),
}

impl Scalar {
    pub fn sort(&self) -> ValueSort {
        match self {
            Scalar::Bool(_) => ValueSort::Bool,
            Scalar::U8(_) => ValueSort::U8,
            Scalar::U32(_) => ValueSort::U32,
            Scalar::U64(_) => ValueSort::U64,
            Scalar::Big(_) => ValueSort::Big,
        }
    }

    /// `sizeBits(v)` for this specific value (`BigInt` uses the fixed
    /// [`BIGINT_MAX_BITS`] budget, not the value's minimal bit length).
    pub fn size_bits(&self) -> usize {
        self.sort().size_bits()
    }

    /// `valueBits(v)`: little-endian bit vector of length `size_bits()`.
    pub fn to_bits_le(&self) -> Vec<bool> {
        match self {
            Scalar::Bool(b) => vec![*b],
            Scalar::U8(v) => (0..8).map(|i| (v >> i) & 1 == 1).collect(),
            Scalar::U32(v) => (0..32).map(|i| (v >> i) & 1 == 1).collect(),
            Scalar::U64(v) => (0..64).map(|i| (v >> i) & 1 == 1).collect(),
            Scalar::Big(v) => {
                let mut out = Vec::with_capacity(BIGINT_MAX_BITS);
                for i in 0..BIGINT_MAX_BITS {
                    out.push(v.bit(i as u64));
                }
                out
            }
        }
    }

    /// Reconstruct a value of the given sort from a little-endian bit
    /// vector; extra high bits beyond `sort.size_bits()` are ignored
    /// (they hold `ADDMOD` overflow and are truncated by the caller via
    /// `rank1_xword`, never by this routine).
    pub fn from_bits_le(sort: ValueSort, bits: &[bool]) -> Scalar {
        match sort {
            ValueSort::Bool => Scalar::Bool(bits.first().copied().unwrap_or(false)),
            ValueSort::U8 => {
                let mut v: u8 = 0;
                for i in 0..8.min(bits.len()) {
                    if bits[i] {
                        v |= 1 << i;
                    }
                }
                Scalar::U8(v)
            }
            ValueSort::U32 => {
                let mut v: u32 = 0;
                for i in 0..32.min(bits.len()) {
                    if bits[i] {
                        v |= 1 << i;
                    }
                }
                Scalar::U32(v)
            }
            ValueSort::U64 => {
                let mut v: u64 = 0;
                for i in 0..64.min(bits.len()) {
                    if bits[i] {
                        v |= 1 << i;
                    }
                }
                Scalar::U64(v)
            }
            ValueSort::Big => {
                let mut v = BigUint::from(0u32);
                for (i, &b) in bits.iter().enumerate().take(BIGINT_MAX_BITS) {
                    if b {
                        v.set_bit(i as u64, true);
                    }
                }
                Scalar::Big(v)
            }
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            _ => panic!("Scalar::as_bool called on a non-bool value"),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Scalar::U8(v) => *v,
            _ => panic!("Scalar::as_u8 called on a non-u8 value"),
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            Scalar::U32(v) => *v,
            _ => panic!("Scalar::as_u32 called on a non-u32 value"),
        }
    }

    pub fn as_u64(&self) -> u64 {
        match self {
            Scalar::U64(v) => *v,
            _ => panic!("Scalar::as_u64 called on a non-u64 value"),
        }
    }

    pub fn as_big(&self) -> &BigUint {
        match self {
            Scalar::Big(v) => v,
            _ => panic!("Scalar::as_big called on a non-BigInt value"),
        }
    }
}

/// The per-type algebraic record (`Alg<VAL,FR,OP,CMP>` in the original,
/// generalized to a tagged `Scalar` value instead of a template parameter):
/// an application value, its field witness, its little-endian bit split,
/// and its R1 term(s).
#[derive(Clone, Debug)]
pub struct Alg<F: PrimeField> {
    pub value: Scalar,
    pub witness: F,
    pub split_bits: Vec<bool>,
    pub terms: Terms<F>,
}

impl<F: PrimeField> Alg<F> {
    /// A compile-time constant: all terms are constant, no variable is
    /// allocated, and blessing it emits no constraint (invariant I5).
    pub fn constant_scalar(value: Scalar, witness: F) -> Self {
        let split_bits = value.to_bits_le();
        Alg {
            value,
            witness,
            split_bits,
            terms: Terms::Scalar(Term::constant(witness)),
        }
    }

    pub fn result_scalar(value: Scalar, witness: F, split_bits: Vec<bool>, term: Term<F>) -> Self {
        Alg { value, witness, split_bits, terms: Terms::Scalar(term) }
    }

    pub fn result_bits(value: Scalar, witness: F, split_bits: Vec<bool>, terms: Vec<Term<F>>) -> Self {
        Alg { value, witness, split_bits, terms: Terms::Bits(terms) }
    }
}
