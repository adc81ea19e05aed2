//! `Bool` algebra (component C4/C5 specialisation): the one-bit value sort.
//! Every other per-type algebra bottoms out here — a fixed-width word's
//! per-bit lanes, and a `BigInt` comparison's result, are all `CircuitBool`.
//!
//! Grounded on `Alg_bool.hpp` (the peephole table for one-variable-one-constant
//! operands lives in [`crate::rank1::logical_result`], shared by this type and
//! by [`super::uint::CircuitWord`]'s per-bit lanes).

use crate::algebra::{Alg, Scalar, Term, Visibility};
use crate::builder::R1csBuilder;
use crate::ops::LogicalOp;
use ff::PrimeField;

#[derive(Clone, Debug)]
pub struct CircuitBool<F: PrimeField>(pub(crate) Alg<F>);

impl<F: PrimeField> CircuitBool<F> {
    pub fn value(&self) -> bool {
        self.0.value.as_bool()
    }

    pub fn witness(&self) -> F {
        self.0.witness
    }

    pub(crate) fn term(&self) -> Term<F> {
        self.0.terms.as_scalar().expect("CircuitBool always carries a single scalar term")
    }

    pub(crate) fn from_term(value: bool, term: Term<F>) -> Self {
        CircuitBool(Alg::result_scalar(Scalar::Bool(value), crate::field::bool_to(value), vec![value], term))
    }

    /// A compile-time constant: no variable, no constraint (invariant I5).
    pub fn constant(value: bool) -> Self {
        CircuitBool(Alg::constant_scalar(Scalar::Bool(value), crate::field::bool_to(value)))
    }

    /// *Input bless*: a fresh public-input or private auxiliary variable
    /// with its booleanity constraint (I1), or a constant with none.
    pub fn bless(b: &mut R1csBuilder<F>, value: bool, vis: Visibility) -> Self {
        let witness = crate::field::bool_to(value);
        match vis {
            Visibility::Constant => Self::constant(value),
            Visibility::Public => {
                let t = b.create_public_variable(witness);
                b.add_booleanity(t);
                Self::from_term(value, t)
            }
            Visibility::Private => {
                let t = b.create_variable(witness);
                b.add_booleanity(t);
                Self::from_term(value, t)
            }
        }
    }

    fn binary(b: &mut R1csBuilder<F>, op: LogicalOp, x: &Self, y: &Self) -> Self {
        let value = crate::ops::eval_logical(op, x.value(), y.value());
        let witness = crate::field::bool_to(value);
        let z = b.create_result_logical(op, x.term(), y.term(), witness);
        Self::from_term(value, z)
    }

    pub fn and(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::binary(b, LogicalOp::And, x, y)
    }

    pub fn or(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::binary(b, LogicalOp::Or, x, y)
    }

    pub fn xor(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::binary(b, LogicalOp::Xor, x, y)
    }

    /// `SAME`: Boolean equality (`x == y`).
    pub fn same(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::binary(b, LogicalOp::Same, x, y)
    }

    pub fn eq(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::same(b, x, y)
    }

    pub fn neq(b: &mut R1csBuilder<F>, x: &Self, y: &Self) -> Self {
        Self::xor(b, x, y)
    }

    pub fn not(b: &mut R1csBuilder<F>, x: &Self) -> Self {
        let value = !x.value();
        let witness = crate::field::bool_to(value);
        let z = b.create_result_logical(LogicalOp::Cmplmnt, x.term(), x.term(), witness);
        Self::from_term(value, z)
    }

    /// `assert_true`/`assert_false` (§4.8): enforces `x = 1` or `x = 0`
    /// directly on the underlying term.
    pub fn assert_true(b: &mut R1csBuilder<F>, x: &Self) {
        assert!(x.value(), "assert_true on a term whose witness is false");
        b.set_true(x.term());
    }

    pub fn assert_false(b: &mut R1csBuilder<F>, x: &Self) {
        assert!(!x.value(), "assert_false on a term whose witness is true");
        b.set_false(x.term());
    }

    /// Multi-input AND/OR/NOR reductions (§4.5/§4.7). `declarative_*` is
    /// only valid when the caller already knows the aggregate result from
    /// construction (e.g. asserting a conjunction); `imperative_*` works
    /// for any witness via the power-of-two tournament.
    pub fn declarative_and(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let z = b.declarative_and(&terms);
        Self::from_term(true, z)
    }

    pub fn declarative_nor(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let z = b.declarative_nor(&terms);
        Self::from_term(false, z)
    }

    pub fn imperative_and(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let witness_bits: Vec<bool> = xs.iter().map(|x| x.value()).collect();
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let value = witness_bits.iter().all(|&v| v);
        let z = b.imperative_and(&terms, &witness_bits);
        Self::from_term(value, z)
    }

    pub fn imperative_or(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let witness_bits: Vec<bool> = xs.iter().map(|x| x.value()).collect();
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let value = witness_bits.iter().any(|&v| v);
        let z = b.imperative_or(&terms, &witness_bits);
        Self::from_term(value, z)
    }

    pub fn imperative_xor(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let witness_bits: Vec<bool> = xs.iter().map(|x| x.value()).collect();
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let value = witness_bits.iter().fold(false, |acc, &v| acc != v);
        let z = b.imperative_xor(&terms, &witness_bits);
        Self::from_term(value, z)
    }

    /// `safeAND`/`safeOR`/`safeNOR` (§4.9): single-bit short-circuit, else
    /// power-of-two padded imperative fold.
    pub fn safe_and(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let witness_bits: Vec<bool> = xs.iter().map(|x| x.value()).collect();
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let value = witness_bits.iter().all(|&v| v);
        let z = b.safe_and(&terms, &witness_bits);
        Self::from_term(value, z)
    }

    pub fn safe_or(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let witness_bits: Vec<bool> = xs.iter().map(|x| x.value()).collect();
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let value = witness_bits.iter().any(|&v| v);
        let z = b.safe_or(&terms, &witness_bits);
        Self::from_term(value, z)
    }

    pub fn safe_nor(b: &mut R1csBuilder<F>, xs: &[Self]) -> Self {
        let witness_bits: Vec<bool> = xs.iter().map(|x| x.value()).collect();
        let terms: Vec<Term<F>> = xs.iter().map(|x| x.term()).collect();
        let value = !witness_bits.iter().any(|&v| v);
        let z = b.safe_nor(&terms, &witness_bits);
        Self::from_term(value, z)
    }

    /// `cond ? t : f` (§4.8 ternary).
    pub fn select(b: &mut R1csBuilder<F>, cond: &Self, t: &Self, f: &Self) -> Self {
        let value = if cond.value() { t.value() } else { f.value() };
        let witness = crate::field::bool_to(value);
        let z = crate::rank1::select(b, cond.term(), t.term(), f.term(), witness);
        Self::from_term(value, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use blstrs::Scalar as Fr;

    #[test]
    fn xor_of_true_and_false_asserts_true() {
        let mut b = R1csBuilder::<Fr>::new();
        let a = CircuitBool::bless(&mut b, true, Visibility::Public);
        let c = CircuitBool::bless(&mut b, false, Visibility::Public);
        let result = CircuitBool::xor(&mut b, &a, &c);
        assert!(result.value());
        dsl::assert_true(&mut b, &result);
        assert!(b.is_satisfied());
    }
}
