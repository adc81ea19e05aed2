//! Constraint emission templates (component C6, `Rank1Ops` in the
//! original): the canonical gadget for each operator, booleanity, the
//! scalar/bits split constraint, shift/rotate permutation of a term
//! vector, and cross-width conversion (`rank1_xword`).
//!
//! Every function here either emits exactly the constraint(s) the table in
//! SPEC_FULL.md §4 names, or performs a peephole simplification (constant
//! folding, or the single-variable identity table) that the spec requires
//! to emit *no* constraint at all (invariant I5).

use crate::algebra::Term;
use crate::builder::R1csBuilder;
use crate::lc::LinearCombination;
use crate::ops::{BitwiseOp, LogicalOp, ScalarOp};
use ff::{Field, PrimeField};

fn one_lc<F: PrimeField>() -> LinearCombination<F> {
    LinearCombination::zero() + (F::one(), R1csBuilder::<F>::one())
}

fn const_lc<F: PrimeField>(v: F) -> LinearCombination<F> {
    LinearCombination::zero() + (v, R1csBuilder::<F>::one())
}

/// `x . (1 - x) = 0`.
pub fn booleanity<F: PrimeField>(b: &mut R1csBuilder<F>, x: Term<F>) {
    let x_lc = x.to_lc();
    let one_minus_x = const_lc::<F>(F::one()) - &x_lc;
    b.enforce(x_lc, one_minus_x, LinearCombination::zero());
}

/// `sum_i 2^i . b_i = x`.
pub fn split<F: PrimeField>(b: &mut R1csBuilder<F>, x: Term<F>, bits: &[Term<F>]) {
    let mut lc = LinearCombination::zero();
    for (i, bit) in bits.iter().enumerate() {
        if bit.zero_term() {
            continue;
        }
        let weight = b.powers_of_two().lookup(i);
        lc = lc + (weight * bit.coeff(), bit.var());
    }
    b.enforce(lc, one_lc(), x.to_lc());
}

/// `x + z = 1`.
fn enforce_cmplmnt<F: PrimeField>(b: &mut R1csBuilder<F>, x: Term<F>, z: Term<F>) {
    b.enforce(x.to_lc() + &z.to_lc(), one_lc(), const_lc(F::one()));
}

/// The quadratic (AND/OR/XOR/SAME) and linear (ADD/SUB/MUL share the
/// quadratic MUL shape; ADD/SUB are linear) gates, for the case where both
/// operands are already-allocated variables.
fn emit_binary_gate<F: PrimeField>(b: &mut R1csBuilder<F>, op: LogicalOp, x: Term<F>, y: Term<F>, z: Term<F>) {
    let two = F::one() + F::one();
    let x_lc = x.to_lc();
    let y_lc = y.to_lc();
    let z_lc = z.to_lc();

    match op {
        LogicalOp::And => {
            b.enforce(x_lc, y_lc, z_lc);
        }
        LogicalOp::Or => {
            // x + y - z = x * y
            let c = x.to_lc() + &y_lc - &z_lc;
            b.enforce(x_lc, y_lc, c);
        }
        LogicalOp::Xor => {
            // x + y - z = 2xy
            let c = x.to_lc() + &y_lc - &z_lc;
            let scaled_y = LinearCombination::zero() + (two, &y_lc);
            b.enforce(x_lc, scaled_y, c);
        }
        LogicalOp::Same => {
            // x + y + z - 1 = 2xy
            let c = x.to_lc() + &y_lc + &z_lc - &const_lc(F::one());
            let scaled_y = LinearCombination::zero() + (two, &y_lc);
            b.enforce(x_lc, scaled_y, c);
        }
        LogicalOp::Cmplmnt => unreachable!("Cmplmnt is unary, handled by logical_result directly"),
    }
}

/// `createResult` for the Boolean/per-bit `LogicalOp` group: applies the
/// full peephole table of §4.5 (both constant -> constant; one variable,
/// one constant -> the algebraic identity, no new variable; both variable
/// -> the matching two-input gate), then allocates a fresh output term
/// only in the last case.
pub fn logical_result<F: PrimeField>(b: &mut R1csBuilder<F>, op: LogicalOp, x: Term<F>, y: Term<F>, witness: F) -> Term<F> {
    if op == LogicalOp::Cmplmnt {
        // unary: `x` carries no information, `y` is the sole operand.
        if !y.is_variable() {
            return Term::constant(witness);
        }
        let z_var = b.alloc_aux(witness);
        let z = Term::variable(z_var, F::one());
        enforce_cmplmnt(b, y, z);
        return z;
    }

    let x_is_var = x.is_variable();
    let y_is_var = y.is_variable();

    if !x_is_var && !y_is_var {
        return Term::constant(witness);
    }

    if x_is_var && y_is_var {
        let z_var = b.alloc_aux(witness);
        let z = Term::variable(z_var, F::one());
        emit_binary_gate(b, op, x, y, z);
        return z;
    }

    // Exactly one side is a variable: return the algebraic identity with
    // no new variable allocated, matching the original's `xIsVar`/`yIsVar`
    // switch in `Alg_bool.hpp`.
    let (var_term, const_coeff) = if x_is_var { (x, y.coeff()) } else { (y, x.coeff()) };
    let const_true = !bool::from(const_coeff.is_zero());

    match (op, const_true) {
        (LogicalOp::And, true) => var_term,
        (LogicalOp::And, false) => Term::constant(F::zero()),
        (LogicalOp::Or, true) => Term::constant(F::one()),
        (LogicalOp::Or, false) => var_term,
        (LogicalOp::Xor, true) => {
            let z_var = b.alloc_aux(witness);
            let z = Term::variable(z_var, F::one());
            enforce_cmplmnt(b, var_term, z);
            z
        }
        (LogicalOp::Xor, false) => var_term,
        (LogicalOp::Same, true) => var_term,
        (LogicalOp::Same, false) => {
            let z_var = b.alloc_aux(witness);
            let z = Term::variable(z_var, F::one());
            enforce_cmplmnt(b, var_term, z);
            z
        }
        (LogicalOp::Cmplmnt, _) => unreachable!(),
    }
}

fn bitwise_to_logical(op: BitwiseOp) -> Option<LogicalOp> {
    match op {
        BitwiseOp::And => Some(LogicalOp::And),
        BitwiseOp::Or => Some(LogicalOp::Or),
        BitwiseOp::Xor => Some(LogicalOp::Xor),
        BitwiseOp::Same => Some(LogicalOp::Same),
        BitwiseOp::Cmplmnt => Some(LogicalOp::Cmplmnt),
        BitwiseOp::Addmod | BitwiseOp::Shl | BitwiseOp::Shr | BitwiseOp::Rotl | BitwiseOp::Rotr => None,
    }
}

/// `createResult` for fixed-width words: per-bit lanes of AND/OR/XOR/
/// SAME/CMPLMNT reduce to the Boolean gate above (a single bit is a
/// Boolean); `ADDMOD` is a scalar `ADD` over the whole (possibly
/// overflowed) term, with the explicit zero-term peephole the spec calls
/// out ("ADDMOD return the other operand"). `SHL`/`SHR`/`ROTL`/`ROTR`
/// never reach this function (`isPermute` routes them to `permute`
/// instead, which emits no constraint at all).
pub fn bitwise_result<F: PrimeField>(b: &mut R1csBuilder<F>, op: BitwiseOp, x: Term<F>, y: Term<F>, witness: F) -> Term<F> {
    if let Some(logical) = bitwise_to_logical(op) {
        return logical_result(b, logical, x, y, witness);
    }

    match op {
        BitwiseOp::Addmod => {
            if !x.is_variable() && !y.is_variable() {
                return Term::constant(witness);
            }
            if x.zero_term() {
                return y;
            }
            if y.zero_term() {
                return x;
            }
            let z_var = b.alloc_aux(witness);
            let z = Term::variable(z_var, F::one());
            b.enforce(x.to_lc() + &y.to_lc(), one_lc(), z.to_lc());
            z
        }
        BitwiseOp::Shl | BitwiseOp::Shr | BitwiseOp::Rotl | BitwiseOp::Rotr => {
            unreachable!("permutation operators never call createResult")
        }
        _ => unreachable!(),
    }
}

/// `createResult` for `BigInt`/`ScalarOps`: constant folding only (no
/// partial-operand identity elimination — unlike the Boolean/bitwise
/// groups, `ADD`/`SUB`/`MUL` have no cheap single-variable shortcut the
/// original exploits).
pub fn scalar_result<F: PrimeField>(b: &mut R1csBuilder<F>, op: ScalarOp, x: Term<F>, y: Term<F>, witness: F) -> Term<F> {
    if !x.is_variable() && !y.is_variable() {
        return Term::constant(witness);
    }

    let z_var = b.alloc_aux(witness);
    let z = Term::variable(z_var, F::one());
    let x_lc = x.to_lc();
    let y_lc = y.to_lc();
    let z_lc = z.to_lc();

    match op {
        ScalarOp::Add => b.enforce(x_lc + &y_lc, one_lc(), z_lc),
        ScalarOp::Sub => b.enforce(x_lc - &y_lc, one_lc(), z_lc),
        ScalarOp::Mul => b.enforce(x_lc, y_lc, z_lc),
    }
    z
}

/// `rank1_shiftleft`/`rank1_shiftright`/`rank1_rotateleft`/`rank1_rotateright`,
/// dispatched by `permuteBits`. These move existing term references around
/// — shifts insert constant-zero terms at the vacated positions — and
/// never emit a constraint, consistent with §4.5's "no new constraints".
///
/// Per the Design Notes' resolution of the shift-at-word-width open
/// question, `n` must lie in `[0, len]`: shifts saturate to all-zero at
/// `n == len` (`SHL(x, W) = 0`, `SHR(x, W) = 0`) while rotates wrap back to
/// the identity (`ROTL(x, W) = x`, `ROTR(x, W) = x`).
pub fn permute<F: PrimeField>(op: BitwiseOp, x: &[Term<F>], n: usize) -> Vec<Term<F>> {
    assert!(!x.is_empty());
    let len = x.len();
    assert!(n <= len, "shift/rotate count {} exceeds word width {}", n, len);

    if n == 0 {
        return x.to_vec();
    }

    match op {
        BitwiseOp::Shl => {
            let mut v = vec![Term::constant(F::zero()); len];
            if n < len {
                for i in n..len {
                    v[i] = x[i - n];
                }
            }
            v
        }
        BitwiseOp::Shr => {
            let mut v = vec![Term::constant(F::zero()); len];
            if n < len {
                for i in 0..len - n {
                    v[i] = x[i + n];
                }
            }
            v
        }
        BitwiseOp::Rotl => {
            let n = n % len;
            if n == 0 {
                return x.to_vec();
            }
            let mut v = vec![Term::constant(F::zero()); len];
            for i in 0..len {
                v[(i + n) % len] = x[i];
            }
            v
        }
        BitwiseOp::Rotr => {
            let n = n % len;
            if n == 0 {
                return x.to_vec();
            }
            let mut v = vec![Term::constant(F::zero()); len];
            for i in 0..len {
                v[i] = x[(i + n) % len];
            }
            v
        }
        _ => unreachable!("permute() only handles SHL/SHR/ROTL/ROTR"),
    }
}

/// `rank1_select`: the ternary-expression gadget (`cond ? t : f`), one
/// constraint per call: `cond * (t - f) = out - f`. Used by [`crate::dsl`]
/// for the DSL's conditional operator and by the Merkle path gadget to pick
/// left/right child order from a selector bit.
pub fn select<F: PrimeField>(b: &mut R1csBuilder<F>, cond: Term<F>, t: Term<F>, f: Term<F>, witness: F) -> Term<F> {
    if !cond.is_variable() {
        return if bool::from(cond.coeff().is_zero()) { f } else { t };
    }
    if !t.is_variable() && !f.is_variable() && t.coeff() == f.coeff() {
        return t;
    }

    let z_var = b.alloc_aux(witness);
    let z = Term::variable(z_var, F::one());
    let diff = t.to_lc() - &f.to_lc();
    let out_diff = z.to_lc() - &f.to_lc();
    b.enforce(cond.to_lc(), diff, out_diff);
    z
}

/// `rank1_xword`: zero-extend a narrower term vector, truncate a wider
/// one, or replicate a single Boolean term across every target position.
pub fn xword<F: PrimeField>(x: &[Term<F>], return_size: usize) -> Vec<Term<F>> {
    let mut v = vec![Term::constant(F::zero()); return_size];

    if x.len() == 1 {
        for slot in v.iter_mut() {
            *slot = x[0];
        }
    } else {
        let n = return_size.min(x.len());
        v[..n].copy_from_slice(&x[..n]);
    }

    v
}

/// Concrete value of a term given the builder's witness map (eager
/// evaluation means this is always available, unlike the original's
/// lazy two-pass `synthesize`).
fn term_value<F: PrimeField>(b: &R1csBuilder<F>, t: Term<F>) -> F {
    if t.is_variable() {
        t.coeff() * b.witness_of(t.var())
    } else {
        t.coeff()
    }
}

/// Shared shape of `declarative_AND`/`declarative_NOR`: an "is this
/// characteristic value zero" gadget in two constraints, using a witness
/// inverse so the prover never needs a division gadget in-circuit.
/// `characteristic` is `N - sum(x)` for AND (zero iff every bit is 1) and
/// `sum(x)` for OR (zero iff every bit is 0); `result_if_zero` selects
/// which of `{0, 1}` the gate's output takes when the characteristic is
/// zero.
fn is_zero_gate<F: PrimeField>(
    b: &mut R1csBuilder<F>,
    characteristic: LinearCombination<F>,
    characteristic_value: F,
    result_if_zero: bool,
) -> Term<F> {
    let is_zero = bool::from(characteristic_value.is_zero());
    let result_witness = is_zero == result_if_zero;
    let inv_value = if is_zero { F::zero() } else { R1csBuilder::<F>::inverse(characteristic_value) };

    let z_var = b.alloc_aux(crate::field::bool_to(result_witness));
    let z = Term::variable(z_var, F::one());
    let inv_var = b.alloc_aux(inv_value);
    let inv = Term::variable(inv_var, F::one());

    let (zero_branch, nonzero_branch) = if result_if_zero {
        (z.to_lc(), const_lc::<F>(F::one()) - &z.to_lc())
    } else {
        (const_lc::<F>(F::one()) - &z.to_lc(), z.to_lc())
    };

    // characteristic * result-on-the-zero-branch = 0
    b.enforce(characteristic.clone(), zero_branch, LinearCombination::zero());
    // characteristic * inv = result-on-the-nonzero-branch
    b.enforce(characteristic, inv.to_lc(), nonzero_branch);

    z
}

/// `declarative_multiAND`/`declarative_AND`: valid only when the caller
/// already knows every `x[i]` must equal `zbit` for the enclosing
/// statement to be satisfiable — e.g. an `assert_true` on a conjunction.
pub fn declarative_multi_and<F: PrimeField>(b: &mut R1csBuilder<F>, x: &[Term<F>], zbit: bool) -> Term<F> {
    let mut inputs = LinearCombination::zero();
    let mut sum_value = F::zero();
    for &t in x {
        inputs = inputs + (t.coeff(), t.var());
        sum_value += term_value(b, t);
    }

    let n_value = field_of_count(b, x.len());
    let characteristic_value = n_value - sum_value;
    let characteristic = const_lc::<F>(n_value) - &inputs;

    is_zero_gate(b, characteristic, characteristic_value, zbit)
}

/// `declarative_multiOR`/`declarative_NOR`: valid only when the caller
/// already knows every `x[i]` must equal `!zbit` for the enclosing
/// statement to be satisfiable.
pub fn declarative_multi_or<F: PrimeField>(b: &mut R1csBuilder<F>, x: &[Term<F>], zbit: bool) -> Term<F> {
    let mut inputs = LinearCombination::zero();
    let mut sum_value = F::zero();
    for &t in x {
        inputs = inputs + (t.coeff(), t.var());
        sum_value += term_value(b, t);
    }

    is_zero_gate(b, inputs, sum_value, !zbit)
}

fn field_of_count<F: PrimeField>(b: &mut R1csBuilder<F>, n: usize) -> F {
    b.powers_of_two().number(n as u64)
}

/// `imperative_AND`/`imperative_OR`/`imperative_XOR`: a power-of-two
/// tournament that folds pairs of inputs with the ordinary binary gate
/// until one bit remains. Works for any witness (the result need not be
/// known ahead of the call), unlike the declarative gates above.
pub fn imperative_gate<F: PrimeField>(b: &mut R1csBuilder<F>, op: LogicalOp, x: &[Term<F>], witness: &[bool]) -> Term<F> {
    assert_eq!(x.len(), witness.len());
    assert!(x.len().is_power_of_two(), "imperative_GATE requires a power-of-two input count");

    if x.len() == 1 {
        return x[0];
    }

    let half = x.len() / 2;
    let mut x2 = Vec::with_capacity(half);
    let mut witness2 = Vec::with_capacity(half);

    for i in 0..half {
        let bit = crate::ops::eval_logical(op, witness[i], witness[i + half]);
        witness2.push(bit);
        let z = logical_result(b, op, x[i], x[i + half], crate::field::bool_to(bit));
        x2.push(z);
    }

    if x2.len() == 1 {
        x2[0]
    } else {
        imperative_gate(b, op, &x2, &witness2)
    }
}
