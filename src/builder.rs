//! The R1CS accumulator (component C7): a per-task singleton (here, an
//! explicit value a caller constructs once per worker thread — Design
//! Notes §9 asks that the original's global singleton become an explicit,
//! passed-by-reference builder) that owns the unique-id counter, the
//! constraint system, the witness map, and the public-input checkpoint.

use crate::algebra::{one_var, Term};
use crate::field::PowersOfTwo;
use crate::lc::{Index, LinearCombination, Variable};
use crate::ops::{BitwiseOp, LogicalOp};
use crate::rank1;
use ff::{Field, PrimeField};

/// Per-task accumulator of an R1CS and its concrete witness.
///
/// `!Sync` by construction (plain `Vec`s, no interior mutability): one
/// instance per worker thread, matching §5's "single-threaded per
/// accumulator" scheduling model.
pub struct R1csBuilder<F: PrimeField> {
    constraints: Vec<(LinearCombination<F>, LinearCombination<F>, LinearCombination<F>)>,
    /// Index 0 always holds the identity `x0 = 1`.
    input_witness: Vec<F>,
    aux_witness: Vec<F>,
    /// Decimal-string cowitness for `BigInt` public inputs (`witnessTerms`).
    cowitness: Vec<(u64, String)>,
    /// `Some(nPub)` once `checkpoint_input()` has locked the public prefix.
    checkpoint: Option<usize>,
    powers: PowersOfTwo<F>,
}

impl<F: PrimeField> Default for R1csBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> R1csBuilder<F> {
    pub fn new() -> Self {
        log::trace!("new R1csBuilder");
        R1csBuilder {
            constraints: Vec::new(),
            input_witness: vec![F::one()],
            aux_witness: Vec::new(),
            cowitness: Vec::new(),
            checkpoint: None,
            powers: PowersOfTwo::new(),
        }
    }

    /// Drops all constraints, witness, and the id counter (§4.7 `reset()`).
    pub fn reset(&mut self) {
        log::debug!(
            "resetting R1csBuilder ({} constraints, {} inputs, {} aux discarded)",
            self.constraints.len(),
            self.input_witness.len(),
            self.aux_witness.len()
        );
        self.constraints.clear();
        self.input_witness = vec![F::one()];
        self.aux_witness.clear();
        self.cowitness.clear();
        self.checkpoint = None;
        self.powers = PowersOfTwo::new();
    }

    pub fn one() -> Variable {
        one_var()
    }

    pub fn powers_of_two(&mut self) -> &mut PowersOfTwo<F> {
        &mut self.powers
    }

    /// Next free variable id (I1: ids are never reused, monotonically
    /// increasing, counting the reserved `x0` in the input side).
    pub fn counter_id(&self) -> u64 {
        (self.input_witness.len() + self.aux_witness.len()) as u64
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Read access to the appended constraint sequence, for serialization
    /// (§6) and for a test harness's audit pass.
    pub fn constraints(&self) -> &[(LinearCombination<F>, LinearCombination<F>, LinearCombination<F>)] {
        &self.constraints
    }

    /// Full public-input witness, including the reserved `x0 = 1` slot.
    pub fn input_witness(&self) -> &[F] {
        &self.input_witness
    }

    pub fn aux_witness(&self) -> &[F] {
        &self.aux_witness
    }

    pub fn is_public_input_open(&self) -> bool {
        self.checkpoint.is_none()
    }

    /// Locks the current witness prefix as the public input (I3): no id
    /// already allocated, and no id allocated after this call, may join
    /// the public prefix. The original exposes both a "checkpoint" and an
    /// implicit "everything is public until I say otherwise" style; this
    /// crate makes the explicit checkpoint the only one, per Design Notes.
    pub fn checkpoint_input(&mut self) {
        assert!(self.checkpoint.is_none(), "public input was already checkpointed");
        log::debug!("checkpointing {} public inputs", self.input_witness.len());
        self.checkpoint = Some(self.input_witness.len());
    }

    /// Allocates a fresh public-input variable with the given witness.
    /// Programmer error (panics) once the checkpoint has been taken.
    pub fn alloc_input(&mut self, value: F) -> Variable {
        assert!(
            self.checkpoint.is_none(),
            "cannot allocate a new public input after checkpoint_input()"
        );
        let idx = self.input_witness.len();
        self.input_witness.push(value);
        Variable::new_unchecked(Index::Input(idx))
    }

    /// Allocates a fresh auxiliary variable with the given witness.
    pub fn alloc_aux(&mut self, value: F) -> Variable {
        let idx = self.aux_witness.len();
        self.aux_witness.push(value);
        Variable::new_unchecked(Index::Aux(idx))
    }

    pub fn witness_of(&self, var: Variable) -> F {
        match var.get_unchecked() {
            Index::Input(i) => self.input_witness[i],
            Index::Aux(i) => self.aux_witness[i],
        }
    }

    /// `createTerm`: if `is_variable`, allocates a new auxiliary id and
    /// records its witness; otherwise returns a constant term.
    pub fn create_term(&mut self, value: F, is_variable: bool) -> Term<F> {
        if is_variable {
            let var = self.alloc_aux(value);
            Term::variable(var, F::one())
        } else {
            Term::constant(value)
        }
    }

    pub fn create_constant(&mut self, value: F) -> Term<F> {
        Term::constant(value)
    }

    pub fn create_variable(&mut self, value: F) -> Term<F> {
        self.create_term(value, true)
    }

    /// Allocates a fresh public-input variable and returns it as a term
    /// (used by `bless` of a public value).
    pub fn create_public_variable(&mut self, value: F) -> Term<F> {
        let var = self.alloc_input(value);
        Term::variable(var, F::one())
    }

    /// Records the decimal-string cowitness entry for a `BigInt` public
    /// input's leading term (`witnessTerms`).
    pub fn witness_terms(&mut self, term: Term<F>, decimal: String) {
        if let Index::Input(i) = term.var().get_unchecked() {
            self.cowitness.push((i as u64, decimal));
        } else {
            log::debug!("witness_terms called on a non-input term; ignored");
        }
    }

    pub fn cowitness(&self) -> &[(u64, String)] {
        &self.cowitness
    }

    pub fn enforce(
        &mut self,
        a: LinearCombination<F>,
        b: LinearCombination<F>,
        c: LinearCombination<F>,
    ) {
        self.constraints.push((a, b, c));
    }

    /// `x * (1 - x) = 0`.
    pub fn add_booleanity(&mut self, x: Term<F>) {
        assert!(x.is_variable(), "booleanity constraint requires a variable term");
        rank1::booleanity(self, x);
    }

    pub fn add_booleanity_many(&mut self, xs: &[Term<F>]) {
        for &x in xs {
            self.add_booleanity(x);
        }
    }

    /// `x = 1`.
    pub fn set_true(&mut self, x: Term<F>) {
        let one = LinearCombination::zero() + (F::one(), Self::one());
        self.enforce(LinearCombination::zero() + (F::one(), Self::one()), one, x.to_lc());
    }

    /// `x = 0`.
    pub fn set_false(&mut self, x: Term<F>) {
        let one = LinearCombination::zero() + (F::one(), Self::one());
        self.enforce(LinearCombination::zero(), one, x.to_lc());
    }

    /// Coerces a scalar-or-bits representation to the scalar form,
    /// splitting bits into a fresh scalar variable and a `split`
    /// constraint if the value currently lives as a bit vector.
    pub fn arg_scalar(&mut self, alg: &crate::algebra::Alg<F>) -> Term<F> {
        match &alg.terms {
            crate::algebra::Terms::Scalar(t) => *t,
            crate::algebra::Terms::Bits(bits) => self.bits_to_scalar(bits, alg.witness),
        }
    }

    /// Coerces to the per-bit representation, splitting a scalar term
    /// into fresh bit variables (plus booleanity and split constraints)
    /// if the value currently lives as a single scalar term.
    pub fn arg_bits(&mut self, alg: &crate::algebra::Alg<F>) -> Vec<Term<F>> {
        match &alg.terms {
            crate::algebra::Terms::Bits(bits) => bits.clone(),
            crate::algebra::Terms::Scalar(t) => self.scalar_to_bits(*t, &alg.split_bits),
        }
    }

    /// Splits a scalar term `x` into bit variables matching `split_bits`,
    /// with a booleanity constraint per bit and one `split` constraint
    /// tying them back to `x` (invariant I2). Constant scalars produce
    /// constant bit terms with no constraints at all (invariant I5).
    pub fn scalar_to_bits(&mut self, x: Term<F>, split_bits: &[bool]) -> Vec<Term<F>> {
        if !x.is_variable() {
            return split_bits
                .iter()
                .map(|&b| Term::constant(crate::field::bool_to(b)))
                .collect();
        }

        let bits: Vec<Term<F>> = split_bits
            .iter()
            .map(|&b| {
                let v = self.alloc_aux(crate::field::bool_to(b));
                Term::variable(v, F::one())
            })
            .collect();
        self.add_booleanity_many(&bits);
        rank1::split(self, x, &bits);
        bits
    }

    /// Recombines bit terms into a scalar term: constant-only bit vectors
    /// fold to a constant with no constraint; otherwise a fresh scalar
    /// variable is allocated and tied to the bits by a `split` constraint.
    pub fn bits_to_scalar(&mut self, bits: &[Term<F>], witness: F) -> Term<F> {
        if bits.iter().all(|b| !b.is_variable()) {
            return Term::constant(witness);
        }
        let var = self.alloc_aux(witness);
        let x = Term::variable(var, F::one());
        rank1::split(self, x, bits);
        x
    }

    /// `createResult` for the Boolean `LogicalOp` group, applying the
    /// peephole simplifications of §4.5: both constant -> constant, no
    /// constraint; one side constant -> the algebraic identity for that
    /// operator (no new variable); both variable -> the matching gadget.
    pub fn create_result_logical(&mut self, op: LogicalOp, x: Term<F>, y: Term<F>, witness: F) -> Term<F> {
        rank1::logical_result(self, op, x, y, witness)
    }

    /// `createResult` for the fixed-width `BitwiseOp` group (single-bit
    /// lane; the `uint` algebra calls this once per bit, or once for the
    /// whole scalar term in the `ADDMOD` case).
    pub fn create_result_bitwise(&mut self, op: BitwiseOp, x: Term<F>, y: Term<F>, witness: F) -> Term<F> {
        rank1::bitwise_result(self, op, x, y, witness)
    }

    /// `createResult` for `BigInt`/`ScalarOps`: always a fresh scalar
    /// gate, no peephole (constant folding happens earlier, at the
    /// `evalStackOp` level, before either operand reaches this call).
    pub fn create_result_scalar(&mut self, op: crate::ops::ScalarOp, x: Term<F>, y: Term<F>, witness: F) -> Term<F> {
        rank1::scalar_result(self, op, x, y, witness)
    }

    pub fn permute_bits(&mut self, op: BitwiseOp, bits: &[Term<F>], n: usize) -> Vec<Term<F>> {
        rank1::permute(op, bits, n)
    }

    /// `declarative_AND`: valid only when the circuit is constructed so
    /// that the caller already knows every `x[i]` must equal 1.
    pub fn declarative_and(&mut self, bits: &[Term<F>]) -> Term<F> {
        rank1::declarative_multi_and(self, bits, true)
    }

    /// `declarative_NOR`: valid only when the caller already knows every
    /// `x[i]` must equal 0.
    pub fn declarative_nor(&mut self, bits: &[Term<F>]) -> Term<F> {
        rank1::declarative_multi_or(self, bits, false)
    }

    pub fn imperative_and(&mut self, bits: &[Term<F>], witness_bits: &[bool]) -> Term<F> {
        rank1::imperative_gate(self, LogicalOp::And, bits, witness_bits)
    }

    pub fn imperative_or(&mut self, bits: &[Term<F>], witness_bits: &[bool]) -> Term<F> {
        rank1::imperative_gate(self, LogicalOp::Or, bits, witness_bits)
    }

    pub fn imperative_xor(&mut self, bits: &[Term<F>], witness_bits: &[bool]) -> Term<F> {
        rank1::imperative_gate(self, LogicalOp::Xor, bits, witness_bits)
    }

    /// `safeAND`: a single bit needs no gate; otherwise pads to a power of
    /// two (duplicating the last bit is safe: idempotent for AND) and
    /// folds with the general tournament, since the aggregate result is
    /// not known ahead of the call. See SPEC_FULL.md §4.9.
    pub fn safe_and(&mut self, bits: &[Term<F>], witness_bits: &[bool]) -> Term<F> {
        self.safe_fold(LogicalOp::And, bits, witness_bits)
    }

    /// `safeOR`, same padding rule as [`Self::safe_and`].
    pub fn safe_or(&mut self, bits: &[Term<F>], witness_bits: &[bool]) -> Term<F> {
        self.safe_fold(LogicalOp::Or, bits, witness_bits)
    }

    /// `safeNOR`: `NOT(safeOR(bits))`.
    pub fn safe_nor(&mut self, bits: &[Term<F>], witness_bits: &[bool]) -> Term<F> {
        let or_bit = self.safe_or(bits, witness_bits);
        let or_witness = witness_bits.iter().any(|&b| b);
        self.create_result_logical(LogicalOp::Cmplmnt, or_bit, or_bit, crate::field::bool_to(!or_witness))
    }

    fn safe_fold(&mut self, op: LogicalOp, bits: &[Term<F>], witness_bits: &[bool]) -> Term<F> {
        assert_eq!(bits.len(), witness_bits.len());
        assert!(!bits.is_empty(), "safe fold requires at least one bit");

        if bits.len() == 1 {
            return bits[0];
        }

        let mut padded_bits = bits.to_vec();
        let mut padded_witness = witness_bits.to_vec();
        let target = padded_bits.len().next_power_of_two();
        while padded_bits.len() < target {
            padded_bits.push(*padded_bits.last().unwrap());
            padded_witness.push(*padded_witness.last().unwrap());
        }

        rank1::imperative_gate(self, op, &padded_bits, &padded_witness)
    }

    /// `inverse(a)`, used by the declarative gates; panics on zero per
    /// their precondition that the denominator is nonzero in context.
    pub(crate) fn inverse(a: F) -> F {
        Option::<F>::from(a.invert()).expect("declarative gate inverted a zero denominator")
    }
}
