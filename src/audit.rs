//! Constraint-satisfaction auditing: the test-facing counterpart to the
//! teacher's `TestConstraintSystem` (`eval_lc`/`which_is_unsatisfied`/
//! `is_satisfied`), but reading straight off [`R1csBuilder`]'s own witness
//! vectors instead of a parallel constraint-system implementation — this
//! crate's builder already holds the concrete witness, so there is nothing
//! left for a second bookkeeping struct to track.

use crate::builder::R1csBuilder;
use crate::lc::LinearCombination;
use ff::{Field, PrimeField};

impl<F: PrimeField> R1csBuilder<F> {
    /// The concrete value of a linear combination under the current witness.
    pub fn eval_lc(&self, lc: &LinearCombination<F>) -> F {
        let mut acc = F::zero();
        for (var, coeff) in lc.iter() {
            let mut term = self.witness_of(var);
            term *= coeff;
            acc += term;
        }
        acc
    }

    /// Index of the first constraint whose `A * B != C` under the current
    /// witness, or `None` if every constraint holds.
    pub fn which_is_unsatisfied(&self) -> Option<usize> {
        self.constraints().iter().position(|(a, b, c)| {
            let av = self.eval_lc(a);
            let bv = self.eval_lc(b);
            let cv = self.eval_lc(c);
            av * bv != cv
        })
    }

    pub fn is_satisfied(&self) -> bool {
        self.which_is_unsatisfied().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::uint::CircuitWord;
    use crate::algebra::{ValueSort, Visibility};
    use blstrs::Scalar as Fr;

    #[test]
    fn satisfied_after_consistent_gadget_use() {
        let mut b = R1csBuilder::<Fr>::new();
        assert!(b.is_satisfied());

        let x = CircuitWord::bless(&mut b, ValueSort::U32, 7, Visibility::Public);
        let y = CircuitWord::bless(&mut b, ValueSort::U32, 3, Visibility::Public);
        let _ = CircuitWord::xor(&mut b, &x, &y);

        assert!(b.is_satisfied());
        assert!(b.which_is_unsatisfied().is_none());
    }

    #[test]
    fn unsatisfied_constraint_is_reported_by_index() {
        let mut b = R1csBuilder::<Fr>::new();

        let x = b.alloc_aux(Fr::from(2u64));
        let y = b.alloc_aux(Fr::from(3u64));
        let z = b.alloc_aux(Fr::from(999u64));

        let lc_x = LinearCombination::zero() + (Fr::one(), x);
        let lc_y = LinearCombination::zero() + (Fr::one(), y);
        let lc_z = LinearCombination::zero() + (Fr::one(), z);
        b.enforce(lc_x, lc_y, lc_z);

        assert!(!b.is_satisfied());
        assert_eq!(b.which_is_unsatisfied(), Some(0));
    }
}
