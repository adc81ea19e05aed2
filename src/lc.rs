use ff::PrimeField;
use std::ops::{Add, Sub};

/// Represents a variable in our constraint system, where the value
/// represents the index of the variable in the input or auxiliary vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Index {
    Input(usize),
    Aux(usize),
}

/// Represents a variable in our constraint system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable(Index);

impl Variable {
    /// This constructs a variable with an arbitrary index.
    /// Circuit implementations are not recommended to use this
    /// method directly, as the index or type might change
    /// depending on the constraint system implementation.
    pub fn new_unchecked(idx: Index) -> Variable {
        Variable(idx)
    }

    /// This returns the index underlying the variable.
    /// Circuit implementations are not recommended to use this
    /// method directly, as the index or type might change
    /// depending on the constraint system implementation.
    pub fn get_unchecked(&self) -> Index {
        self.0
    }
}

/// This represents a linear combination of some variables, with coefficients
/// in the scalar field of a pairing-friendly elliptic curve group.
#[derive(Clone, Debug)]
pub struct LinearCombination<F: PrimeField>(Vec<(Variable, F)>);

impl<F: PrimeField> Default for LinearCombination<F> {
    fn default() -> LinearCombination<F> {
        LinearCombination::zero()
    }
}

impl<F: PrimeField> LinearCombination<F> {
    pub fn zero() -> LinearCombination<F> {
        LinearCombination(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &F)> {
        self.0.iter().map(|(var, coeff)| (*var, coeff))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<F: PrimeField> Add<(F, Variable)> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn add(mut self, (coeff, var): (F, Variable)) -> LinearCombination<F> {
        self.0.push((var, coeff));
        self
    }
}

impl<F: PrimeField> Sub<(F, Variable)> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn sub(self, (coeff, var): (F, Variable)) -> LinearCombination<F> {
        self + (-coeff, var)
    }
}

impl<F: PrimeField> Add<Variable> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn add(self, other: Variable) -> LinearCombination<F> {
        self + (F::one(), other)
    }
}

impl<F: PrimeField> Sub<Variable> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn sub(self, other: Variable) -> LinearCombination<F> {
        self - (F::one(), other)
    }
}

impl<'a, F: PrimeField> Add<&'a LinearCombination<F>> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn add(mut self, other: &'a LinearCombination<F>) -> LinearCombination<F> {
        for (var, coeff) in other.0.iter() {
            self.0.push((*var, *coeff));
        }
        self
    }
}

impl<'a, F: PrimeField> Sub<&'a LinearCombination<F>> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn sub(mut self, other: &'a LinearCombination<F>) -> LinearCombination<F> {
        for (var, coeff) in other.0.iter() {
            self.0.push((*var, -*coeff));
        }
        self
    }
}

impl<'a, F: PrimeField> Add<(F, &'a LinearCombination<F>)> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn add(mut self, (coeff, other): (F, &'a LinearCombination<F>)) -> LinearCombination<F> {
        for (var, c) in other.0.iter() {
            let mut scaled = *c;
            scaled *= &coeff;
            self.0.push((*var, scaled));
        }
        self
    }
}

impl<'a, F: PrimeField> Sub<(F, &'a LinearCombination<F>)> for LinearCombination<F> {
    type Output = LinearCombination<F>;

    fn sub(self, (coeff, other): (F, &'a LinearCombination<F>)) -> LinearCombination<F> {
        self + (-coeff, other)
    }
}
