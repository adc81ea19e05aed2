//! Operation taxonomy (component C2): the operator kinds the DSL supports,
//! their arities, and the plain-value interpreter used to produce the
//! witness side of every operator (`evalOp` in the original).

use std::ops::{Add, Mul, Sub};

/// Boolean-valued logical connectives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
    Xor,
    Same,
    Cmplmnt,
}

/// Scalar (non-bitwise) arithmetic, used by `BigInt`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarOp {
    Add,
    Sub,
    Mul,
}

/// Bitwise/word arithmetic, used by fixed-width unsigned words.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
    Same,
    Cmplmnt,
    Addmod,
    Shl,
    Shr,
    Rotl,
    Rotr,
}

/// Bit-vector equality, used for whole-value comparison of fixed-width
/// words (reduced to a per-bit `Same`/`Xor` fold).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EqualityCmp {
    Eq,
    Neq,
}

/// Ordered comparison, used by `BigInt`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarCmp {
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl LogicalOp {
    /// Number of operands this operator consumes (`Cmplmnt` is unary).
    pub fn argc(self) -> usize {
        match self {
            LogicalOp::Cmplmnt => 1,
            _ => 2,
        }
    }
}

impl BitwiseOp {
    pub fn argc(self) -> usize {
        match self {
            BitwiseOp::Cmplmnt => 1,
            _ => 2,
        }
    }

    /// `true` for the permutation operators recognised by `isPermute`:
    /// shifts and rotates move term/bit positions around without emitting
    /// any new constraint.
    pub fn is_permute(self) -> bool {
        matches!(
            self,
            BitwiseOp::Shl | BitwiseOp::Shr | BitwiseOp::Rotl | BitwiseOp::Rotr
        )
    }
}

/// `EQ -> SAME`, `NEQ -> XOR`: the per-bit logical gate that realises a
/// whole-value equality comparison bitwise.
pub fn eq_to_logical(op: EqualityCmp) -> LogicalOp {
    match op {
        EqualityCmp::Eq => LogicalOp::Same,
        EqualityCmp::Neq => LogicalOp::Xor,
    }
}

/// Plain-value interpreter for `LogicalOp`. For the unary `Cmplmnt`, `x` is
/// ignored (callers pass `y` twice, as the original does).
pub fn eval_logical(op: LogicalOp, x: bool, y: bool) -> bool {
    match op {
        LogicalOp::And => x && y,
        LogicalOp::Or => x || y,
        LogicalOp::Xor => x != y,
        LogicalOp::Same => x == y,
        LogicalOp::Cmplmnt => !y,
    }
}

/// Plain-value interpreter for `ScalarOp`, generic over any value with the
/// ordinary arithmetic operators (native integers, `BigUint`, or a field
/// element).
pub fn eval_scalar<T>(op: ScalarOp, x: T, y: T) -> T
where
    T: Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    match op {
        ScalarOp::Add => x + y,
        ScalarOp::Sub => x - y,
        ScalarOp::Mul => x * y,
    }
}

/// Plain-value interpreter for whole-value equality.
pub fn eval_equality<T: PartialEq>(op: EqualityCmp, x: &T, y: &T) -> bool {
    match op {
        EqualityCmp::Eq => x == y,
        EqualityCmp::Neq => x != y,
    }
}

/// Plain-value interpreter for ordered comparison.
pub fn eval_scalar_cmp<T: PartialOrd + PartialEq>(op: ScalarCmp, x: &T, y: &T) -> bool {
    match op {
        ScalarCmp::Eq => x == y,
        ScalarCmp::Neq => x != y,
        ScalarCmp::Lt => x < y,
        ScalarCmp::Le => x < y || x == y,
        ScalarCmp::Gt => y < x,
        ScalarCmp::Ge => y < x || x == y,
    }
}
