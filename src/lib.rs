//! `rank1dsl` is an embedded DSL for building rank-1 constraint systems
//! (R1CS) and their witnesses. It provides a small algebra of typed
//! circuit values — booleans, fixed-width words, and wide integers — each
//! backed by a [`builder::R1csBuilder`] that accumulates the `A·B=C`
//! constraints and the witness assignment as the caller builds up an
//! expression.
//!
//! # Example
//!
//! Bless two public 32-bit words and constrain their XOR to equal a third:
//!
//! ```
//! use rank1dsl::algebra::uint::CircuitWord;
//! use rank1dsl::algebra::{ValueSort, Visibility};
//! use rank1dsl::builder::R1csBuilder;
//! use rank1dsl::dsl;
//! use blstrs::Scalar as Fr;
//!
//! let mut b = R1csBuilder::<Fr>::new();
//! let x = CircuitWord::bless(&mut b, ValueSort::U32, 0xdead_beef, Visibility::Public);
//! let y = CircuitWord::bless(&mut b, ValueSort::U32, 0x0ba5_eba1, Visibility::Public);
//! let z = CircuitWord::xor(&mut b, &x, &y);
//! let expected = CircuitWord::bless(&mut b, ValueSort::U32, 0xdead_beef ^ 0x0ba5_eba1, Visibility::Public);
//! let eq = CircuitWord::eq(&mut b, &z, &expected);
//! dsl::assert_true(&mut b, &eq);
//! ```
//!
//! This crate only depends on [`ff::PrimeField`], not on a pairing/curve
//! bound: proving keys, verification keys, proofs, and the pairing backend
//! itself are someone else's problem (see `DESIGN.md`). What lives here is
//! the constraint-building layer: the typed façades, the constraint
//! accumulator, and a handful of hash/cipher/tree gadgets built purely in
//! terms of that façade.

pub mod algebra;
pub mod audit;
pub mod builder;
pub mod dsl;
pub mod error;
pub mod field;
pub mod gadgets;
pub mod lc;
pub mod ops;
pub mod rank1;
pub mod serialize;

pub use builder::R1csBuilder;
pub use error::CircuitError;
pub use lc::{Index, LinearCombination, Variable};
