//! DSL façade (component C8). The typed per-kind algebras
//! ([`crate::algebra::boolean`], [`crate::algebra::uint`],
//! [`crate::algebra::bigint`]) already carry their own operator-equivalent
//! methods (`and`/`xor`/`eq`/`neq`/`select`/`bless`, one scalar at a time);
//! this module is what's left once those are factored out: structural
//! array equality/inequality, an array-wide `select`, and the
//! `bless(array_of_small, wide_var)` split-decomposition helper named in
//! spec.md §4.8.
//!
//! The original overloads `&`/`|`/`^`/`+`/`-`/`*`/`<<`/`>>`/`==`/`!=`/`<`/
//! `<=` plus a ternary operator; this crate keeps the explicit
//! builder-threaded associated functions already established throughout
//! (`T::op(&mut builder, ...)`) rather than `std::ops` overloads, since
//! every gadget call needs `&mut R1csBuilder<F>` in scope regardless —
//! see DESIGN.md.

use crate::algebra::bigint::CircuitBigInt;
use crate::algebra::boolean::CircuitBool;
use crate::algebra::uint::CircuitWord;
use crate::algebra::{Visibility, ValueSort};
use crate::builder::R1csBuilder;
use ff::PrimeField;

/// Structural array equality over fixed-width words: per-element `EQ`,
/// folded with `safeAND` (spec.md §4.8 "array equality ... recurses
/// structurally").
pub fn words_eq<F: PrimeField>(b: &mut R1csBuilder<F>, xs: &[CircuitWord<F>], ys: &[CircuitWord<F>]) -> CircuitBool<F> {
    assert_eq!(xs.len(), ys.len(), "array equality requires matching lengths");
    assert!(!xs.is_empty(), "array equality requires at least one element");
    let bits: Vec<CircuitBool<F>> = xs.iter().zip(ys.iter()).map(|(x, y)| CircuitWord::eq(b, x, y)).collect();
    CircuitBool::safe_and(b, &bits)
}

pub fn words_neq<F: PrimeField>(b: &mut R1csBuilder<F>, xs: &[CircuitWord<F>], ys: &[CircuitWord<F>]) -> CircuitBool<F> {
    assert_eq!(xs.len(), ys.len(), "array inequality requires matching lengths");
    assert!(!xs.is_empty(), "array inequality requires at least one element");
    let bits: Vec<CircuitBool<F>> = xs.iter().zip(ys.iter()).map(|(x, y)| CircuitWord::neq(b, x, y)).collect();
    CircuitBool::safe_or(b, &bits)
}

pub fn bools_eq<F: PrimeField>(b: &mut R1csBuilder<F>, xs: &[CircuitBool<F>], ys: &[CircuitBool<F>]) -> CircuitBool<F> {
    assert_eq!(xs.len(), ys.len(), "array equality requires matching lengths");
    assert!(!xs.is_empty(), "array equality requires at least one element");
    let bits: Vec<CircuitBool<F>> = xs.iter().zip(ys.iter()).map(|(x, y)| CircuitBool::same(b, x, y)).collect();
    CircuitBool::safe_and(b, &bits)
}

pub fn bools_neq<F: PrimeField>(b: &mut R1csBuilder<F>, xs: &[CircuitBool<F>], ys: &[CircuitBool<F>]) -> CircuitBool<F> {
    assert_eq!(xs.len(), ys.len(), "array inequality requires matching lengths");
    assert!(!xs.is_empty(), "array inequality requires at least one element");
    let bits: Vec<CircuitBool<F>> = xs.iter().zip(ys.iter()).map(|(x, y)| CircuitBool::xor(b, x, y)).collect();
    CircuitBool::safe_or(b, &bits)
}

pub fn bigints_eq<F: PrimeField>(b: &mut R1csBuilder<F>, xs: &[CircuitBigInt<F>], ys: &[CircuitBigInt<F>]) -> CircuitBool<F> {
    assert_eq!(xs.len(), ys.len(), "array equality requires matching lengths");
    assert!(!xs.is_empty(), "array equality requires at least one element");
    let bits: Vec<CircuitBool<F>> = xs.iter().zip(ys.iter()).map(|(x, y)| CircuitBigInt::eq(b, x, y)).collect();
    CircuitBool::safe_and(b, &bits)
}

pub fn bigints_neq<F: PrimeField>(b: &mut R1csBuilder<F>, xs: &[CircuitBigInt<F>], ys: &[CircuitBigInt<F>]) -> CircuitBool<F> {
    assert_eq!(xs.len(), ys.len(), "array inequality requires matching lengths");
    assert!(!xs.is_empty(), "array inequality requires at least one element");
    let bits: Vec<CircuitBool<F>> = xs.iter().zip(ys.iter()).map(|(x, y)| CircuitBigInt::neq(b, x, y)).collect();
    CircuitBool::safe_or(b, &bits)
}

/// Element-wise ternary over two equal-length word arrays.
pub fn select_words<F: PrimeField>(
    b: &mut R1csBuilder<F>,
    cond: &CircuitBool<F>,
    t: &[CircuitWord<F>],
    f: &[CircuitWord<F>],
) -> Vec<CircuitWord<F>> {
    assert_eq!(t.len(), f.len(), "select requires matching array lengths");
    t.iter().zip(f.iter()).map(|(tt, ff)| CircuitWord::select(b, cond, tt, ff)).collect()
}

/// `bless(array, values)`: blesses each element of a fixed-width word
/// array independently.
pub fn bless_words<F: PrimeField>(b: &mut R1csBuilder<F>, sort: ValueSort, values: &[u64], vis: Visibility) -> Vec<CircuitWord<F>> {
    values.iter().map(|&v| CircuitWord::bless(b, sort, v, vis)).collect()
}

/// `bless(array_of_small, wide_var)` (spec.md §4.8): decomposes a wider
/// word into an array of narrower words by partitioning its term and bit
/// vectors, little-endian chunk order. Thin re-export of
/// [`CircuitWord::split_into`] under the name the spec uses.
pub fn split_wide<F: PrimeField>(b: &mut R1csBuilder<F>, wide: &CircuitWord<F>, chunk: ValueSort) -> Vec<CircuitWord<F>> {
    wide.split_into(b, chunk)
}

/// Inverse of [`split_wide`]: re-joins an array of narrower words into one
/// wider one.
pub fn join_narrow<F: PrimeField>(b: &mut R1csBuilder<F>, chunks: &[CircuitWord<F>], target: ValueSort) -> CircuitWord<F> {
    CircuitWord::join(b, chunks, target)
}

/// A 256-entry constant look-up table indexed by a variable byte
/// (`AES_SBox.hpp`'s S-box/inverse-S-box access pattern): `sum_i table[i]
/// . (idx == i)`, built as a chain of `EQ`+ternary `select` rather than a
/// dedicated gate, since nothing below this façade offers one.
pub fn lookup_table<F: PrimeField>(b: &mut R1csBuilder<F>, idx: &CircuitWord<F>, table: &[u8; 256]) -> CircuitWord<F> {
    let sort = idx.sort();
    let mut result = CircuitWord::constant(b, sort, table[0] as u64);
    for (i, &entry) in table.iter().enumerate().skip(1) {
        let key = CircuitWord::constant(b, sort, i as u64);
        let is_i = CircuitWord::eq(b, idx, &key);
        let entry_word = CircuitWord::constant(b, sort, entry as u64);
        result = CircuitWord::select(b, &is_i, &entry_word, &result);
    }
    result
}

pub fn assert_true<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitBool<F>) {
    CircuitBool::assert_true(b, x);
}

pub fn assert_false<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitBool<F>) {
    CircuitBool::assert_false(b, x);
}
