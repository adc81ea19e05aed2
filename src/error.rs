//! Boundary error type.
//!
//! Circuit *construction* has no recoverable failure mode: a malformed
//! expression (wrong arity, an out-of-range shift, reading an unblessed
//! variable) is a programmer error and panics, just as the teacher's own
//! gadgets panic on bad witnesses. `CircuitError` only covers the I/O and
//! (de)serialization boundary named in §7 category 2: turning a built
//! `R1csBuilder` into the stream formats of §6, and reading them back.

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum CircuitError {
    /// The stream ended before the declared length was satisfied.
    #[error("truncated stream: expected {expected} more bytes, found {found}")]
    TruncatedStream { expected: usize, found: usize },

    /// A field element failed to parse from its little-endian encoding
    /// (out of range for the modulus, or wrong byte width).
    #[error("invalid field element encoding")]
    InvalidFieldElement,

    /// A cowitness entry referenced a variable id with no corresponding
    /// public-input slot.
    #[error("cowitness references out-of-range variable id {0}")]
    CowitnessOutOfRange(u64),

    /// Underlying I/O failure while reading/writing a constraint, witness,
    /// or cowitness stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
