//! Component C9: hash/cipher/tree algorithms built entirely on top of the
//! C8 DSL façade — no module here reaches back into `builder`/`rank1`
//! directly. Each is gated behind its own default-on feature (§4.10),
//! mirroring the teacher's `groth16`/`cuda`/`opencl` feature split.

#[cfg(feature = "sha")]
pub mod sha2;

#[cfg(feature = "aes")]
pub mod aes;

#[cfg(feature = "merkle")]
pub mod merkle;
