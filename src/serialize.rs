//! Serialized stream formats (§6): constraint system, witness, and
//! cowitness, as length-prefixed little-endian streams via `byteorder` —
//! the same encoding style the teacher uses for its own proving
//! artefacts. Proving/verification keys and proofs are not produced here
//! (external backend, Non-goal); this module only crosses the boundary
//! named in §7 category 2.
//!
//! Errors here are always [`CircuitError`]: a malformed stream is a
//! caller-facing I/O problem, not a programmer error, unlike everything
//! upstream of this module.

use crate::error::CircuitError;
use crate::lc::{Index, LinearCombination, Variable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use ff::PrimeField;
use std::io::{Read, Write};

fn write_variable<W: Write>(w: &mut W, var: Variable) -> Result<(), CircuitError> {
    match var.get_unchecked() {
        Index::Input(i) => {
            w.write_u8(0)?;
            w.write_u64::<LittleEndian>(i as u64)?;
        }
        Index::Aux(i) => {
            w.write_u8(1)?;
            w.write_u64::<LittleEndian>(i as u64)?;
        }
    }
    Ok(())
}

fn read_variable<R: Read>(r: &mut R) -> Result<Variable, CircuitError> {
    let tag = r.read_u8()?;
    let idx = r.read_u64::<LittleEndian>()? as usize;
    let index = match tag {
        0 => Index::Input(idx),
        1 => Index::Aux(idx),
        _ => return Err(CircuitError::InvalidFieldElement),
    };
    Ok(Variable::new_unchecked(index))
}

fn write_field<F: PrimeField, W: Write>(w: &mut W, v: &F) -> Result<(), CircuitError> {
    w.write_all(v.to_repr().as_ref())?;
    Ok(())
}

fn read_field<F: PrimeField, R: Read>(r: &mut R) -> Result<F, CircuitError> {
    let mut repr = F::Repr::default();
    r.read_exact(repr.as_mut())?;
    Option::from(F::from_repr(repr)).ok_or(CircuitError::InvalidFieldElement)
}

fn write_lc<F: PrimeField, W: Write>(w: &mut W, lc: &LinearCombination<F>) -> Result<(), CircuitError> {
    w.write_u32::<LittleEndian>(lc.len() as u32)?;
    for (var, coeff) in lc.iter() {
        write_variable(w, var)?;
        write_field(w, coeff)?;
    }
    Ok(())
}

fn read_lc<F: PrimeField, R: Read>(r: &mut R) -> Result<LinearCombination<F>, CircuitError> {
    let count = r.read_u32::<LittleEndian>()? as usize;
    let mut lc = LinearCombination::zero();
    for _ in 0..count {
        let var = read_variable(r)?;
        let coeff = read_field::<F, _>(r)?;
        lc = lc + (coeff, var);
    }
    Ok(lc)
}

type Constraint<F> = (LinearCombination<F>, LinearCombination<F>, LinearCombination<F>);

/// Writes the constraint system, split into chunks of at most
/// `max_per_file` constraints each, mirroring `writeFiles(prefix,
/// maxPerFile)` (§6: "cut into fixed-size files with a suffix numerical
/// index"). The caller is responsible for choosing file names for the
/// returned byte buffers (e.g. `{prefix}_{i:06}.bin`); this module only
/// produces and parses the bytes.
pub fn write_constraints_chunked<F: PrimeField>(constraints: &[Constraint<F>], max_per_file: usize) -> Result<Vec<Vec<u8>>, CircuitError> {
    assert!(max_per_file > 0, "max_per_file must be positive");
    let mut files = Vec::new();
    for chunk in constraints.chunks(max_per_file) {
        let mut buf = Vec::new();
        buf.write_u64::<LittleEndian>(chunk.len() as u64)?;
        for (a, b, c) in chunk {
            write_lc(&mut buf, a)?;
            write_lc(&mut buf, b)?;
            write_lc(&mut buf, c)?;
        }
        files.push(buf);
    }
    Ok(files)
}

pub fn read_constraints_chunk<F: PrimeField>(bytes: &[u8]) -> Result<Vec<Constraint<F>>, CircuitError> {
    let mut r = bytes;
    let count = r.read_u64::<LittleEndian>()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let a = read_lc::<F, _>(&mut r)?;
        let b = read_lc::<F, _>(&mut r)?;
        let c = read_lc::<F, _>(&mut r)?;
        out.push((a, b, c));
    }
    Ok(out)
}

/// Writes the full witness (every variable's field value, public and
/// auxiliary, in allocation order) as a length-prefixed vector.
pub fn write_witness<F: PrimeField, W: Write>(w: &mut W, input_witness: &[F], aux_witness: &[F]) -> Result<(), CircuitError> {
    w.write_u64::<LittleEndian>((input_witness.len() + aux_witness.len()) as u64)?;
    for v in input_witness.iter().chain(aux_witness.iter()) {
        write_field(w, v)?;
    }
    Ok(())
}

pub fn read_witness<F: PrimeField, R: Read>(r: &mut R) -> Result<Vec<F>, CircuitError> {
    let count = r.read_u64::<LittleEndian>()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_field::<F, _>(r)?);
    }
    Ok(out)
}

/// Writes the cowitness: the public-input witness prefix plus the
/// auxiliary decimal-string vector for `BigInt` public inputs, keyed by
/// variable id (`witnessTerms`, §4.7/§6).
pub fn write_cowitness<F: PrimeField, W: Write>(w: &mut W, input_witness: &[F], cowitness: &[(u64, String)]) -> Result<(), CircuitError> {
    w.write_u64::<LittleEndian>(input_witness.len() as u64)?;
    for v in input_witness {
        write_field(w, v)?;
    }
    w.write_u64::<LittleEndian>(cowitness.len() as u64)?;
    for (id, decimal) in cowitness {
        w.write_u64::<LittleEndian>(*id)?;
        let bytes = decimal.as_bytes();
        w.write_u32::<LittleEndian>(bytes.len() as u32)?;
        w.write_all(bytes)?;
    }
    Ok(())
}

pub fn read_cowitness<F: PrimeField, R: Read>(r: &mut R) -> Result<(Vec<F>, Vec<(u64, String)>), CircuitError> {
    let input_count = r.read_u64::<LittleEndian>()? as usize;
    let mut input_witness = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        input_witness.push(read_field::<F, _>(r)?);
    }

    let cowitness_count = r.read_u64::<LittleEndian>()? as usize;
    let mut cowitness = Vec::with_capacity(cowitness_count);
    for _ in 0..cowitness_count {
        let id = r.read_u64::<LittleEndian>()?;
        let len = r.read_u32::<LittleEndian>()? as usize;
        let mut bytes = vec![0u8; len];
        r.read_exact(&mut bytes)?;
        let decimal = String::from_utf8(bytes).map_err(|_| CircuitError::InvalidFieldElement)?;
        if (id as usize) >= input_count {
            return Err(CircuitError::CowitnessOutOfRange(id));
        }
        cowitness.push((id, decimal));
    }
    Ok((input_witness, cowitness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blstrs::Scalar as Fr;
    use ff::Field;

    #[test]
    fn witness_round_trips() {
        let input_witness = vec![Fr::one(), Fr::one() + Fr::one()];
        let aux_witness = vec![Fr::zero()];
        let mut buf = Vec::new();
        write_witness(&mut buf, &input_witness, &aux_witness).unwrap();
        let read_back = read_witness::<Fr, _>(&mut &buf[..]).unwrap();
        assert_eq!(read_back.len(), 3);
        assert_eq!(read_back[0], Fr::one());
    }

    #[test]
    fn cowitness_round_trips() {
        let input_witness = vec![Fr::one(), Fr::one() + Fr::one()];
        let cowitness = vec![(1u64, "170141183460469231731687303715884105727".to_string())];
        let mut buf = Vec::new();
        write_cowitness(&mut buf, &input_witness, &cowitness).unwrap();
        let (read_input, read_cowitness) = read_cowitness::<Fr, _>(&mut &buf[..]).unwrap();
        assert_eq!(read_input.len(), 2);
        assert_eq!(read_cowitness, cowitness);
    }

    #[test]
    fn truncated_witness_stream_errors() {
        let mut buf = Vec::new();
        buf.write_u64::<LittleEndian>(5).unwrap();
        let err = read_witness::<Fr, _>(&mut &buf[..]).unwrap_err();
        assert!(matches!(err, CircuitError::Io(_)));
    }
}
