//! SHA-family compression gadgets (component C9), grounded on
//! `SecureHashStd.hpp` (the shared message-schedule/compression skeleton
//! all seven variants share), `SHA_1.hpp` (the distinct 80-round,
//! XOR-rotate schedule and `Ch`/`Parity`/`Maj` round function), and
//! `SHA_256.hpp`/`SHA_512.hpp` (the `Ch`/`Maj`/`SIGMA`/`sigma` round
//! function shared by the 32-bit and 64-bit families, differing only in
//! rotation amounts, round constants, and word width).
//!
//! Every word operation here goes through [`CircuitWord`]'s public API
//! (`xor`/`and`/`not`/`addmod`/`rotr`/`rotl`/`shr`) — this module never
//! reaches back into `rank1`/`builder` directly, per the C9 boundary
//! documented in `gadgets/mod.rs`.

use crate::algebra::uint::CircuitWord;
use crate::algebra::{ValueSort, Visibility};
use crate::builder::R1csBuilder;
use ff::PrimeField;

/// Which FIPS 180-4 member to run. Determines word width, round count,
/// initial hash value, round constant table, and digest truncation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaVariant {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl ShaVariant {
    pub fn word_sort(self) -> ValueSort {
        match self {
            ShaVariant::Sha1 | ShaVariant::Sha224 | ShaVariant::Sha256 => ValueSort::U32,
            _ => ValueSort::U64,
        }
    }

    /// Message block size in words of `word_sort()` (always 16, per §5.1
    /// of FIPS 180-4 for every variant implemented here).
    pub fn block_words(self) -> usize {
        16
    }

    fn state_words(self) -> usize {
        if self == ShaVariant::Sha1 {
            5
        } else {
            8
        }
    }

    fn rounds(self) -> usize {
        match self.word_sort() {
            ValueSort::U32 => 64,
            _ => 80,
        }
    }

    /// Output length in bits (§4.2.2/§4.2.3 truncated variants included).
    fn digest_bits(self) -> usize {
        match self {
            ShaVariant::Sha1 => 160,
            ShaVariant::Sha224 => 224,
            ShaVariant::Sha256 => 256,
            ShaVariant::Sha384 => 384,
            ShaVariant::Sha512 => 512,
            ShaVariant::Sha512_224 => 224,
            ShaVariant::Sha512_256 => 256,
        }
    }

    fn iv(self) -> Vec<u64> {
        match self {
            ShaVariant::Sha1 => vec![0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0],
            ShaVariant::Sha224 => vec![
                0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
            ],
            ShaVariant::Sha256 => vec![
                0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
            ],
            ShaVariant::Sha384 => vec![
                0xcbbb9d5dc1059ed8,
                0x629a292a367cd507,
                0x9159015a3070dd17,
                0x152fecd8f70e5939,
                0x67332667ffc00b31,
                0x8eb44a8768581511,
                0xdb0c2e0d64f98fa7,
                0x47b5481dbefa4fa4,
            ],
            ShaVariant::Sha512 => vec![
                0x6a09e667f3bcc908,
                0xbb67ae8584caa73b,
                0x3c6ef372fe94f82b,
                0xa54ff53a5f1d36f1,
                0x510e527fade682d1,
                0x9b05688c2b3e6c1f,
                0x1f83d9abfb41bd6b,
                0x5be0cd19137e2179,
            ],
            ShaVariant::Sha512_224 => vec![
                0x8C3D37C819544DA2,
                0x73E1996689DCD4D6,
                0x1DFAB7AE32FF9C82,
                0x679DD514582F9FCF,
                0x0F6D2B697BD44DA8,
                0x77E36F7304C48942,
                0x3F9D85A86A1D36C8,
                0x1112E6AD91D692A1,
            ],
            ShaVariant::Sha512_256 => vec![
                0x22312194FC2BF72C,
                0x9F555FA3C84C64C2,
                0x2393B86B6F53B151,
                0x963877195940EABD,
                0x96283EE2A88EFFE3,
                0xBE5E1E2553863992,
                0x2B0199FC2C85B8AA,
                0x0EB72DDC81C52CA2,
            ],
        }
    }
}

const K256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5, 0xd807aa98,
    0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174, 0xe49b69c1, 0xefbe4786,
    0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da, 0x983e5152, 0xa831c66d, 0xb00327c8,
    0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967, 0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
    0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85, 0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819,
    0xd6990624, 0xf40e3585, 0x106aa070, 0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a,
    0x5b9cca4f, 0x682e6ff3, 0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7,
    0xc67178f2,
];

const K512: [u64; 80] = [
    0x428a2f98d728ae22,
    0x7137449123ef65cd,
    0xb5c0fbcfec4d3b2f,
    0xe9b5dba58189dbbc,
    0x3956c25bf348b538,
    0x59f111f1b605d019,
    0x923f82a4af194f9b,
    0xab1c5ed5da6d8118,
    0xd807aa98a3030242,
    0x12835b0145706fbe,
    0x243185be4ee4b28c,
    0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f,
    0x80deb1fe3b1696b1,
    0x9bdc06a725c71235,
    0xc19bf174cf692694,
    0xe49b69c19ef14ad2,
    0xefbe4786384f25e3,
    0x0fc19dc68b8cd5b5,
    0x240ca1cc77ac9c65,
    0x2de92c6f592b0275,
    0x4a7484aa6ea6e483,
    0x5cb0a9dcbd41fbd4,
    0x76f988da831153b5,
    0x983e5152ee66dfab,
    0xa831c66d2db43210,
    0xb00327c898fb213f,
    0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2,
    0xd5a79147930aa725,
    0x06ca6351e003826f,
    0x142929670a0e6e70,
    0x27b70a8546d22ffc,
    0x2e1b21385c26c926,
    0x4d2c6dfc5ac42aed,
    0x53380d139d95b3df,
    0x650a73548baf63de,
    0x766a0abb3c77b2a8,
    0x81c2c92e47edaee6,
    0x92722c851482353b,
    0xa2bfe8a14cf10364,
    0xa81a664bbc423001,
    0xc24b8b70d0f89791,
    0xc76c51a30654be30,
    0xd192e819d6ef5218,
    0xd69906245565a910,
    0xf40e35855771202a,
    0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8,
    0x1e376c085141ab53,
    0x2748774cdf8eeb99,
    0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63,
    0x4ed8aa4ae3418acb,
    0x5b9cca4f7763e373,
    0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc,
    0x78a5636f43172f60,
    0x84c87814a1f0ab72,
    0x8cc702081a6439ec,
    0x90befffa23631e28,
    0xa4506cebde82bde9,
    0xbef9a3f7b2c67915,
    0xc67178f2e372532b,
    0xca273eceea26619c,
    0xd186b8c721c0c207,
    0xeada7dd6cde0eb1e,
    0xf57d4f7fee6ed178,
    0x06f067aa72176fba,
    0x0a637dc5a2c898a6,
    0x113f9804bef90dae,
    0x1b710b35131c471b,
    0x28db77f523047d84,
    0x32caab7b40c72493,
    0x3c9ebe0a15c9bebc,
    0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6,
    0x597f299cfc657e2a,
    0x5fcb6fab3ad6faec,
    0x6c44198c4a475817,
];

/// Round constants for SHA-1, one per 20-round range (`SHA_1.hpp`).
const K_SHA1: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

/// `ADDMOD` followed immediately by `mod_width`: every sum used again as
/// an operand of a further `ADDMOD` must be re-canonicalized first, since
/// `ADDMOD`'s plain-value arithmetic reads the canonical (already
/// truncated) operand value, not the raw overflow-carrying term vector.
/// Chaining several additions without this step (as the per-round `T1`
/// accumulation below does) would desynchronize the witness from the
/// constraint.
fn addmod_trunc<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>, y: &CircuitWord<F>) -> CircuitWord<F> {
    CircuitWord::addmod(b, x, y).mod_width(b)
}

fn addmod3<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>, y: &CircuitWord<F>, z: &CircuitWord<F>) -> CircuitWord<F> {
    let xy = addmod_trunc(b, x, y);
    addmod_trunc(b, &xy, z)
}

fn ch<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>, y: &CircuitWord<F>, z: &CircuitWord<F>) -> CircuitWord<F> {
    let xy = CircuitWord::and(b, x, y);
    let not_x = CircuitWord::not(b, x);
    let nxz = CircuitWord::and(b, &not_x, z);
    CircuitWord::xor(b, &xy, &nxz)
}

fn maj<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>, y: &CircuitWord<F>, z: &CircuitWord<F>) -> CircuitWord<F> {
    let xy = CircuitWord::and(b, x, y);
    let xz = CircuitWord::and(b, x, z);
    let yz = CircuitWord::and(b, y, z);
    let t = CircuitWord::xor(b, &xy, &xz);
    CircuitWord::xor(b, &t, &yz)
}

fn parity<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>, y: &CircuitWord<F>, z: &CircuitWord<F>) -> CircuitWord<F> {
    let t = CircuitWord::xor(b, x, y);
    CircuitWord::xor(b, &t, z)
}

fn big_sigma<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>, r0: usize, r1: usize, r2: usize) -> CircuitWord<F> {
    let a = x.rotr(b, r0);
    let c = x.rotr(b, r1);
    let d = x.rotr(b, r2);
    let t = CircuitWord::xor(b, &a, &c);
    CircuitWord::xor(b, &t, &d)
}

fn small_sigma<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>, r0: usize, r1: usize, shr: usize) -> CircuitWord<F> {
    let a = x.rotr(b, r0);
    let c = x.rotr(b, r1);
    let d = x.shr(b, shr);
    let t = CircuitWord::xor(b, &a, &c);
    CircuitWord::xor(b, &t, &d)
}

/// Rotation amounts for the `Ch`/`Maj` message schedule/compression
/// shared by the 32-bit and 64-bit families (`SecureHashStd.hpp`'s
/// `SHA_Functions`): `(big_sigma0, big_sigma1, small_sigma0, small_sigma1)`.
struct ChMajRotations {
    big0: (usize, usize, usize),
    big1: (usize, usize, usize),
    small0: (usize, usize, usize),
    small1: (usize, usize, usize),
}

const ROT_256: ChMajRotations = ChMajRotations {
    big0: (2, 13, 22),
    big1: (6, 11, 25),
    small0: (7, 18, 3),
    small1: (17, 19, 10),
};

const ROT_512: ChMajRotations = ChMajRotations {
    big0: (28, 34, 39),
    big1: (14, 18, 41),
    small0: (1, 8, 7),
    small1: (19, 61, 6),
};

fn message_schedule_chmaj<F: PrimeField>(
    b: &mut R1csBuilder<F>,
    block: &[CircuitWord<F>],
    rounds: usize,
    rot: &ChMajRotations,
) -> Vec<CircuitWord<F>> {
    let mut w: Vec<CircuitWord<F>> = block.to_vec();
    for t in 16..rounds {
        let s0 = small_sigma(b, &w[t - 15], rot.small0.0, rot.small0.1, rot.small0.2);
        let s1 = small_sigma(b, &w[t - 2], rot.small1.0, rot.small1.1, rot.small1.2);
        let sum = addmod3(b, &s1, &w[t - 7], &s0);
        let wt = addmod_trunc(b, &sum, &w[t - 16]);
        w.push(wt);
    }
    w
}

fn message_schedule_sha1<F: PrimeField>(b: &mut R1csBuilder<F>, block: &[CircuitWord<F>]) -> Vec<CircuitWord<F>> {
    let mut w: Vec<CircuitWord<F>> = block.to_vec();
    for t in 16..80 {
        let x1 = CircuitWord::xor(b, &w[t - 3], &w[t - 8]);
        let x2 = CircuitWord::xor(b, &x1, &w[t - 14]);
        let x3 = CircuitWord::xor(b, &x2, &w[t - 16]);
        w.push(x3.rotl(b, 1));
    }
    w
}

fn compress_chmaj<F: PrimeField>(
    b: &mut R1csBuilder<F>,
    variant: ShaVariant,
    state: &[CircuitWord<F>],
    block: &[CircuitWord<F>],
) -> Vec<CircuitWord<F>> {
    let sort = variant.word_sort();
    let rot = if sort == ValueSort::U32 { &ROT_256 } else { &ROT_512 };
    let rounds = variant.rounds();
    let w = message_schedule_chmaj(b, block, rounds, rot);

    let mut a = state[0].clone();
    let mut bb = state[1].clone();
    let mut c = state[2].clone();
    let mut d = state[3].clone();
    let mut e = state[4].clone();
    let mut f = state[5].clone();
    let mut g = state[6].clone();
    let mut h = state[7].clone();

    for t in 0..rounds {
        let sigma1 = big_sigma(b, &e, rot.big1.0, rot.big1.1, rot.big1.2);
        let ch_v = ch(b, &e, &f, &g);
        let k = CircuitWord::constant(b, sort, if sort == ValueSort::U32 { K256[t] as u64 } else { K512[t] });
        let t1_partial = addmod3(b, &h, &sigma1, &ch_v);
        let t1_partial2 = addmod_trunc(b, &t1_partial, &k);
        let t1 = addmod_trunc(b, &t1_partial2, &w[t]);

        let sigma0 = big_sigma(b, &a, rot.big0.0, rot.big0.1, rot.big0.2);
        let maj_v = maj(b, &a, &bb, &c);
        let t2 = addmod_trunc(b, &sigma0, &maj_v);

        h = g;
        g = f;
        f = e;
        e = addmod_trunc(b, &d, &t1);
        d = c;
        c = bb;
        bb = a;
        a = addmod_trunc(b, &t1, &t2);
    }

    let out = [a, bb, c, d, e, f, g, h];
    state.iter().zip(out.iter()).map(|(s0, v)| addmod_trunc(b, s0, v)).collect()
}

fn compress_sha1<F: PrimeField>(b: &mut R1csBuilder<F>, state: &[CircuitWord<F>], block: &[CircuitWord<F>]) -> Vec<CircuitWord<F>> {
    let sort = ValueSort::U32;
    let w = message_schedule_sha1(b, block);

    let mut a = state[0].clone();
    let mut bb = state[1].clone();
    let mut c = state[2].clone();
    let mut d = state[3].clone();
    let mut e = state[4].clone();

    for t in 0..80 {
        let (f, k) = if t < 20 {
            (ch(b, &bb, &c, &d), K_SHA1[0])
        } else if t < 40 {
            (parity(b, &bb, &c, &d), K_SHA1[1])
        } else if t < 60 {
            (maj(b, &bb, &c, &d), K_SHA1[2])
        } else {
            (parity(b, &bb, &c, &d), K_SHA1[3])
        };
        let kw = CircuitWord::constant(b, sort, k as u64);
        let rot5 = a.rotl(b, 5);
        let temp_partial = addmod3(b, &rot5, &f, &e);
        let temp_partial2 = addmod_trunc(b, &temp_partial, &kw);
        let temp = addmod_trunc(b, &temp_partial2, &w[t]);

        e = d;
        d = c;
        c = bb.rotl(b, 30);
        bb = a;
        a = temp;
    }

    let out = [a, bb, c, d, e];
    state.iter().zip(out.iter()).map(|(s0, v)| addmod_trunc(b, s0, v)).collect()
}

/// One compression step over a single message block (already in the
/// variant's word sort, big-endian word order), advancing `state`.
/// Mirrors `computeHash`'s per-block loop body in `SecureHashStd.hpp`.
pub fn compress<F: PrimeField>(
    b: &mut R1csBuilder<F>,
    variant: ShaVariant,
    state: &[CircuitWord<F>],
    block: &[CircuitWord<F>],
) -> Vec<CircuitWord<F>> {
    assert_eq!(state.len(), variant.state_words());
    assert_eq!(block.len(), variant.block_words());
    if variant == ShaVariant::Sha1 {
        compress_sha1(b, state, block)
    } else {
        compress_chmaj(b, variant, state, block)
    }
}

/// Blesses `variant`'s initial hash value as circuit constants (no
/// variable, no constraint — invariant I5).
pub fn initial_state<F: PrimeField>(b: &mut R1csBuilder<F>, variant: ShaVariant) -> Vec<CircuitWord<F>> {
    variant.iv().iter().map(|&v| CircuitWord::constant(b, variant.word_sort(), v)).collect()
}

/// Drops words/bits past `variant.digest_bits()` (§4.2.2/§4.2.3's
/// truncated variants all cut at a word boundary except SHA-512/224,
/// which keeps the upper half of its fourth state word).
fn truncate_digest<F: PrimeField>(b: &mut R1csBuilder<F>, variant: ShaVariant, state: &[CircuitWord<F>]) -> Vec<CircuitWord<F>> {
    let width = variant.word_sort().size_bits();
    let bits = variant.digest_bits();
    let full = bits / width;
    let rem = bits % width;
    let mut out: Vec<CircuitWord<F>> = state[..full].to_vec();
    if rem > 0 {
        assert_eq!(width, 64, "only the 64-bit family truncates mid-word");
        assert_eq!(rem, 32, "SHA-512/224 is the only supported mid-word truncation");
        let halves = state[full].split_into(b, ValueSort::U32);
        out.push(halves[1].clone());
    }
    out
}

/// FIPS 180-4 `padMessage`: append `0x80`, zero-pad to `block_bytes -
/// length_field_bytes` (mod `block_bytes`), then the big-endian bit
/// length in `length_field_bytes` bytes (8 for the 32-bit family, 16 for
/// the 64-bit family). Plain-value, run before blessing: padding is
/// public structure, not circuit logic.
pub fn pad_message(variant: ShaVariant, message: &[u8]) -> Vec<u8> {
    let block_bytes = variant.block_words() * (variant.word_sort().size_bits() / 8);
    let length_field_bytes = if variant.word_sort() == ValueSort::U32 { 8 } else { 16 };

    let mut padded = message.to_vec();
    padded.push(0x80);
    while padded.len() % block_bytes != block_bytes - length_field_bytes {
        padded.push(0);
    }
    let bit_len = (message.len() as u128) * 8;
    let len_bytes = bit_len.to_be_bytes();
    padded.extend_from_slice(&len_bytes[16 - length_field_bytes..]);
    padded
}

/// Blesses a (already padded) byte message as an array of `variant`'s
/// native word sort, big-endian byte order within each word (bit 0 of
/// the circuit's little-endian term vector is the low bit of the last
/// byte in program order, matching `SecureHashStd.hpp`'s `W[i]` packing).
pub fn bless_message<F: PrimeField>(b: &mut R1csBuilder<F>, variant: ShaVariant, message: &[u8], vis: Visibility) -> Vec<CircuitWord<F>> {
    let word_bytes = variant.word_sort().size_bits() / 8;
    assert_eq!(message.len() % word_bytes, 0, "message must already be block-padded");
    message
        .chunks(word_bytes)
        .map(|chunk| {
            let mut bytes: Vec<CircuitWord<F>> = chunk.iter().map(|&byte| CircuitWord::bless(b, ValueSort::U8, byte as u64, vis)).collect();
            bytes.reverse();
            CircuitWord::join(b, &bytes, variant.word_sort())
        })
        .collect()
}

/// Runs the full padded-message hash: one `compress` per block, starting
/// from `variant`'s initial hash value, returning the (possibly
/// word-truncated) digest.
pub fn hash<F: PrimeField>(b: &mut R1csBuilder<F>, variant: ShaVariant, padded_message_words: &[CircuitWord<F>]) -> Vec<CircuitWord<F>> {
    let block_words = variant.block_words();
    assert_eq!(padded_message_words.len() % block_words, 0, "message must be a whole number of blocks");
    let mut state = initial_state(b, variant);
    for block in padded_message_words.chunks(block_words) {
        state = compress(b, variant, &state, block);
    }
    truncate_digest(b, variant, &state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blstrs::Scalar as Fr;

    fn digest_hex<F: PrimeField>(words: &[CircuitWord<F>]) -> String {
        words
            .iter()
            .map(|w| match w.sort() {
                ValueSort::U32 => format!("{:08x}", w.value_u64() as u32),
                ValueSort::U64 => format!("{:016x}", w.value_u64()),
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn sha256_abc() {
        let mut b = R1csBuilder::<Fr>::new();
        let padded = pad_message(ShaVariant::Sha256, b"abc");
        let words = bless_message(&mut b, ShaVariant::Sha256, &padded, Visibility::Public);
        let digest = hash(&mut b, ShaVariant::Sha256, &words);
        assert_eq!(digest_hex(&digest), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn sha1_abc() {
        let mut b = R1csBuilder::<Fr>::new();
        let padded = pad_message(ShaVariant::Sha1, b"abc");
        let words = bless_message(&mut b, ShaVariant::Sha1, &padded, Visibility::Public);
        let digest = hash(&mut b, ShaVariant::Sha1, &words);
        assert_eq!(digest_hex(&digest), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn sha512_abc() {
        let mut b = R1csBuilder::<Fr>::new();
        let padded = pad_message(ShaVariant::Sha512, b"abc");
        let words = bless_message(&mut b, ShaVariant::Sha512, &padded, Visibility::Public);
        let digest = hash(&mut b, ShaVariant::Sha512, &words);
        assert_eq!(
            digest_hex(&digest),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn sha512_224_abc_is_truncated() {
        let mut b = R1csBuilder::<Fr>::new();
        let padded = pad_message(ShaVariant::Sha512_224, b"abc");
        let words = bless_message(&mut b, ShaVariant::Sha512_224, &padded, Visibility::Public);
        let digest = hash(&mut b, ShaVariant::Sha512_224, &words);
        assert_eq!(digest.len(), 4);
        assert_eq!(digest[3].sort(), ValueSort::U32);
    }
}
