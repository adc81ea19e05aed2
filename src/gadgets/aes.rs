//! AES-128/192/256 cipher gadgets (component C9), grounded on
//! `AES_Cipher.hpp` (encrypt), `AES_InvCipher.hpp` (decrypt), and
//! `AES_KeyExpansion.hpp` (key schedule) — FIPS PUB 197. The state and
//! key schedule are arrays of byte-wide [`CircuitWord`]s throughout;
//! `SubBytes`/`InvSubBytes` go through [`crate::dsl::lookup_table`]
//! rather than reaching into `rank1`/`builder` directly, per the C9
//! boundary in `gadgets/mod.rs`.

use crate::algebra::uint::CircuitWord;
use crate::algebra::ValueSort;
use crate::builder::R1csBuilder;
use crate::dsl::lookup_table;
use ff::PrimeField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// `Nk`: key length in 32-bit words (4/6/8 bytes groups -> 16/24/32 bytes).
    pub fn nk(self) -> usize {
        match self {
            KeySize::Aes128 => 4,
            KeySize::Aes192 => 6,
            KeySize::Aes256 => 8,
        }
    }

    /// `Nr`: number of rounds.
    pub fn nr(self) -> usize {
        match self {
            KeySize::Aes128 => 10,
            KeySize::Aes192 => 12,
            KeySize::Aes256 => 14,
        }
    }

    pub fn key_bytes(self) -> usize {
        self.nk() * 4
    }

    /// Key schedule length in bytes: `16 * (Nr + 1)`.
    pub fn schedule_bytes(self) -> usize {
        16 * (self.nr() + 1)
    }
}

#[rustfmt::skip]
const SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

#[rustfmt::skip]
const INV_SBOX: [u8; 256] = [
    0x52, 0x09, 0x6a, 0xd5, 0x30, 0x36, 0xa5, 0x38, 0xbf, 0x40, 0xa3, 0x9e, 0x81, 0xf3, 0xd7, 0xfb,
    0x7c, 0xe3, 0x39, 0x82, 0x9b, 0x2f, 0xff, 0x87, 0x34, 0x8e, 0x43, 0x44, 0xc4, 0xde, 0xe9, 0xcb,
    0x54, 0x7b, 0x94, 0x32, 0xa6, 0xc2, 0x23, 0x3d, 0xee, 0x4c, 0x95, 0x0b, 0x42, 0xfa, 0xc3, 0x4e,
    0x08, 0x2e, 0xa1, 0x66, 0x28, 0xd9, 0x24, 0xb2, 0x76, 0x5b, 0xa2, 0x49, 0x6d, 0x8b, 0xd1, 0x25,
    0x72, 0xf8, 0xf6, 0x64, 0x86, 0x68, 0x98, 0x16, 0xd4, 0xa4, 0x5c, 0xcc, 0x5d, 0x65, 0xb6, 0x92,
    0x6c, 0x70, 0x48, 0x50, 0xfd, 0xed, 0xb9, 0xda, 0x5e, 0x15, 0x46, 0x57, 0xa7, 0x8d, 0x9d, 0x84,
    0x90, 0xd8, 0xab, 0x00, 0x8c, 0xbc, 0xd3, 0x0a, 0xf7, 0xe4, 0x58, 0x05, 0xb8, 0xb3, 0x45, 0x06,
    0xd0, 0x2c, 0x1e, 0x8f, 0xca, 0x3f, 0x0f, 0x02, 0xc1, 0xaf, 0xbd, 0x03, 0x01, 0x13, 0x8a, 0x6b,
    0x3a, 0x91, 0x11, 0x41, 0x4f, 0x67, 0xdc, 0xea, 0x97, 0xf2, 0xcf, 0xce, 0xf0, 0xb4, 0xe6, 0x73,
    0x96, 0xac, 0x74, 0x22, 0xe7, 0xad, 0x35, 0x85, 0xe2, 0xf9, 0x37, 0xe8, 0x1c, 0x75, 0xdf, 0x6e,
    0x47, 0xf1, 0x1a, 0x71, 0x1d, 0x29, 0xc5, 0x89, 0x6f, 0xb7, 0x62, 0x0e, 0xaa, 0x18, 0xbe, 0x1b,
    0xfc, 0x56, 0x3e, 0x4b, 0xc6, 0xd2, 0x79, 0x20, 0x9a, 0xdb, 0xc0, 0xfe, 0x78, 0xcd, 0x5a, 0xf4,
    0x1f, 0xdd, 0xa8, 0x33, 0x88, 0x07, 0xc7, 0x31, 0xb1, 0x12, 0x10, 0x59, 0x27, 0x80, 0xec, 0x5f,
    0x60, 0x51, 0x7f, 0xa9, 0x19, 0xb5, 0x4a, 0x0d, 0x2d, 0xe5, 0x7a, 0x9f, 0x93, 0xc9, 0x9c, 0xef,
    0xa0, 0xe0, 0x3b, 0x4d, 0xae, 0x2a, 0xf5, 0xb0, 0xc8, 0xeb, 0xbb, 0x3c, 0x83, 0x53, 0x99, 0x61,
    0x17, 0x2b, 0x04, 0x7e, 0xba, 0x77, 0xd6, 0x26, 0xe1, 0x69, 0x14, 0x63, 0x55, 0x21, 0x0c, 0x7d,
];

fn rcon(i: usize) -> u8 {
    match i {
        0..=7 => 1 << i,
        8 => 0x1b,
        9 => 0x36,
        _ => unreachable!("rcon index out of the range this key-schedule ever requests"),
    }
}

fn sbox<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>) -> CircuitWord<F> {
    lookup_table(b, x, &SBOX)
}

fn inv_sbox<F: PrimeField>(b: &mut R1csBuilder<F>, x: &CircuitWord<F>) -> CircuitWord<F> {
    lookup_table(b, x, &INV_SBOX)
}

/// `AES_KeyExpansion::expand` (§5.2): produces the `16 * (Nr + 1)`-byte
/// round-key schedule from a `4 * Nk`-byte cipher key.
pub fn key_expand<F: PrimeField>(b: &mut R1csBuilder<F>, key: &[CircuitWord<F>], size: KeySize) -> Vec<CircuitWord<F>> {
    assert_eq!(key.len(), size.key_bytes());
    let nk = size.nk();
    let total_words = 4 * (size.nr() + 1);

    let mut w: Vec<CircuitWord<F>> = key.to_vec();
    for i in nk..total_words {
        let mut temp: Vec<CircuitWord<F>> = w[4 * (i - 1)..4 * (i - 1) + 4].to_vec();

        if i % nk == 0 {
            let tmp0 = temp[0].clone();
            let rc = CircuitWord::constant(b, ValueSort::U8, rcon(i / nk - 1) as u64);
            let s1 = sbox(b, &temp[1]);
            temp[0] = CircuitWord::xor(b, &s1, &rc);
            temp[1] = sbox(b, &temp[2]);
            temp[2] = sbox(b, &temp[3]);
            temp[3] = sbox(b, &tmp0);
        } else if nk > 6 && i % nk == 4 {
            for t in temp.iter_mut() {
                *t = sbox(b, t);
            }
        }

        for j in 0..4 {
            let prev = w[4 * (i - nk) + j].clone();
            w.push(CircuitWord::xor(b, &prev, &temp[j]));
        }
    }
    w
}

fn add_round_key<F: PrimeField>(b: &mut R1csBuilder<F>, state: &mut [CircuitWord<F>; 16], w: &[CircuitWord<F>], offset: usize) {
    for i in 0..16 {
        state[i] = CircuitWord::xor(b, &state[i], &w[offset + i]);
    }
}

/// `AES_Cipher::ShiftRows` (§5.1.2), state laid out column-major
/// (`state[4*col + row]`).
fn shift_rows<F: PrimeField>(state: &mut [CircuitWord<F>; 16]) {
    let tmp = state[1].clone();
    state[1] = state[5].clone();
    state[5] = state[9].clone();
    state[9] = state[13].clone();
    state[13] = tmp;

    state.swap(2, 10);
    state.swap(6, 14);

    let tmp = state[3].clone();
    state[3] = state[15].clone();
    state[15] = state[11].clone();
    state[11] = state[7].clone();
    state[7] = tmp;
}

/// `AES_InvCipher::InvShiftRows` (§5.3.1): the inverse rotation.
fn inv_shift_rows<F: PrimeField>(state: &mut [CircuitWord<F>; 16]) {
    let tmp = state[13].clone();
    state[13] = state[9].clone();
    state[9] = state[5].clone();
    state[5] = state[1].clone();
    state[1] = tmp;

    state.swap(14, 6);
    state.swap(10, 2);

    let tmp = state[15].clone();
    state[15] = state[3].clone();
    state[3] = state[7].clone();
    state[7] = state[11].clone();
    state[11] = tmp;
}

fn sub_bytes<F: PrimeField>(b: &mut R1csBuilder<F>, state: &mut [CircuitWord<F>; 16]) {
    for s in state.iter_mut() {
        *s = sbox(b, s);
    }
}

fn inv_sub_bytes<F: PrimeField>(b: &mut R1csBuilder<F>, state: &mut [CircuitWord<F>; 16]) {
    for s in state.iter_mut() {
        *s = inv_sbox(b, s);
    }
}

fn xor_all<F: PrimeField>(b: &mut R1csBuilder<F>, words: &[&CircuitWord<F>]) -> CircuitWord<F> {
    let mut acc = words[0].clone();
    for w in &words[1..] {
        acc = CircuitWord::xor(b, &acc, w);
    }
    acc
}

/// `AES_Cipher::MixColumns` (§5.1.3).
fn mix_columns<F: PrimeField>(b: &mut R1csBuilder<F>, state: &mut [CircuitWord<F>; 16]) {
    for i in (0..16).step_by(4) {
        let s0 = state[i].clone();
        let s1 = state[i + 1].clone();
        let s2 = state[i + 2].clone();
        let s3 = state[i + 3].clone();
        let xs0 = s0.xtime(b);
        let xs1 = s1.xtime(b);
        let xs2 = s2.xtime(b);
        let xs3 = s3.xtime(b);

        state[i] = xor_all(b, &[&xs0, &xs1, &s1, &s2, &s3]);
        state[i + 1] = xor_all(b, &[&xs1, &xs2, &s2, &s0, &s3]);
        state[i + 2] = xor_all(b, &[&xs2, &xs3, &s3, &s0, &s1]);
        state[i + 3] = xor_all(b, &[&xs3, &xs0, &s0, &s1, &s2]);
    }
}

/// `AES_InvCipher::InvMixColumns` (§5.3.3).
fn inv_mix_columns<F: PrimeField>(b: &mut R1csBuilder<F>, state: &mut [CircuitWord<F>; 16]) {
    for i in (0..16).step_by(4) {
        let s0 = state[i].clone();
        let s1 = state[i + 1].clone();
        let s2 = state[i + 2].clone();
        let s3 = state[i + 3].clone();

        let xs0 = s0.xtime(b);
        let xxs0 = xs0.xtime(b);
        let xxxs0 = xxs0.xtime(b);

        let xs1 = s1.xtime(b);
        let xxs1 = xs1.xtime(b);
        let xxxs1 = xxs1.xtime(b);

        let xs2 = s2.xtime(b);
        let xxs2 = xs2.xtime(b);
        let xxxs2 = xxs2.xtime(b);

        let xs3 = s3.xtime(b);
        let xxs3 = xs3.xtime(b);
        let xxxs3 = xxs3.xtime(b);

        // sp0 = {0e}*s0 ^ {0b}*s1 ^ {0d}*s2 ^ {09}*s3
        let sp0 = xor_all(b, &[&xs0, &xxs0, &xxxs0, &s1, &xs1, &xxxs1, &s2, &xxs2, &xxxs2, &s3, &xxxs3]);

        // sp1 = {09}*s0 ^ {0e}*s1 ^ {0b}*s2 ^ {0d}*s3
        let sp1 = xor_all(b, &[&s0, &xxxs0, &xs1, &xxs1, &xxxs1, &s2, &xs2, &xxxs2, &s3, &xxs3, &xxxs3]);

        // sp2 = {0d}*s0 ^ {09}*s1 ^ {0e}*s2 ^ {0b}*s3
        let sp2 = xor_all(b, &[&s0, &xxs0, &xxxs0, &s1, &xxxs1, &xs2, &xxs2, &xxxs2, &s3, &xs3, &xxxs3]);

        // sp3 = {0b}*s0 ^ {0d}*s1 ^ {09}*s2 ^ {0e}*s3
        let sp3 = xor_all(b, &[&s0, &xs0, &xxxs0, &s1, &xxs1, &xxxs1, &s2, &xxxs2, &xs3, &xxs3, &xxxs3]);

        state[i] = sp0;
        state[i + 1] = sp1;
        state[i + 2] = sp2;
        state[i + 3] = sp3;
    }
}

fn to_array16<F: PrimeField>(state: &[CircuitWord<F>]) -> [CircuitWord<F>; 16] {
    assert_eq!(state.len(), 16, "AES operates on a 16-byte block");
    let mut out: Vec<CircuitWord<F>> = state.to_vec();
    let mut iter = out.drain(..);
    std::array::from_fn(|_| iter.next().unwrap())
}

/// `AES_Cipher::encrypt` (§5.1).
pub fn encrypt<F: PrimeField>(b: &mut R1csBuilder<F>, block: &[CircuitWord<F>], w: &[CircuitWord<F>], size: KeySize) -> Vec<CircuitWord<F>> {
    assert_eq!(w.len(), size.schedule_bytes());
    let nr = size.nr();
    let mut state = to_array16(block);

    add_round_key(b, &mut state, w, 0);
    for round in 1..nr {
        sub_bytes(b, &mut state);
        shift_rows(&mut state);
        mix_columns(b, &mut state);
        add_round_key(b, &mut state, w, 16 * round);
    }
    sub_bytes(b, &mut state);
    shift_rows(&mut state);
    add_round_key(b, &mut state, w, 16 * nr);

    state.to_vec()
}

/// `AES_InvCipher::decrypt` (§5.3).
pub fn decrypt<F: PrimeField>(b: &mut R1csBuilder<F>, block: &[CircuitWord<F>], w: &[CircuitWord<F>], size: KeySize) -> Vec<CircuitWord<F>> {
    assert_eq!(w.len(), size.schedule_bytes());
    let nr = size.nr();
    let mut state = to_array16(block);

    add_round_key(b, &mut state, w, 16 * nr);
    for round in (1..nr).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(b, &mut state);
        add_round_key(b, &mut state, w, 16 * round);
        inv_mix_columns(b, &mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(b, &mut state);
    add_round_key(b, &mut state, w, 0);

    state.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Visibility;
    use crate::dsl::bless_words;
    use blstrs::Scalar as Fr;

    fn digest_hex<F: PrimeField>(words: &[CircuitWord<F>]) -> String {
        words.iter().map(|w| format!("{:02x}", w.value_u64() as u8)).collect()
    }

    // FIPS 197 Appendix B test vector.
    #[test]
    fn aes128_fips197_vector() {
        let mut b = R1csBuilder::<Fr>::new();
        let key: Vec<u64> = hex_bytes("000102030405060708090a0b0c0d0e0f");
        let plaintext: Vec<u64> = hex_bytes("00112233445566778899aabbccddeeff");

        let key_words = bless_words::<Fr>(&mut b, ValueSort::U8, &key, Visibility::Public);
        let pt_words = bless_words::<Fr>(&mut b, ValueSort::U8, &plaintext, Visibility::Public);

        let w = key_expand(&mut b, &key_words, KeySize::Aes128);
        let ct = encrypt(&mut b, &pt_words, &w, KeySize::Aes128);
        assert_eq!(digest_hex(&ct), "69c4e0d86a7b0430d8cdb78070b4c55a");

        let back = decrypt(&mut b, &ct, &w, KeySize::Aes128);
        assert_eq!(digest_hex(&back), "00112233445566778899aabbccddeeff");
    }

    fn hex_bytes(s: &str) -> Vec<u64> {
        (0..s.len()).step_by(2).map(|i| u64::from_str_radix(&s[i..i + 2], 16).unwrap()).collect()
    }
}
