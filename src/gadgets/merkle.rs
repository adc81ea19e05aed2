//! Merkle authentication-path gadget (component C9), grounded on
//! `MerkleAuthPath.hpp`'s `updatePath`: ascend from a leaf digest to the
//! root, at each level selecting left/right order by a per-level bit and
//! hashing the concatenation. `MerkleBundle`/`MerkleForest` (batches of
//! many paths/trees) are present in `original_source/` but add no new
//! circuit semantics over the single path, so they are left out (see
//! DESIGN.md).
//!
//! Only SHA-256 and SHA-512 are wired up as the compression function
//! (`MerkleTree_SHA256`/`MerkleTree_SHA512` in `MerkleTree.hpp`); both
//! leave the digest-pair concatenation at exactly one hash block, so the
//! second (padding) block is compile-time constant and built once.

use crate::algebra::boolean::CircuitBool;
use crate::algebra::uint::CircuitWord;
use crate::algebra::ValueSort;
use crate::builder::R1csBuilder;
use crate::dsl::select_words;
use crate::gadgets::sha2::{compress, initial_state, pad_message, ShaVariant};
use ff::PrimeField;

fn padding_block<F: PrimeField>(b: &mut R1csBuilder<F>, variant: ShaVariant) -> Vec<CircuitWord<F>> {
    let word_bytes = variant.word_sort().size_bits() / 8;
    let block_bytes = variant.block_words() * word_bytes;
    let padded = pad_message(variant, &vec![0u8; block_bytes]);
    let pad_bytes = &padded[block_bytes..];
    pad_bytes
        .chunks(word_bytes)
        .map(|chunk| {
            let mut bytes: Vec<CircuitWord<F>> = chunk.iter().map(|&byte| CircuitWord::constant(b, ValueSort::U8, byte as u64)).collect();
            bytes.reverse();
            CircuitWord::join(b, &bytes, variant.word_sort())
        })
        .collect()
}

/// One SHA compression of `left ++ right`, padded as a lone full-length
/// message (`left`/`right` each being one digest's worth of words, so
/// the concatenation is exactly one block; the second, padding-only
/// block is a compile-time constant).
fn hash_pair<F: PrimeField>(
    b: &mut R1csBuilder<F>,
    variant: ShaVariant,
    left: &[CircuitWord<F>],
    right: &[CircuitWord<F>],
) -> Vec<CircuitWord<F>> {
    let mut block = left.to_vec();
    block.extend_from_slice(right);
    assert_eq!(block.len(), variant.block_words(), "digest-pair concatenation must fill exactly one block");

    let pad = padding_block(b, variant);
    let state = initial_state(b, variant);
    let state = compress(b, variant, &state, &block);
    compress(b, variant, &state, &pad)
}

/// `MerkleAuthPath::updatePath`'s per-level ascent: `depth` siblings and
/// selector bits, bottom-up (`siblings[0]`/`child_bits[0]` is the
/// leaf's own level). Returns the reconstructed root digest.
pub fn auth_path_root<F: PrimeField>(
    b: &mut R1csBuilder<F>,
    variant: ShaVariant,
    leaf: &[CircuitWord<F>],
    siblings: &[Vec<CircuitWord<F>>],
    child_bits: &[CircuitBool<F>],
) -> Vec<CircuitWord<F>> {
    assert_eq!(siblings.len(), child_bits.len(), "one selector bit per sibling level");
    let mut dig = leaf.to_vec();
    for (sibling, is_right_child) in siblings.iter().zip(child_bits.iter()) {
        let left = select_words(b, is_right_child, sibling, &dig);
        let right = select_words(b, is_right_child, &dig, sibling);
        dig = hash_pair(b, variant, &left, &right);
    }
    dig
}

/// Witness-side full-tree builder (`MerkleTree.hpp`, built from a
/// complete leaf set rather than the original's incremental
/// leaf-at-a-time streaming — this crate only needs to hand a test a
/// root and the matching per-leaf authentication path, not support
/// online tree growth). Requires a power-of-two leaf count (`isFull`).
pub struct MerkleTreeBuilder<F: PrimeField> {
    variant: ShaVariant,
    levels: Vec<Vec<Vec<CircuitWord<F>>>>,
}

impl<F: PrimeField> MerkleTreeBuilder<F> {
    pub fn build(b: &mut R1csBuilder<F>, variant: ShaVariant, leaves: Vec<Vec<CircuitWord<F>>>) -> Self {
        assert!(leaves.len().is_power_of_two(), "MerkleTreeBuilder requires a full (power-of-two) leaf set");
        let mut levels = vec![leaves];
        while levels.last().unwrap().len() > 1 {
            let prev = levels.last().unwrap();
            let next: Vec<Vec<CircuitWord<F>>> = prev.chunks(2).map(|pair| hash_pair(b, variant, &pair[0], &pair[1])).collect();
            levels.push(next);
        }
        MerkleTreeBuilder { variant, levels }
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn root(&self) -> &[CircuitWord<F>] {
        &self.levels.last().unwrap()[0]
    }

    /// Bottom-up siblings and selector bits for `leaf_index`, to feed
    /// [`auth_path_root`].
    pub fn auth_path(&self, leaf_index: usize) -> (Vec<Vec<CircuitWord<F>>>, Vec<bool>) {
        assert!(leaf_index < self.levels[0].len(), "leaf index out of range");
        let mut idx = leaf_index;
        let mut siblings = Vec::with_capacity(self.depth());
        let mut bits = Vec::with_capacity(self.depth());
        for level in &self.levels[..self.depth()] {
            let is_right_child = idx % 2 == 1;
            let sibling_idx = if is_right_child { idx - 1 } else { idx + 1 };
            siblings.push(level[sibling_idx].clone());
            bits.push(is_right_child);
            idx /= 2;
        }
        (siblings, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Visibility;
    use crate::gadgets::sha2::bless_message;
    use blstrs::Scalar as Fr;

    fn leaf_digest(b: &mut R1csBuilder<Fr>, variant: ShaVariant, tag: u8) -> Vec<CircuitWord<Fr>> {
        let message = [tag; 8];
        let padded = pad_message(variant, &message);
        let words = bless_message(b, variant, &padded, Visibility::Private);
        let state = initial_state(b, variant);
        compress(b, variant, &state, &words)
    }

    #[test]
    fn depth_four_path_reproduces_root() {
        let mut b = R1csBuilder::<Fr>::new();
        let variant = ShaVariant::Sha256;

        let leaves: Vec<Vec<CircuitWord<Fr>>> = (0..16u8).map(|i| leaf_digest(&mut b, variant, i)).collect();
        let tree = MerkleTreeBuilder::build(&mut b, variant, leaves.clone());
        assert_eq!(tree.depth(), 4);

        let leaf_index = 10;
        let (siblings, bits) = tree.auth_path(leaf_index);
        let child_bits: Vec<CircuitBool<Fr>> = bits.iter().map(|&bit| CircuitBool::bless(&mut b, bit, Visibility::Private)).collect();

        let root = auth_path_root(&mut b, variant, &leaves[leaf_index], &siblings, &child_bits);
        let expected: Vec<u32> = tree.root().iter().map(|w| w.value_u64() as u32).collect();
        let got: Vec<u32> = root.iter().map(|w| w.value_u64() as u32).collect();
        assert_eq!(got, expected);
    }
}
