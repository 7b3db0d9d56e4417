//! Word permutation: the critical null for "structure beyond word boundaries".

use std::ops::Range;

use rand::seq::SliceRandom;

use super::{NullInfo, NullModel, NullParams, WORD_PERM, rng_for};
use crate::bits::Bitstring;

static WORD_PERM_INFO: NullInfo = NullInfo {
    name: WORD_PERM,
    description: "Keep each word's bits intact and shuffle word order",
    preserves: "Words intact, within-word structure",
    destroys: "Word order, cross-word patterns",
    needs_words: true,
    conserves_density: true,
};

/// Shuffles the order of word sub-bitstrings. Bits between words (encoded
/// separators, if the encoding emits any) stay where they are; word slots are
/// refilled in permuted order.
///
/// `words` must be sorted, non-overlapping and inside `bits`. Zero or one word
/// leaves the input unchanged.
pub struct WordPermutation;

impl NullModel for WordPermutation {
    fn info(&self) -> &NullInfo {
        &WORD_PERM_INFO
    }

    fn generate(
        &self,
        bits: &Bitstring,
        words: &[Range<usize>],
        seed: u64,
        _params: &NullParams,
    ) -> Bitstring {
        if words.len() < 2 {
            return bits.clone();
        }
        let mut order: Vec<usize> = (0..words.len()).collect();
        order.shuffle(&mut rng_for(seed));

        let src = bits.as_slice();
        let mut out = Vec::with_capacity(src.len());
        let mut cursor = 0;
        for (slot, &pick) in words.iter().zip(&order) {
            out.extend_from_slice(&src[cursor..slot.start]);
            out.extend_from_slice(&src[words[pick].clone()]);
            cursor = slot.end;
        }
        out.extend_from_slice(&src[cursor..]);
        Bitstring::from_bits(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_is_noop() {
        let bits = Bitstring::parse("101100").unwrap();
        let out = WordPermutation.generate(&bits, &[0..6], 3, &NullParams::default());
        assert_eq!(out, bits);
        let out = WordPermutation.generate(&bits, &[], 3, &NullParams::default());
        assert_eq!(out, bits);
    }

    #[test]
    fn identical_words_unchanged() {
        let bits = Bitstring::parse("101010101010").unwrap();
        for seed in 0..10 {
            let out = WordPermutation.generate(&bits, &[0..6, 6..12], seed, &NullParams::default());
            assert_eq!(out, bits);
        }
    }

    #[test]
    fn gaps_stay_in_place() {
        // words "111" and "0", separator bit "0" between them, trailing "1".
        let bits = Bitstring::parse("111001").unwrap();
        let words = [0..3, 4..5];
        let mut seen_swapped = false;
        for seed in 0..32 {
            let out = WordPermutation
                .generate(&bits, &words, seed, &NullParams::default())
                .to_string();
            assert!(out == "111001" || out == "001111", "{out}");
            seen_swapped |= out == "001111";
        }
        assert!(seen_swapped);
    }
}
