//! First-order Markov surrogate.
//!
//! Estimates `P(1 | previous bit)` from the input and samples a fresh chain of
//! the same length starting from the same first bit. Structure beyond one bit
//! of memory is destroyed; the transition probabilities are preserved in
//! expectation. The number of ones is *not* preserved exactly, so this null
//! declares `conserves_density = false`.

use std::ops::Range;

use rand::Rng;

use super::{MARKOV, NullInfo, NullModel, NullParams, rng_for};
use crate::bits::Bitstring;

static MARKOV_INFO: NullInfo = NullInfo {
    name: MARKOV,
    description: "Resample from the first-order transition probabilities of the input",
    preserves: "1-rate and transition probabilities P(bit | previous)",
    destroys: "Higher-order structure",
    needs_words: false,
    conserves_density: false,
};

pub struct MarkovSurrogate;

/// `P(next = 1 | prev = 0)` and `P(next = 1 | prev = 1)`. A state that never
/// occurs as a predecessor gets 0.5.
pub fn transition_probabilities(bits: &[u8]) -> [f64; 2] {
    let mut counts = [[0usize; 2]; 2];
    for pair in bits.windows(2) {
        counts[pair[0] as usize][pair[1] as usize] += 1;
    }
    counts.map(|[to_zero, to_one]| {
        let total = to_zero + to_one;
        if total == 0 {
            0.5
        } else {
            to_one as f64 / total as f64
        }
    })
}

impl NullModel for MarkovSurrogate {
    fn info(&self) -> &NullInfo {
        &MARKOV_INFO
    }

    fn generate(
        &self,
        bits: &Bitstring,
        _words: &[Range<usize>],
        seed: u64,
        _params: &NullParams,
    ) -> Bitstring {
        let src = bits.as_slice();
        if src.len() < 2 {
            return bits.clone();
        }
        let p_one = transition_probabilities(src);
        let mut rng = rng_for(seed);
        let mut out = Vec::with_capacity(src.len());
        let mut prev = src[0];
        out.push(prev);
        for _ in 1..src.len() {
            prev = u8::from(rng.random::<f64>() < p_one[prev as usize]);
            out.push(prev);
        }
        Bitstring::from_bits(out)
    }
}
