//! Bit-level shuffles: the full random shuffle and the block shuffle.

use std::ops::Range;

use rand::seq::SliceRandom;

use super::{BLOCK_K, NullInfo, NullModel, NullParams, RANDOM, rng_for};
use crate::bits::Bitstring;
use crate::error::ConfigurationError;

// ---------------------------------------------------------------------------
// RandomShuffle
// ---------------------------------------------------------------------------

static RANDOM_INFO: NullInfo = NullInfo {
    name: RANDOM,
    description: "Shuffle every bit independently",
    preserves: "0/1 ratio only",
    destroys: "All sequential structure",
    needs_words: false,
    conserves_density: true,
};

/// Full Fisher-Yates shuffle of all bits.
pub struct RandomShuffle;

impl NullModel for RandomShuffle {
    fn info(&self) -> &NullInfo {
        &RANDOM_INFO
    }

    fn generate(
        &self,
        bits: &Bitstring,
        _words: &[Range<usize>],
        seed: u64,
        _params: &NullParams,
    ) -> Bitstring {
        let mut out = bits.as_slice().to_vec();
        out.shuffle(&mut rng_for(seed));
        Bitstring::from_bits(out)
    }
}

// ---------------------------------------------------------------------------
// BlockShuffle
// ---------------------------------------------------------------------------

static BLOCK_INFO: NullInfo = NullInfo {
    name: BLOCK_K,
    description: "Cut into contiguous k-bit blocks and shuffle block order",
    preserves: "Patterns within k-bit blocks",
    destroys: "Patterns across block boundaries",
    needs_words: false,
    conserves_density: true,
};

/// Shuffle the order of contiguous `k`-bit blocks. The last block may be
/// shorter than `k`; it is shuffled along with the others. `k >= len` leaves
/// the input unchanged.
pub struct BlockShuffle;

impl NullModel for BlockShuffle {
    fn info(&self) -> &NullInfo {
        &BLOCK_INFO
    }

    fn check_params(&self, params: &NullParams) -> Result<(), ConfigurationError> {
        match params.block_size {
            None => Err(ConfigurationError::MissingBlockSize {
                null: BLOCK_K.to_string(),
            }),
            Some(0) => Err(ConfigurationError::ZeroBlockSize {
                null: BLOCK_K.to_string(),
            }),
            Some(_) => Ok(()),
        }
    }

    fn generate(
        &self,
        bits: &Bitstring,
        _words: &[Range<usize>],
        seed: u64,
        params: &NullParams,
    ) -> Bitstring {
        let k = params.block_size.unwrap_or(1).max(1);
        if k >= bits.len() {
            return bits.clone();
        }
        let mut blocks: Vec<&[u8]> = bits.as_slice().chunks(k).collect();
        blocks.shuffle(&mut rng_for(seed));
        Bitstring::from_bits(blocks.concat())
    }
}
