//! Null model generators.
//!
//! Every null model implements the [`NullModel`] trait: metadata via
//! [`NullInfo`] and a pure, seeded generator. Given the same bits, word spans,
//! seed and parameters a generator must return the same output.
//!
//! | name        | preserves                       | destroys                      |
//! |-------------|---------------------------------|-------------------------------|
//! | `random`    | 1-density                       | all sequential structure      |
//! | `block_k`   | patterns inside `k`-bit blocks  | patterns across block edges   |
//! | `word_perm` | each word's bits                | word order, cross-word links  |
//! | `markov`    | 1-rate, P(bit given previous)   | higher-order structure        |

mod markov;
mod shuffle;
mod word;

use std::ops::Range;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::bits::Bitstring;
use crate::error::{ConfigurationError, ContractViolation};

pub use markov::MarkovSurrogate;
pub use shuffle::{BlockShuffle, RandomShuffle};
pub use word::WordPermutation;

/// Name of the full-shuffle null.
pub const RANDOM: &str = "random";
/// Name of the block-shuffle null; takes [`NullParams::block_size`].
pub const BLOCK_K: &str = "block_k";
/// Name of the word-permutation null, the critical null for cross-word claims.
pub const WORD_PERM: &str = "word_perm";
/// Name of the first-order Markov surrogate.
pub const MARKOV: &str = "markov";

/// Metadata about a null model.
#[derive(Debug, Clone, Serialize)]
pub struct NullInfo {
    /// Unique identifier (e.g. `"word_perm"`).
    pub name: &'static str,
    pub description: &'static str,
    /// Structure the null keeps intact.
    pub preserves: &'static str,
    /// Structure the null destroys.
    pub destroys: &'static str,
    /// Whether the generator reads the word spans.
    pub needs_words: bool,
    /// Whether the output must keep the exact number of ones. Only length is
    /// checked for nulls that set this to false.
    pub conserves_density: bool,
}

/// Parameters beyond the bits and the seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullParams {
    /// Block length in bits, for `block_k`.
    pub block_size: Option<usize>,
}

impl NullParams {
    pub fn block(k: usize) -> Self {
        Self {
            block_size: Some(k),
        }
    }
}

/// Trait that every null model must implement.
pub trait NullModel: Send + Sync {
    fn info(&self) -> &NullInfo;

    /// Reject parameters the generator cannot work with. Called once per test,
    /// before any generation.
    fn check_params(&self, _params: &NullParams) -> Result<(), ConfigurationError> {
        Ok(())
    }

    /// Produce one randomized variant of `bits`.
    ///
    /// `words` holds the bit range of every word in order, non-overlapping.
    fn generate(
        &self,
        bits: &Bitstring,
        words: &[Range<usize>],
        seed: u64,
        params: &NullParams,
    ) -> Bitstring;

    fn name(&self) -> &'static str {
        self.info().name
    }
}

/// All built-in null models.
pub fn builtin_nulls() -> Vec<Box<dyn NullModel>> {
    vec![
        Box::new(RandomShuffle),
        Box::new(BlockShuffle),
        Box::new(WordPermutation),
        Box::new(MarkovSurrogate),
    ]
}

/// Seeded generator used by every built-in null.
pub(crate) fn rng_for(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Check that `output` has the same length as `input` and, when the null
/// conserves density, the same number of ones.
pub fn check_conservation(
    info: &NullInfo,
    input: &Bitstring,
    output: &Bitstring,
    iteration: usize,
) -> Result<(), ContractViolation> {
    let expected_ones = input.count_ones();
    let actual_ones = output.count_ones();
    let ones_ok = !info.conserves_density || expected_ones == actual_ones;
    if input.len() != output.len() || !ones_ok {
        return Err(ContractViolation::BitConservation {
            null: info.name.to_string(),
            iteration,
            expected_len: input.len(),
            actual_len: output.len(),
            expected_ones,
            actual_ones,
        });
    }
    Ok(())
}
