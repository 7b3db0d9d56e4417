//! # bitstruct-core
//!
//! **Does this bitstring compress better than its null variants, by how much,
//! and does the answer hold across compressors?**
//!
//! `bitstruct-core` is a permutation-testing engine for structure in
//! binary-encoded text. A researcher maps text to bits with an *encoding*,
//! then asks whether the real bitstring is more compressible than variants
//! produced by *null models* that each destroy one kind of structure (global
//! order, block-local patterns, word order).
//!
//! ## Quick Start
//!
//! ```no_run
//! use bitstruct_core::{CharClassEncoding, Registry, quick_test};
//!
//! let mut registry = Registry::with_builtins();
//! registry.register_corpus("toy", "ab ba ab ba").unwrap();
//! let enc = CharClassEncoding::new("a", "b");
//! registry
//!     .add_encoding(enc.into_encoding("a1", "a=1 b=0", "letter identity", true))
//!     .unwrap();
//!
//! let result = quick_test(&registry, "toy", "a1", 1000).unwrap();
//! println!("{}", result.summary_table());
//! ```
//!
//! ## Architecture
//!
//! Registry → TestSpec → Executor (encode → null loop → metrics) → TestResult
//!
//! - Null models: `random`, `block_k`, `word_perm`, `markov`.
//! - Metrics: `zlib`, `bz2`, `lzma` compression ratios over the packed bits.
//! - [`run_length_scale_test`] sweeps `block_k` to find how far structure extends.
//! - [`classify_with`] maps results onto claim levels L0–L5; only L3 and up
//!   are reportable.
//!
//! Every test goes through [`run_test_with`]: minimum permutation counts,
//! component contracts and bit conservation are checked on every call.

pub mod bits;
pub mod claims;
pub mod corpus;
pub mod encoding;
pub mod error;
pub mod executor;
pub mod length_scale;
pub mod metrics;
pub mod nulls;
pub mod registry;
pub mod report;

pub use bits::{BITS_PER_BYTE, Bitstring, InvalidSymbol};
pub use claims::{
    ClaimAssessment, ClaimLevel, CorpusEffect, CrossCorpusComparison, assess, classify,
    classify_with,
};
pub use corpus::{Corpus, CorpusInfo, Segment};
pub use encoding::{CharClassEncoding, Encoding, EncodingInfo};
pub use error::{ComponentKind, ConfigurationError, ContractViolation, EngineError, Result};
pub use executor::{
    Correction, DEFAULT_PERMUTATIONS, DEFAULT_SEED, DegenerateCase, ExecutorConfig,
    Interpretation, MIN_PERMUTATIONS, MetricOutcome, MetricSelection, SIGNIFICANCE_LEVEL,
    TestResult, TestSpec, derive_sub_seed, permutation_p_value, quick_test, run_test,
    run_test_with,
};
pub use length_scale::{
    CurvePoint, DEFAULT_BLOCK_SIZES, LengthScaleCurve, LengthScaleSpec, ScaleClass,
    run_length_scale_test, run_length_scale_test_with,
};
pub use metrics::{DEFAULT_METRIC, Metric, MetricInfo};
pub use nulls::{NullInfo, NullModel, NullParams};
pub use registry::{Registry, RegistryCatalog, RegistrySnapshot};
pub use report::write_json;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
