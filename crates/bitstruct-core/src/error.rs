//! Error taxonomy for the engine.
//!
//! Two families, both fatal to the call that raised them:
//!
//! - [`ConfigurationError`]: the request cannot be run as stated (unknown
//!   component, too few permutations, bad parameters).
//! - [`ContractViolation`]: a registered component broke its contract
//!   (non-binary output, lost bits, ratio out of range).
//!
//! Degenerate inputs (empty bitstring, no word boundaries) are *not* errors;
//! they come back as results carrying a [`crate::DegenerateCase`] marker.

use thiserror::Error;

/// Kind of registered component, used to name the offender in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Corpus,
    Encoding,
    Null,
    Metric,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corpus => write!(f, "corpus"),
            Self::Encoding => write!(f, "encoding"),
            Self::Null => write!(f, "null model"),
            Self::Metric => write!(f, "metric"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{kind} '{name}' is not registered")]
    Unregistered { kind: ComponentKind, name: String },
    #[error("n_perm must be >= {minimum} for a meaningful p-value, got {requested}")]
    TooFewPermutations { requested: usize, minimum: usize },
    #[error("null model '{null}' requires a block size parameter")]
    MissingBlockSize { null: String },
    #[error("null model '{null}' requires a block size > 0")]
    ZeroBlockSize { null: String },
    #[error("Bonferroni correction needs at least one encoding under test")]
    EmptyCorrection,
    #[error("length-scale sweep needs at least one block size")]
    EmptyBlockSizes,
    #[error("length-scale block sizes must be non-zero and strictly increasing, got {sizes:?}")]
    UnorderedBlockSizes { sizes: Vec<usize> },
    #[error("corpus '{name}' has empty text")]
    EmptyCorpus { name: String },
    #[error("no metrics are registered; cannot run an all-metric test")]
    NoMetrics,
    #[error("{kind} name must not be empty")]
    EmptyName { kind: ComponentKind },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractViolation {
    #[error("encoding '{encoding}' emitted {symbol:?} at position {position}; only '0' and '1' are allowed")]
    NonBinarySymbol {
        encoding: String,
        position: usize,
        symbol: char,
    },
    #[error("encoding '{encoding}' panicked while encoding {context}")]
    EncodingPanicked { encoding: String, context: String },
    #[error("encoding '{encoding}' is not deterministic: two runs over {context} differ")]
    NonDeterministicEncoding { encoding: String, context: String },
    #[error(
        "encoding '{encoding}' is not word-compositional: per-word encodings do not \
         concatenate to the encoding of corpus '{corpus}', so word_perm cannot locate word bits"
    )]
    NonCompositionalEncoding { encoding: String, corpus: String },
    #[error(
        "null model '{null}' broke bit conservation at iteration {iteration}: \
         length {expected_len} -> {actual_len}, ones {expected_ones} -> {actual_ones}"
    )]
    BitConservation {
        null: String,
        iteration: usize,
        expected_len: usize,
        actual_len: usize,
        expected_ones: usize,
        actual_ones: usize,
    },
    #[error("metric '{metric}' returned ratio {ratio} outside (0, 1]")]
    RatioOutOfRange { metric: String, ratio: f64 },
    #[error("{kind} '{name}' panicked at iteration {iteration}")]
    ComponentPanicked {
        kind: ComponentKind,
        name: String,
        iteration: usize,
    },
}

/// Any failure of a registry operation, test run or length-scale sweep.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),
}

impl EngineError {
    pub fn stable_code(&self) -> &'static str {
        match self {
            Self::Configuration(err) => match err {
                ConfigurationError::Unregistered { .. } => "CFG_UNREGISTERED",
                ConfigurationError::TooFewPermutations { .. } => "CFG_TOO_FEW_PERMUTATIONS",
                ConfigurationError::MissingBlockSize { .. } => "CFG_MISSING_BLOCK_SIZE",
                ConfigurationError::ZeroBlockSize { .. } => "CFG_ZERO_BLOCK_SIZE",
                ConfigurationError::EmptyCorrection => "CFG_EMPTY_CORRECTION",
                ConfigurationError::EmptyBlockSizes => "CFG_EMPTY_BLOCK_SIZES",
                ConfigurationError::UnorderedBlockSizes { .. } => "CFG_UNORDERED_BLOCK_SIZES",
                ConfigurationError::EmptyCorpus { .. } => "CFG_EMPTY_CORPUS",
                ConfigurationError::NoMetrics => "CFG_NO_METRICS",
                ConfigurationError::EmptyName { .. } => "CFG_EMPTY_NAME",
            },
            Self::Contract(err) => match err {
                ContractViolation::NonBinarySymbol { .. } => "CONTRACT_NON_BINARY_SYMBOL",
                ContractViolation::EncodingPanicked { .. } => "CONTRACT_ENCODING_PANICKED",
                ContractViolation::NonDeterministicEncoding { .. } => {
                    "CONTRACT_NON_DETERMINISTIC_ENCODING"
                }
                ContractViolation::NonCompositionalEncoding { .. } => {
                    "CONTRACT_NON_COMPOSITIONAL_ENCODING"
                }
                ContractViolation::BitConservation { .. } => "CONTRACT_BIT_CONSERVATION",
                ContractViolation::RatioOutOfRange { .. } => "CONTRACT_RATIO_OUT_OF_RANGE",
                ContractViolation::ComponentPanicked { .. } => "CONTRACT_COMPONENT_PANICKED",
            },
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
