//! Length-scale diagnostic: sweep the block-shuffle null over block sizes and
//! find where the structure disappears.
//!
//! Shuffling `k`-bit blocks keeps everything shorter than `k` intact. The
//! first block size at which the real bitstring is no longer significantly
//! more compressible than its block-shuffled variants marks the length scale
//! of the structure.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::executor::{
    DEFAULT_PERMUTATIONS, DEFAULT_SEED, ExecutorConfig, TestSpec, run_test_with,
};
use crate::metrics::DEFAULT_METRIC;
use crate::nulls::BLOCK_K;
use crate::registry::Registry;

pub const DEFAULT_BLOCK_SIZES: [usize; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthScaleSpec {
    pub corpus: String,
    pub encoding: String,
    pub metric: String,
    /// Strictly increasing, non-zero.
    pub block_sizes: Vec<usize>,
    pub n_perm: usize,
    /// Point `k` runs with seed `seed + k` (wrapping).
    pub seed: u64,
}

impl LengthScaleSpec {
    /// zlib, block sizes 1..=128 (powers of two), 1000 permutations, seed 42.
    pub fn new(corpus: &str, encoding: &str) -> Self {
        Self {
            corpus: corpus.to_string(),
            encoding: encoding.to_string(),
            metric: DEFAULT_METRIC.to_string(),
            block_sizes: DEFAULT_BLOCK_SIZES.to_vec(),
            n_perm: DEFAULT_PERMUTATIONS,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_metric(mut self, metric: &str) -> Self {
        self.metric = metric.to_string();
        self
    }

    pub fn with_block_sizes(mut self, sizes: &[usize]) -> Self {
        self.block_sizes = sizes.to_vec();
        self
    }

    pub fn with_n_perm(mut self, n_perm: usize) -> Self {
        self.n_perm = n_perm;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if self.block_sizes.is_empty() {
            return Err(ConfigurationError::EmptyBlockSizes);
        }
        let ordered = self.block_sizes.first().is_some_and(|&k| k > 0)
            && self.block_sizes.windows(2).all(|w| w[0] < w[1]);
        if !ordered {
            return Err(ConfigurationError::UnorderedBlockSizes {
                sizes: self.block_sizes.clone(),
            });
        }
        Ok(())
    }

    /// The test run for block size `k`.
    pub fn point_spec(&self, k: usize) -> TestSpec {
        TestSpec::new(&self.corpus, &self.encoding, BLOCK_K)
            .with_metric(&self.metric)
            .with_block_size(k)
            .with_n_perm(self.n_perm)
            .with_seed(self.seed.wrapping_add(k as u64))
    }
}

/// Spatial extent of the detected structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ScaleClass {
    LetterLocal,
    WordScale,
    PhraseScale,
    SentenceScale,
    LongRange,
}

impl ScaleClass {
    /// Label for the block size at which significance vanished; `None` means
    /// it never did.
    pub fn from_boundary(boundary: Option<usize>) -> Self {
        match boundary {
            None => Self::LongRange,
            Some(k) if k <= 2 => Self::LetterLocal,
            Some(k) if k <= 8 => Self::WordScale,
            Some(k) if k <= 32 => Self::PhraseScale,
            Some(_) => Self::SentenceScale,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LetterLocal => "LETTER-LOCAL",
            Self::WordScale => "WORD-SCALE",
            Self::PhraseScale => "PHRASE-SCALE",
            Self::SentenceScale => "SENTENCE-SCALE",
            Self::LongRange => "LONG-RANGE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::LetterLocal => "structure is within adjacent symbols only",
            Self::WordScale => "structure vanishes at word length",
            Self::PhraseScale => "structure vanishes at phrase length",
            Self::SentenceScale => "structure vanishes at sentence length",
            Self::LongRange => "structure persists at all tested scales",
        }
    }
}

impl std::fmt::Display for ScaleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurvePoint {
    pub block_size: usize,
    pub effect_bits_per_char: f64,
    pub p_value: f64,
    pub significant: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LengthScaleCurve {
    pub spec: LengthScaleSpec,
    /// In block-size order.
    pub points: Vec<CurvePoint>,
    /// Smallest block size at which significance is lost.
    pub boundary: Option<usize>,
    pub scale: ScaleClass,
}

impl LengthScaleCurve {
    /// Build a curve from points and derive the boundary and class.
    pub fn from_points(spec: LengthScaleSpec, points: Vec<CurvePoint>) -> Self {
        let boundary = points.iter().find(|p| !p.significant).map(|p| p.block_size);
        Self {
            spec,
            points,
            boundary,
            scale: ScaleClass::from_boundary(boundary),
        }
    }

    pub fn summary_table(&self) -> String {
        let mut lines = vec![
            "Block Size | Effect (bits/char) | p-value".to_string(),
            "-".repeat(45),
        ];
        for p in &self.points {
            let sig = if p.significant { "*" } else { "" };
            lines.push(format!(
                "{:10} | {:18.4} | {:.4}{sig}",
                p.block_size, p.effect_bits_per_char, p.p_value
            ));
        }
        lines.push(String::new());
        let at = match self.boundary {
            Some(k) => format!(" (vanishes at {k} bits)"),
            None => String::new(),
        };
        lines.push(format!(
            "Interpretation: {}: {}{at}",
            self.scale,
            self.scale.description()
        ));
        lines.join("\n")
    }
}

pub fn run_length_scale_test(registry: &Registry, spec: &LengthScaleSpec) -> Result<LengthScaleCurve> {
    run_length_scale_test_with(registry, spec, &ExecutorConfig::default())
}

pub fn run_length_scale_test_with(
    registry: &Registry,
    spec: &LengthScaleSpec,
    config: &ExecutorConfig,
) -> Result<LengthScaleCurve> {
    spec.validate()?;
    let mut points = Vec::with_capacity(spec.block_sizes.len());
    for &k in &spec.block_sizes {
        let result = run_test_with(registry, &spec.point_spec(k), config)?;
        let point = match result.default_outcome() {
            Some(o) if !result.is_degenerate() => CurvePoint {
                block_size: k,
                effect_bits_per_char: o.effect_bits_per_char,
                p_value: o.p_value,
                significant: o.significant,
            },
            _ => CurvePoint {
                block_size: k,
                effect_bits_per_char: f64::NAN,
                p_value: f64::NAN,
                significant: false,
            },
        };
        debug!(
            "length-scale {}/{} k={k}: effect={:.4} p={:.4}",
            spec.corpus, spec.encoding, point.effect_bits_per_char, point.p_value
        );
        points.push(point);
    }
    Ok(LengthScaleCurve::from_points(spec.clone(), points))
}
