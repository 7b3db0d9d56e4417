//! The permutation test: one validated path from a [`TestSpec`] to a [`TestResult`].
//!
//! ```text
//! resolve components → encode → observed ratio per metric
//!   → n_perm null variants (sub-seed per iteration) → ratios
//!   → p-value, effect size, robustness, interpretation
//! ```
//!
//! The p-value is the smoothed permutation p-value
//! `(count(null <= observed) + 1) / (n_perm + 1)`: "more extreme" means *lower*
//! compression ratio, because the engine tests for excess compressibility.

use std::ops::Range;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use statrs::statistics::Statistics;

use crate::bits::{BITS_PER_BYTE, Bitstring};
use crate::claims::{ClaimLevel, classify};
use crate::corpus::Corpus;
use crate::encoding::Encoding;
use crate::error::{ComponentKind, ConfigurationError, ContractViolation, Result};
use crate::metrics::{DEFAULT_METRIC, Metric, ratio_in_range};
use crate::nulls::{NullModel, NullParams, WORD_PERM, check_conservation};
use crate::registry::Registry;

/// Smallest accepted `n_perm`.
pub const MIN_PERMUTATIONS: usize = 100;
pub const DEFAULT_PERMUTATIONS: usize = 1000;
pub const DEFAULT_SEED: u64 = 42;
/// Uncorrected significance level.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
/// Scale from a compression-ratio gap to bits per character.
pub const BITS_PER_SYMBOL: f64 = BITS_PER_BYTE as f64;
/// Effect size (bits/char) a robust result must exceed to count as meaningful.
pub const MEANINGFUL_EFFECT: f64 = 0.01;

const SUB_SEED_DOMAIN: &[u8] = b"bitstruct/null-iteration/v1";

// ---------------------------------------------------------------------------
// Specification
// ---------------------------------------------------------------------------

/// Which metrics a test evaluates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSelection {
    One(String),
    /// Every metric registered at execution time (robustness mode).
    All,
}

/// Multiple-comparison correction of the significance threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    #[default]
    None,
    /// Divide the threshold by the number of encodings under simultaneous test.
    Bonferroni { encodings: usize },
}

impl Correction {
    pub fn threshold(&self) -> std::result::Result<f64, ConfigurationError> {
        match *self {
            Self::None => Ok(SIGNIFICANCE_LEVEL),
            Self::Bonferroni { encodings: 0 } => Err(ConfigurationError::EmptyCorrection),
            Self::Bonferroni { encodings } => Ok(SIGNIFICANCE_LEVEL / encodings as f64),
        }
    }
}

/// Everything needed to reproduce a test. Names are resolved when the test
/// runs, not when the spec is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSpec {
    pub corpus: String,
    pub encoding: String,
    pub null: String,
    pub null_params: NullParams,
    pub metric: MetricSelection,
    pub n_perm: usize,
    pub seed: u64,
    pub correction: Correction,
}

impl TestSpec {
    /// All metrics, 1000 permutations, seed 42, no correction.
    pub fn new(corpus: &str, encoding: &str, null: &str) -> Self {
        Self {
            corpus: corpus.to_string(),
            encoding: encoding.to_string(),
            null: null.to_string(),
            null_params: NullParams::default(),
            metric: MetricSelection::All,
            n_perm: DEFAULT_PERMUTATIONS,
            seed: DEFAULT_SEED,
            correction: Correction::None,
        }
    }

    pub fn with_metric(mut self, metric: &str) -> Self {
        self.metric = MetricSelection::One(metric.to_string());
        self
    }

    pub fn with_all_metrics(mut self) -> Self {
        self.metric = MetricSelection::All;
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

    pub fn with_block_size(mut self, k: usize) -> Self {
        self.null_params = NullParams::block(k);
        self
    }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    /// Checks that need no registry: permutation count and correction.
    pub fn validate(&self) -> Result<()> {
        if self.n_perm < MIN_PERMUTATIONS {
            return Err(ConfigurationError::TooFewPermutations {
                requested: self.n_perm,
                minimum: MIN_PERMUTATIONS,
            }
            .into());
        }
        self.correction.threshold()?;
        Ok(())
    }
}

/// Execution knobs that do not change results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Threads used for the null loop. Null distributions are identical for
    /// any value.
    pub workers: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Why a test produced no statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateCase {
    /// The encoding produced zero bits.
    EmptyBitstring,
    /// A word-level null was requested but the corpus has fewer than two words.
    NoWordBoundaries { words: usize },
}

impl DegenerateCase {
    pub fn reason(&self) -> String {
        match self {
            Self::EmptyBitstring => "encoding produced an empty bitstring".to_string(),
            Self::NoWordBoundaries { words } => {
                format!("corpus has {words} word(s); word permutation needs at least 2")
            }
        }
    }
}

/// Fixed reading of a single result, following the claim-level table: only
/// a robust win over `word_perm` reads as structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Undefined,
    NoEvidence,
    /// Significant under some metrics but not all.
    MetricDependent,
    /// Significant under every metric against a null weaker than `word_perm`.
    WeakerNullOnly,
    /// Robust against `word_perm`, smallest effect at most 0.01 bits/char.
    RobustWeakEffect,
    /// Robust against `word_perm` with a meaningful effect.
    RobustStructure,
}

impl Interpretation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED: degenerate input, no statistic computed",
            Self::NoEvidence => "NO CLAIM: does not beat the null under any metric",
            Self::MetricDependent => {
                "NO CLAIM: significant under some compressors only (likely compressor artifact)"
            }
            Self::WeakerNullOnly => {
                "NO CLAIM: beats a null weaker than word permutation; structure may be within words"
            }
            Self::RobustWeakEffect => {
                "WEAK: beats word permutation across all compressors, effect <= 0.01 bits/char"
            }
            Self::RobustStructure => {
                "REAL STRUCTURE: beats word permutation robustly across compressors"
            }
        }
    }

    fn from_outcomes(null: &str, outcomes: &[MetricOutcome], degenerate: bool) -> Self {
        if degenerate || outcomes.is_empty() {
            return Self::Undefined;
        }
        let significant = outcomes.iter().filter(|o| o.significant).count();
        if significant == 0 {
            Self::NoEvidence
        } else if significant < outcomes.len() {
            Self::MetricDependent
        } else if null != WORD_PERM {
            Self::WeakerNullOnly
        } else if smallest_effect(outcomes) > MEANINGFUL_EFFECT {
            Self::RobustStructure
        } else {
            Self::RobustWeakEffect
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Statistics for one metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricOutcome {
    pub metric: String,
    /// Ratio of the real bitstring. NaN for an empty bitstring.
    pub observed: f64,
    /// One ratio per permutation, in iteration order.
    pub null_distribution: Vec<f64>,
    pub null_mean: f64,
    /// Population standard deviation of the null distribution.
    pub null_std: f64,
    pub p_value: f64,
    pub effect_bits_per_char: f64,
    pub significant: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub spec: TestSpec,
    pub bit_length: usize,
    pub density: f64,
    /// Significance threshold after correction.
    pub threshold: f64,
    /// One entry per tested metric, in metric-name order for `All`.
    pub outcomes: Vec<MetricOutcome>,
    /// True iff every tested metric is significant on its own.
    pub robust: bool,
    pub interpretation: Interpretation,
    pub degenerate: Option<DegenerateCase>,
    /// Human-readable [`DegenerateCase::reason`], `None` when not degenerate.
    pub degenerate_reason: Option<String>,
}

impl TestResult {
    pub fn outcome(&self, metric: &str) -> Option<&MetricOutcome> {
        self.outcomes.iter().find(|o| o.metric == metric)
    }

    /// Outcome for the default metric, or the first tested one.
    pub fn default_outcome(&self) -> Option<&MetricOutcome> {
        self.outcome(DEFAULT_METRIC).or_else(|| self.outcomes.first())
    }

    /// Smallest effect across tested metrics (NaN if none or degenerate).
    pub fn smallest_effect(&self) -> f64 {
        smallest_effect(&self.outcomes)
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate.is_some()
    }

    /// Claim level from this result alone; length scale and cross-corpus
    /// evidence are not assessed.
    pub fn claim_level(&self) -> ClaimLevel {
        classify(self)
    }

    /// Fixed-format table, one row per metric.
    pub fn summary_table(&self) -> String {
        let mut lines = vec![
            format!(
                "{} / {} vs {} ({} permutations, seed {})",
                self.spec.corpus, self.spec.encoding, self.spec.null, self.spec.n_perm, self.spec.seed
            ),
            format!(
                "{:<8} | {:>9} | {:>17} | {:>8} | {:>18}",
                "Metric", "Observed", "Null mean ± std", "p-value", "Effect (bits/char)"
            ),
            "-".repeat(72),
        ];
        for o in &self.outcomes {
            let sig = if o.significant { "*" } else { "" };
            lines.push(format!(
                "{:<8} | {:>9.4} | {:>8.4} ± {:<6.4} | {:>8.4} | {:>18.4}{sig}",
                o.metric, o.observed, o.null_mean, o.null_std, o.p_value, o.effect_bits_per_char
            ));
        }
        lines.push(String::new());
        if let Some(case) = &self.degenerate {
            lines.push(format!("Degenerate: {}", case.reason()));
        }
        lines.push(format!("Robust: {}", self.robust));
        lines.push(format!("Interpretation: {}", self.interpretation));
        lines.join("\n")
    }
}

fn smallest_effect(outcomes: &[MetricOutcome]) -> f64 {
    outcomes
        .iter()
        .map(|o| o.effect_bits_per_char)
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Statistics helpers
// ---------------------------------------------------------------------------

/// Sub-seed for permutation `index`: the first 8 bytes (little-endian) of
/// SHA-256 over a domain tag, `seed` and `index`.
pub fn derive_sub_seed(seed: u64, index: usize) -> u64 {
    let mut h = Sha256::new();
    h.update(SUB_SEED_DOMAIN);
    h.update(seed.to_le_bytes());
    h.update((index as u64).to_le_bytes());
    let digest: [u8; 32] = h.finalize().into();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

/// Smoothed permutation p-value toward lower ratios.
pub fn permutation_p_value(observed: f64, null_distribution: &[f64]) -> f64 {
    let as_extreme = null_distribution.iter().filter(|&&x| x <= observed).count();
    (as_extreme + 1) as f64 / (null_distribution.len() + 1) as f64
}

/// `(null_mean - observed) * 8`: positive means the real bitstring compresses better.
pub fn effect_bits_per_char(observed: f64, null_mean: f64) -> f64 {
    (null_mean - observed) * BITS_PER_SYMBOL
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run a test with the default (single-threaded) configuration.
pub fn run_test(registry: &Registry, spec: &TestSpec) -> Result<TestResult> {
    run_test_with(registry, spec, &ExecutorConfig::default())
}

/// Word permutation against every registered metric: the default entry point
/// for "is there structure beyond word boundaries?".
pub fn quick_test(
    registry: &Registry,
    corpus: &str,
    encoding: &str,
    n_perm: usize,
) -> Result<TestResult> {
    let spec = TestSpec::new(corpus, encoding, WORD_PERM)
        .with_all_metrics()
        .with_n_perm(n_perm);
    run_test(registry, &spec)
}

pub fn run_test_with(
    registry: &Registry,
    spec: &TestSpec,
    config: &ExecutorConfig,
) -> Result<TestResult> {
    spec.validate()?;
    let corpus = registry.corpus(&spec.corpus)?;
    let encoding = registry.encoding(&spec.encoding)?;
    let null = registry.null(&spec.null)?;
    let metrics = match &spec.metric {
        MetricSelection::One(name) => vec![registry.metric(name)?],
        MetricSelection::All => registry.all_metrics()?,
    };
    null.check_params(&spec.null_params)?;
    let threshold = spec.correction.threshold()?;

    debug!(
        "run_test {}/{} vs {} ({} permutations, {} metric(s), seed {})",
        spec.corpus,
        spec.encoding,
        spec.null,
        spec.n_perm,
        metrics.len(),
        spec.seed
    );

    let context = format!("corpus '{}'", corpus.name());
    let bits = encoding.encode_deterministic(corpus.text(), &context)?;
    if bits.is_empty() {
        return degenerate_result(
            spec,
            &bits,
            &metrics,
            threshold,
            DegenerateCase::EmptyBitstring,
        );
    }

    let words = if null.info().needs_words {
        if corpus.word_count() < 2 {
            return degenerate_result(
                spec,
                &bits,
                &metrics,
                threshold,
                DegenerateCase::NoWordBoundaries {
                    words: corpus.word_count(),
                },
            );
        }
        word_bit_spans(&encoding, &corpus, &bits)?
    } else {
        Vec::new()
    };

    let observed = metrics
        .iter()
        .map(|m| checked_ratio(m.as_ref(), &bits, None))
        .collect::<std::result::Result<Vec<f64>, _>>()?;

    let plan = NullPlan {
        bits: &bits,
        words: &words,
        null: null.as_ref(),
        params: &spec.null_params,
        metrics: &metrics,
        seed: spec.seed,
    };
    let rows = null_ratios(&plan, spec.n_perm, config.workers)?;

    let outcomes: Vec<MetricOutcome> = metrics
        .iter()
        .enumerate()
        .map(|(j, metric)| {
            let null_distribution: Vec<f64> = rows.iter().map(|row| row[j]).collect();
            summarize(metric.name(), observed[j], null_distribution, threshold)
        })
        .collect();

    let robust = outcomes.iter().all(|o| o.significant);
    let interpretation = Interpretation::from_outcomes(&spec.null, &outcomes, false);
    for o in &outcomes {
        debug!(
            "  {}: observed={:.4} null={:.4}±{:.4} p={:.4} effect={:.4}",
            o.metric, o.observed, o.null_mean, o.null_std, o.p_value, o.effect_bits_per_char
        );
    }

    Ok(TestResult {
        spec: spec.clone(),
        bit_length: bits.len(),
        density: bits.density(),
        threshold,
        outcomes,
        robust,
        interpretation,
        degenerate: None,
        degenerate_reason: None,
    })
}

fn summarize(
    metric: &str,
    observed: f64,
    null_distribution: Vec<f64>,
    threshold: f64,
) -> MetricOutcome {
    let null_mean = null_distribution.iter().mean();
    let null_std = null_distribution.iter().population_std_dev();
    let p_value = permutation_p_value(observed, &null_distribution);
    MetricOutcome {
        metric: metric.to_string(),
        observed,
        null_mean,
        null_std,
        p_value,
        effect_bits_per_char: effect_bits_per_char(observed, null_mean),
        significant: p_value < threshold,
        null_distribution,
    }
}

fn degenerate_result(
    spec: &TestSpec,
    bits: &Bitstring,
    metrics: &[Arc<dyn Metric>],
    threshold: f64,
    case: DegenerateCase,
) -> Result<TestResult> {
    warn!(
        "degenerate test {}/{} vs {}: {}",
        spec.corpus,
        spec.encoding,
        spec.null,
        case.reason()
    );
    let outcomes = metrics
        .iter()
        .map(|m| {
            let observed = if bits.is_empty() {
                f64::NAN
            } else {
                checked_ratio(m.as_ref(), bits, None)?
            };
            Ok::<_, ContractViolation>(MetricOutcome {
                metric: m.name().to_string(),
                observed,
                null_distribution: Vec::new(),
                null_mean: f64::NAN,
                null_std: f64::NAN,
                p_value: f64::NAN,
                effect_bits_per_char: f64::NAN,
                significant: false,
            })
        })
        .collect::<std::result::Result<Vec<_>, ContractViolation>>()?;
    Ok(TestResult {
        spec: spec.clone(),
        bit_length: bits.len(),
        density: bits.density(),
        threshold,
        outcomes,
        robust: false,
        interpretation: Interpretation::Undefined,
        degenerate: Some(case),
        degenerate_reason: Some(case.reason()),
    })
}

/// Bit range of every word in the encoded corpus.
///
/// Each word and each gap is encoded on its own; the pieces must concatenate
/// to exactly the full encoding.
fn word_bit_spans(
    encoding: &Encoding,
    corpus: &Corpus,
    full: &Bitstring,
) -> std::result::Result<Vec<Range<usize>>, ContractViolation> {
    let context = format!("a segment of corpus '{}'", corpus.name());
    let mut spans = Vec::with_capacity(corpus.word_count());
    let mut rebuilt: Vec<u8> = Vec::with_capacity(full.len());
    for segment in corpus.segments() {
        let piece = encoding.encode(&corpus.text()[segment.range.clone()], &context)?;
        let start = rebuilt.len();
        rebuilt.extend_from_slice(piece.as_slice());
        if segment.is_word {
            spans.push(start..rebuilt.len());
        }
    }
    if rebuilt != full.as_slice() {
        return Err(ContractViolation::NonCompositionalEncoding {
            encoding: encoding.name().to_string(),
            corpus: corpus.name().to_string(),
        });
    }
    Ok(spans)
}

fn checked_ratio(
    metric: &dyn Metric,
    bits: &Bitstring,
    iteration: Option<usize>,
) -> std::result::Result<f64, ContractViolation> {
    let ratio = catch_unwind(AssertUnwindSafe(|| metric.ratio(bits))).map_err(|_| {
        ContractViolation::ComponentPanicked {
            kind: ComponentKind::Metric,
            name: metric.name().to_string(),
            iteration: iteration.unwrap_or(0),
        }
    })?;
    if !ratio_in_range(ratio) {
        return Err(ContractViolation::RatioOutOfRange {
            metric: metric.name().to_string(),
            ratio,
        });
    }
    Ok(ratio)
}

/// Inputs shared by every permutation.
struct NullPlan<'a> {
    bits: &'a Bitstring,
    words: &'a [Range<usize>],
    null: &'a dyn NullModel,
    params: &'a NullParams,
    metrics: &'a [Arc<dyn Metric>],
    seed: u64,
}

impl NullPlan<'_> {
    /// Ratios for one permutation, one per metric.
    fn iteration(&self, i: usize) -> std::result::Result<Vec<f64>, ContractViolation> {
        let sub_seed = derive_sub_seed(self.seed, i);
        let null_bits = catch_unwind(AssertUnwindSafe(|| {
            self.null.generate(self.bits, self.words, sub_seed, self.params)
        }))
        .map_err(|_| ContractViolation::ComponentPanicked {
            kind: ComponentKind::Null,
            name: self.null.name().to_string(),
            iteration: i,
        })?;
        check_conservation(self.null.info(), self.bits, &null_bits, i)?;
        self.metrics
            .iter()
            .map(|m| checked_ratio(m.as_ref(), &null_bits, Some(i)))
            .collect()
    }

    fn run(&self, range: Range<usize>) -> std::result::Result<Vec<Vec<f64>>, ContractViolation> {
        range.map(|i| self.iteration(i)).collect()
    }
}

/// All permutation rows in iteration order. With several workers, each takes
/// a contiguous index range and rows are concatenated in range order.
fn null_ratios(
    plan: &NullPlan<'_>,
    n_perm: usize,
    workers: usize,
) -> std::result::Result<Vec<Vec<f64>>, ContractViolation> {
    let workers = workers.clamp(1, n_perm.max(1));
    if workers == 1 {
        return plan.run(0..n_perm);
    }
    let chunk = n_perm.div_ceil(workers);
    let ranges: Vec<Range<usize>> = (0..n_perm)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(n_perm))
        .collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                let first = range.start;
                (first, s.spawn(move || plan.run(range)))
            })
            .collect();

        let mut rows = Vec::with_capacity(n_perm);
        for (first, handle) in handles {
            let chunk_rows = handle
                .join()
                .map_err(|_| ContractViolation::ComponentPanicked {
                    kind: ComponentKind::Null,
                    name: plan.null.name().to_string(),
                    iteration: first,
                })??;
            rows.extend(chunk_rows);
        }
        Ok(rows)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_seeds_are_pure_and_distinct() {
        assert_eq!(derive_sub_seed(42, 7), derive_sub_seed(42, 7));
        assert_ne!(derive_sub_seed(42, 7), derive_sub_seed(42, 8));
        assert_ne!(derive_sub_seed(42, 7), derive_sub_seed(43, 7));
    }

    #[test]
    fn p_value_smoothing() {
        // Nothing as extreme: smallest possible p.
        let p = permutation_p_value(0.1, &[0.5; 99]);
        assert!((p - 1.0 / 100.0).abs() < 1e-12);
        // Everything as extreme: p = 1.
        let p = permutation_p_value(0.9, &[0.5; 99]);
        assert!((p - 1.0).abs() < 1e-12);
        // Ties count as extreme.
        let p = permutation_p_value(0.5, &[0.5, 0.6, 0.7]);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn effect_scales_by_eight() {
        assert!((effect_bits_per_char(0.4, 0.5) - 0.8).abs() < 1e-12);
        assert!(effect_bits_per_char(0.5, 0.4) < 0.0);
    }

    #[test]
    fn bonferroni_threshold() {
        assert_eq!(Correction::None.threshold().unwrap(), 0.05);
        let t = Correction::Bonferroni { encodings: 5 }.threshold().unwrap();
        assert!((t - 0.01).abs() < 1e-12);
        assert!(Correction::Bonferroni { encodings: 0 }.threshold().is_err());
    }

    #[test]
    fn too_few_permutations_rejected() {
        let spec = TestSpec::new("c", "e", "random").with_n_perm(99);
        let err = spec.validate().unwrap_err();
        assert_eq!(err.stable_code(), "CFG_TOO_FEW_PERMUTATIONS");
        assert!(TestSpec::new("c", "e", "random").with_n_perm(100).validate().is_ok());
    }

    fn outcome(metric: &str, significant: bool, effect: f64) -> MetricOutcome {
        MetricOutcome {
            metric: metric.into(),
            observed: 0.5,
            null_distribution: vec![0.6; 100],
            null_mean: 0.6,
            null_std: 0.0,
            p_value: if significant { 0.01 } else { 0.5 },
            effect_bits_per_char: effect,
            significant,
        }
    }

    #[test]
    fn interpretation_table() {
        let all = [outcome("zlib", true, 0.5), outcome("bz2", true, 0.2)];
        assert_eq!(
            Interpretation::from_outcomes(WORD_PERM, &all, false),
            Interpretation::RobustStructure
        );
        let weak = [outcome("zlib", true, 0.5), outcome("bz2", true, 0.01)];
        assert_eq!(
            Interpretation::from_outcomes(WORD_PERM, &weak, false),
            Interpretation::RobustWeakEffect
        );
        let some = [outcome("zlib", true, 0.5), outcome("bz2", false, 0.2)];
        assert_eq!(
            Interpretation::from_outcomes(WORD_PERM, &some, false),
            Interpretation::MetricDependent
        );
        let none = [outcome("zlib", false, 0.0)];
        assert_eq!(
            Interpretation::from_outcomes(WORD_PERM, &none, false),
            Interpretation::NoEvidence
        );
        assert_eq!(
            Interpretation::from_outcomes(WORD_PERM, &all, true),
            Interpretation::Undefined
        );
        assert_eq!(
            Interpretation::from_outcomes(WORD_PERM, &[], false),
            Interpretation::Undefined
        );
    }

    #[test]
    fn robust_win_over_weaker_null_is_not_structure() {
        let all = [outcome("zlib", true, 0.5), outcome("bz2", true, 0.2)];
        for null in ["random", "block_k", "markov"] {
            assert_eq!(
                Interpretation::from_outcomes(null, &all, false),
                Interpretation::WeakerNullOnly
            );
        }
    }
}
